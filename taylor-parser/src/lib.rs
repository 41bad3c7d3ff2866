//! Tokenizer and parser for plain mathematical expressions.
//!
//! The input language is a single expression in everyday notation: integer and decimal literals,
//! symbols, function calls, parentheses, unary minus, and the `+`, `-`, `*`, `/`, and `^`
//! operators, with implicit multiplication (`2x`, `2(x + 1)`). Symbols may carry trailing prime
//! characters (`y'`, `y''`), which the ODE engine uses to reference derivatives of an unknown
//! function.

pub mod parser;
pub mod tokenizer;

pub use parser::Parser;
