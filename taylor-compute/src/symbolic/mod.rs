//! Algebraic manipulation of expressions.
//!
//! # Expression representation
//!
//! Algebraic expressions in this module are represented as a tree of [`SymExpr`] nodes. It's
//! similar to the [`taylor_parser::parser::expr::Expr`] nodes produced by `taylor_parser`, with
//! the main difference being that [`SymExpr`] nodes **flatten** out the tree structure.
//!
//! For example, the expression `x + (y + z)` would be represented internally as a single
//! [`SymExpr::Add`] node with _three_ children, `x`, `y`, and `z`, where as the parser's node
//! would have two children, `x` and `(y + z)`.
//!
//! This is done to make it easier to perform algebraic manipulations on the expression. A common
//! step in simplifying an expression is to combine "like terms", that is, to combine terms that
//! share the same factors (e.g. `x + x = 2x`). This is much easier to do when the terms in
//! question are all at the same level in the tree.
//!
//! If you have a parsed expression, you can convert it to a [`SymExpr`] using the [`From`] trait.
//! The conversion is lossy: span information is dropped and terms / factors may be rearranged,
//! but the resulting expression is semantically equivalent to the original.
//!
//! # Simplification
//!
//! Expressions are reduced to a canonical-ish form with the [`simplify()`] function. We define an
//! expression to be simplified if it has the lowest _complexity_ in the set of all expressions
//! **semantically equivalent** to it, where complexity is roughly defined as the number of nodes
//! in the expression tree. For example, `x + x` is not simplified, because it can be reduced to
//! one term `2x`, which has lower complexity.
//!
//! Simplification is done by applying a set of simplification rules to the expression in multiple
//! passes. Each rule is simply a function that accepts an expression and returns
//! [`Option<SymExpr>`]; if the rule is applicable to the expression, the rule is applied and the
//! result is returned. The current set of rules is defined in [`simplify::rules`], and covers
//! combining like terms / factors, distributing multiplication over addition, power rules,
//! reduction of powers of the imaginary unit, and exact values of known functions.
//!
//! # Differentiation
//!
//! The [`derivative`] module computes symbolic derivatives. The series engine uses it to
//! differentiate partial series of an unknown function (for higher-order equations) and to
//! expand closed-form solutions into Taylor series on the exact-solve fast path.

pub mod derivative;
pub mod expr;
pub mod simplify;
pub mod step_collector;

pub use expr::SymExpr;
pub use simplify::{simplify, simplify_with};
pub use step_collector::StepCollector;
