use std::ops::Range;
use crate::{
    parser::{
        binary::Binary,
        call::Call,
        error::{kind, Error},
        literal::Literal,
        paren::Paren,
        token::CloseParen,
        unary::Unary,
        Parse,
        Parser,
        Precedence,
    },
    try_parse_catch_fatal,
};

/// Represents a general mathematical expression.
///
/// An expression is any valid piece of input that can be evaluated to produce a value: the
/// right-hand side of an ODE, an initial value, or an expansion point.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + x)`.
    Paren(Paren),

    /// A function call, such as `sin(x)`.
    Call(Call),

    /// A unary operation, such as `-y`.
    Unary(Unary),

    /// A binary operation, such as `x + y`.
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Call(call) => call.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
        }
    }

    /// If the expression is parenthesized, returns the innermost expression. Otherwise, returns
    /// the expression itself.
    pub fn innermost(&self) -> &Expr {
        match self {
            Expr::Paren(paren) => paren.expr.innermost(),
            expr => expr,
        }
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        if input.clone().try_parse::<CloseParen>().is_ok() {
            return Err(input.error_fatal(kind::UnclosedParenthesis { opening: false }));
        }

        let lhs = input.try_parse_with_fn(Unary::parse_or_lower)?;
        Binary::parse_expr(input, lhs, Precedence::Any)
    }
}

/// Represents a primary expression.
///
/// Primary expressions are the simplest expressions, and are the building blocks of more complex
/// expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + x)`.
    Paren(Paren),

    /// A function call, such as `sin(x)`.
    Call(Call),
}

impl Primary {
    /// Returns the span of the primary expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Primary::Literal(literal) => literal.span(),
            Primary::Paren(paren) => paren.span(),
            Primary::Call(call) => call.span(),
        }
    }
}

impl Parse for Primary {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        // function calls can overlap with literals, so we need to try parsing a function call
        // first
        let _ = try_parse_catch_fatal!(input.try_parse::<Call>().map(Self::Call));
        let _ = try_parse_catch_fatal!(input.try_parse::<Literal>().map(Self::Literal));

        input.try_parse::<Paren>().map(Self::Paren)
    }
}

impl From<Primary> for Expr {
    fn from(primary: Primary) -> Self {
        match primary {
            Primary::Literal(literal) => Self::Literal(literal),
            Primary::Paren(paren) => Self::Paren(paren),
            Primary::Call(call) => Self::Call(call),
        }
    }
}
