use std::ops::Range;
use crate::parser::{
    binary::Binary,
    error::Error,
    expr::{Expr, Primary},
    token::op::UnaryOp,
    Parse,
    Parser,
};

/// A unary expression, such as `-y`. Unary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses a unary expression, or lower precedence expressions.
    pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        match input.try_parse::<Unary>() {
            Ok(unary) => Ok(Expr::Unary(unary)),
            Err(err) if err.fatal => Err(err),
            Err(_) => Primary::parse(input).map(Into::into),
        }
    }
}

impl Parse for Unary {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        // the only unary operator is negation, which is right-associative: the operand extends as
        // far right as its precedence allows (`-x^2` is `-(x^2)`, but `-x * y` is `(-x) * y`)
        let op = input.try_parse::<UnaryOp>()?;
        let op_precedence = op.precedence();
        let start_span = input.prev_token().unwrap().span.start;
        let operand = {
            let lhs = Self::parse_or_lower(input)?;
            Binary::parse_expr(input, lhs, op_precedence)?
        };
        let end_span = operand.span().end;
        Ok(Self {
            operand: Box::new(operand),
            op,
            span: start_span..end_span,
        })
    }
}
