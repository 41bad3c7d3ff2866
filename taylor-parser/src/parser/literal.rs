use std::ops::Range;
use super::{
    error::Error,
    token::{Float, Int, Name},
    Parse,
    Parser,
};

/// An integer literal. The value is kept as the raw string so that downstream consumers can parse
/// it with arbitrary precision.
#[derive(Debug, Clone, PartialEq)]
pub struct LitInt {
    /// The digits of the integer literal.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitInt {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.try_parse::<Int>()?;
        Ok(Self {
            value: token.lexeme,
            span: token.span,
        })
    }
}

/// A decimal literal, such as `3.14`. The value is kept as the raw string so that downstream
/// consumers can convert it to an exact rational.
#[derive(Debug, Clone, PartialEq)]
pub struct LitFloat {
    /// The digits of the decimal literal, including the decimal point.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitFloat {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.try_parse::<Float>()?;
        Ok(Self {
            value: token.lexeme,
            span: token.span,
        })
    }
}

/// A symbol / identifier literal, such as `x`, `sin`, or `y''`. Symbols are used to represent
/// variables and unknown functions (primes reference derivatives of an unknown).
#[derive(Debug, Clone, PartialEq)]
pub struct LitSym {
    /// The name of the symbol.
    pub name: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitSym {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.try_parse::<Name>()?;
        Ok(Self {
            name: token.lexeme,
            span: token.span,
        })
    }
}

/// Represents a literal value: a number or a symbol written directly in the input.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// An integer literal.
    Integer(LitInt),

    /// A decimal literal.
    Float(LitFloat),

    /// A symbol / identifier literal.
    Symbol(LitSym),
}

impl Literal {
    /// Returns the span of the literal.
    pub fn span(&self) -> Range<usize> {
        match self {
            Literal::Integer(int) => int.span.clone(),
            Literal::Float(float) => float.span.clone(),
            Literal::Symbol(sym) => sym.span.clone(),
        }
    }
}

impl Parse for Literal {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        input.try_parse::<LitInt>().map(Literal::Integer)
            .or_else(|_| input.try_parse::<LitFloat>().map(Literal::Float))
            .or_else(|_| input.try_parse::<LitSym>().map(Literal::Symbol))
    }
}
