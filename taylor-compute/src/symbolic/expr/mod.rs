//! A representation of mathematical expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](taylor_parser::parser::expr::Expr) type from `taylor_parser` is a recursive
//! `enum` that represents the AST of a mathematical expression. It's convenient for parsing, but
//! not so much for algebraic manipulation.
//!
//! This module defines a separate type, [`SymExpr`], that stores additional information about the
//! expression, such as the terms and factors that make it up. It simplifies the AST by recursively
//! flattening it into a list of terms or factors, depending on the operation, and normalizing the
//! expression into a sum of products.
//!
//! All submodules in this crate that deal with symbolic manipulation will use [`SymExpr`], and any
//! occurrences of the word `expression` will refer to this type.
//!
//! # Strict equality
//!
//! A common problem that arises in symbolic computation is determining if two expressions are
//! semantically / mathematically equal, in order to determine if terms / factors are similar
//! enough to be combined, for example. However, this is extremely difficult to do in general,
//! because there are an infinite number of ways to represent the same expression: consider
//! `x^2 + 2x + 1` and `(x + 1)^2`.
//!
//! To alleviate these issues, we define a subset of semantic equality for expressions, called
//! **strict equality**. We define two expressions to be strictly equal if:
//!
//! - They are the same type of expression (i.e. both [`SymExpr::Primary`], both [`SymExpr::Add`],
//!   etc.).
//! - If both are [`SymExpr::Primary`], both expressions must have strictly equal values.
//! - If both are [`SymExpr::Add`] or [`SymExpr::Mul`], both expressions must have strictly equal
//!   terms / factors, in any order.
//! - If both are [`SymExpr::Exp`], both expressions must have strictly equal base and exponent.
//!
//! Strict equality is not the same as semantic equality, but it can **never** report false
//! positives, and it is simple and fast to compute without any simplification. The [`PartialEq`]
//! and [`Eq`] implementations for [`SymExpr`] implement **strict equality**, not semantic
//! equality. Semantic equality of two expressions `a` and `b` is decided by simplifying `a - b`
//! and checking for the zero expression; the series types in [`crate::series`] do exactly that.

use crate::primitive::{int, int_from_str, rat_from_str};
use taylor_parser::parser::{
    expr::Expr as AstExpr,
    literal::Literal,
    token::op::{BinOpKind, Precedence, UnaryOpKind},
};
use rug::{Integer, Rational};
use std::{cmp::Ordering, ops::{Add, AddAssign, Mul, MulAssign, Neg}};
use super::simplify::fraction::make_fraction;

/// A single term / factor, such as a number, variable, or function call.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    /// An integer, such as `2` or `144`.
    Integer(Integer),

    /// A non-integral rational number, such as `1/2` or `-157/50`.
    ///
    /// Decimal literals are converted to their exact rational value. A [`Primary::Rational`] must
    /// never hold an integral value; constructors normalize those to [`Primary::Integer`].
    Rational(Rational),

    /// A variable, such as `x`, or a derivative reference, such as `y'`.
    Symbol(String),

    /// A function call, such as `sin(x)` or `f(x, y)`.
    Call(String, Vec<SymExpr>),
}

impl Primary {
    /// Creates a numeric [`Primary`] from a rational, normalizing integral values to
    /// [`Primary::Integer`].
    pub fn num(value: Rational) -> Self {
        if value.is_integer() {
            Self::Integer(value.into_numer_denom().0)
        } else {
            Self::Rational(value)
        }
    }

    /// If the primary is numeric, returns its value as a [`Rational`].
    pub fn to_rational(&self) -> Option<Rational> {
        match self {
            Self::Integer(int) => Some(Rational::from(int.clone())),
            Self::Rational(rat) => Some(rat.clone()),
            _ => None,
        }
    }
}

impl std::fmt::Display for Primary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(num) => write!(f, "{}", num),
            Self::Rational(num) => write!(f, "{}", num),
            Self::Symbol(sym) => write!(f, "{}", sym),
            Self::Call(name, args) => {
                write!(f, "{}(", name)?;
                let mut iter = args.iter();
                if let Some(arg) = iter.next() {
                    write!(f, "{}", arg)?;
                    for arg in iter {
                        write!(f, ", {}", arg)?;
                    }
                }
                write!(f, ")")
            },
        }
    }
}

impl Eq for Primary {}

impl std::hash::Hash for Primary {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Self::Integer(int) => int.hash(state),
            Self::Rational(rat) => {
                rat.numer().hash(state);
                rat.denom().hash(state);
            },
            Self::Symbol(sym) => sym.hash(state),
            Self::Call(name, args) => {
                name.hash(state);
                args.hash(state);
            }
        }
    }
}

/// Adds two [`Primary`]s together. If both are numeric, the numbers are added exactly. Otherwise,
/// the two [`Primary`]s are wrapped in an [`SymExpr::Add`].
impl Add<Primary> for Primary {
    type Output = SymExpr;

    fn add(self, rhs: Self) -> Self::Output {
        match (self.to_rational(), rhs.to_rational()) {
            (Some(lhs), Some(rhs)) => SymExpr::Primary(Primary::num(lhs + rhs)),
            _ => SymExpr::Add(vec![
                SymExpr::Primary(self),
                SymExpr::Primary(rhs),
            ]),
        }
    }
}

/// Multiplies two [`Primary`]s together. If both are numeric, the numbers are multiplied exactly.
/// Otherwise, the two [`Primary`]s are wrapped in an [`SymExpr::Mul`].
impl Mul<Primary> for Primary {
    type Output = SymExpr;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self.to_rational(), rhs.to_rational()) {
            (Some(lhs), Some(rhs)) => SymExpr::Primary(Primary::num(lhs * rhs)),
            _ => SymExpr::Mul(vec![
                SymExpr::Primary(self),
                SymExpr::Primary(rhs),
            ]),
        }
    }
}

/// A mathematical expression with information about its terms and factors.
///
/// This type should be distinguished from the [`taylor_parser::parser::expr::Expr`] type, which
/// is produced by `taylor_parser`. The main difference is that this type **flattens** out the
/// tree structure. For example, the expression `x + (y + z)` would be represented internally as a
/// single [`SymExpr::Add`] node with _three_ children, `x`, `y`, and `z`.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, Eq, Hash)]
pub enum SymExpr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<SymExpr>),

    /// Multiple factors multiplied together.
    Mul(Vec<SymExpr>),

    /// An expression raised to a power.
    Exp(Box<SymExpr>, Box<SymExpr>),
}

impl std::fmt::Display for SymExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Add(terms) => {
                let mut iter = terms.iter();
                if let Some(term) = iter.next() {
                    write!(f, "{}", term)?;
                    for term in iter {
                        write!(f, " + {}", term)?;
                    }
                }
                Ok(())
            },
            Self::Mul(factors) => {
                let mut iter = factors.iter();
                if let Some(factor) = iter.next() {
                    if matches!(factor.cmp_precedence(self), Ordering::Less) {
                        write!(f, "({})", factor)?;
                    } else {
                        write!(f, "{}", factor)?;
                    }
                    for factor in iter {
                        if matches!(factor.cmp_precedence(self), Ordering::Less) {
                            write!(f, " * ({})", factor)?;
                        } else {
                            write!(f, " * {}", factor)?;
                        }
                    }
                }
                Ok(())
            },
            Self::Exp(base, exp) => {
                if matches!(base.cmp_precedence(self), Ordering::Less) || base.is_rational() {
                    write!(f, "({})", base)?;
                } else {
                    write!(f, "{}", base)?;
                }
                write!(f, "^")?;
                if matches!(exp.cmp_precedence(self), Ordering::Less) || exp.is_rational() {
                    write!(f, "({})", exp)?;
                } else {
                    write!(f, "{}", exp)?;
                }
                Ok(())
            },
        }
    }
}

impl SymExpr {
    /// Returns the expression representing the integer zero.
    pub fn zero() -> Self {
        Self::Primary(Primary::Integer(int(0)))
    }

    /// Returns the expression representing the integer one.
    pub fn one() -> Self {
        Self::Primary(Primary::Integer(int(1)))
    }

    /// Returns the precedence of the expression.
    fn precedence(&self) -> Option<Precedence> {
        match self {
            Self::Primary(_) => None,
            Self::Add(_) => Some(BinOpKind::Add.precedence()),
            Self::Mul(_) => Some(BinOpKind::Mul.precedence()),
            Self::Exp(_, _) => Some(BinOpKind::Exp.precedence()),
        }
    }

    /// Returns the ordering of this expression's precedence relative to the given expression.
    ///
    /// This is used to determine if parentheses are needed around the given expression when
    /// printing.
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        #[derive(PartialEq, Eq)]
        enum PrecedenceExt {
            Primary,
            Op(Precedence),
        }

        impl PartialOrd for PrecedenceExt {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for PrecedenceExt {
            fn cmp(&self, other: &Self) -> Ordering {
                match (self, other) {
                    (Self::Primary, Self::Primary) => Ordering::Equal,
                    (Self::Primary, Self::Op(_)) => Ordering::Greater,
                    (Self::Op(_), Self::Primary) => Ordering::Less,
                    (Self::Op(lhs), Self::Op(rhs)) => {
                        lhs.partial_cmp(rhs).unwrap_or(Ordering::Equal)
                    },
                }
            }
        }

        let lhs = self.precedence().map(PrecedenceExt::Op).unwrap_or(PrecedenceExt::Primary);
        let rhs = other.precedence().map(PrecedenceExt::Op).unwrap_or(PrecedenceExt::Primary);
        lhs.cmp(&rhs)
    }

    /// If the expression is a [`Primary::Integer`], returns a reference to the contained integer.
    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Self::Primary(Primary::Integer(int)) => Some(int),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Integer`], returns the contained integer.
    pub fn into_integer(self) -> Option<Integer> {
        match self {
            Self::Primary(Primary::Integer(int)) => Some(int),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Primary::Integer`].
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Primary(Primary::Integer(_)))
    }

    /// Returns true if the expression is a [`Primary::Rational`].
    pub fn is_rational(&self) -> bool {
        matches!(self, Self::Primary(Primary::Rational(_)))
    }

    /// If the expression is a numeric [`Primary`], returns its value as a [`Rational`].
    pub fn as_number(&self) -> Option<Rational> {
        match self {
            Self::Primary(primary) => primary.to_rational(),
            _ => None,
        }
    }

    /// Creates an expression from an exact rational value, normalizing integral values to
    /// [`Primary::Integer`].
    pub fn from_number(value: Rational) -> Self {
        Self::Primary(Primary::num(value))
    }

    /// Returns true if the expression is the integer zero.
    pub fn is_zero(&self) -> bool {
        self.as_integer().map(|n| n.is_zero()).unwrap_or(false)
    }

    /// Returns true if the expression is the integer one.
    pub fn is_one(&self) -> bool {
        self.as_integer().map(|n| n == &1).unwrap_or(false)
    }

    /// If the expression is a [`Primary::Symbol`], returns a reference to the contained symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// Calls the given function with every symbol occurring in the expression tree.
    pub fn visit_symbols<'a>(&'a self, f: &mut impl FnMut(&'a str)) {
        match self {
            Self::Primary(Primary::Symbol(sym)) => f(sym),
            Self::Primary(Primary::Call(_, args)) => {
                for arg in args {
                    arg.visit_symbols(f);
                }
            },
            Self::Primary(_) => {},
            Self::Add(children) | Self::Mul(children) => {
                for child in children {
                    child.visit_symbols(f);
                }
            },
            Self::Exp(base, exp) => {
                base.visit_symbols(f);
                exp.visit_symbols(f);
            },
        }
    }

    /// Returns true if any node in the expression tree is the given symbol.
    pub fn contains_symbol(&self, name: &str) -> bool {
        let mut found = false;
        self.visit_symbols(&mut |sym| found |= sym == name);
        found
    }

    /// Returns a copy of the expression with every occurrence of the given symbol replaced by
    /// the given expression. No simplification is done.
    pub fn substitute(&self, symbol: &str, replacement: &SymExpr) -> SymExpr {
        match self {
            Self::Primary(Primary::Symbol(sym)) if sym == symbol => replacement.clone(),
            Self::Primary(Primary::Call(name, args)) => Self::Primary(Primary::Call(
                name.clone(),
                args.iter().map(|arg| arg.substitute(symbol, replacement)).collect(),
            )),
            Self::Primary(primary) => Self::Primary(primary.clone()),
            Self::Add(terms) => Self::Add(
                terms.iter().map(|term| term.substitute(symbol, replacement)).collect(),
            ),
            Self::Mul(factors) => Self::Mul(
                factors.iter().map(|factor| factor.substitute(symbol, replacement)).collect(),
            ),
            Self::Exp(base, exp) => Self::Exp(
                Box::new(base.substitute(symbol, replacement)),
                Box::new(exp.substitute(symbol, replacement)),
            ),
        }
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in an [`SymExpr::Add`] with zero / one term, or an
    /// [`SymExpr::Mul`] with zero / one factor. This function checks for these cases and
    /// simplifies the expression into the single term / factor, or an [`SymExpr::Primary`]
    /// containing the integer 0 or 1.
    pub(crate) fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => {
                if terms.is_empty() {
                    Self::zero()
                } else if terms.len() == 1 {
                    terms.remove(0)
                } else {
                    Self::Add(terms)
                }
            },
            Self::Mul(mut factors) => {
                if factors.is_empty() {
                    Self::one()
                } else if factors.len() == 1 {
                    factors.remove(0)
                } else {
                    Self::Mul(factors)
                }
            },
            _ => self,
        }
    }

}

/// Checks if two expressions are **strictly** equal.
///
/// For more information about strict equality, see the [module-level documentation](self).
impl PartialEq for SymExpr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => {
                lhs.len() == rhs.len()
                    && lhs.iter().all(|lhs| rhs.contains(lhs))
            },
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            _ => false,
        }
    }
}

impl From<AstExpr> for SymExpr {
    fn from(expr: AstExpr) -> Self {
        match expr {
            AstExpr::Literal(literal) => match literal {
                Literal::Integer(int) => Self::Primary(Primary::Integer(int_from_str(&int.value))),
                Literal::Float(float) => Self::Primary(Primary::num(rat_from_str(&float.value))),
                Literal::Symbol(sym) => Self::Primary(Primary::Symbol(sym.name)),
            },
            AstExpr::Paren(paren) => Self::from(*paren.expr),
            AstExpr::Call(call) => {
                let args = call.args.into_iter().map(Self::from).collect();
                Self::Primary(Primary::Call(call.name.name, args))
            },
            AstExpr::Unary(unary) => {
                match unary.op.kind {
                    // treat this as -1 * rhs
                    UnaryOpKind::Neg => Self::from(*unary.operand).neg(),
                }
            },
            AstExpr::Binary(bin) => {
                match bin.op.kind {
                    BinOpKind::Exp => {
                        Self::Exp(Box::new(Self::from(*bin.lhs)), Box::new(Self::from(*bin.rhs)))
                    },
                    BinOpKind::Mul => {
                        // iteratively flatten binary expressions into factors
                        let mut factors = Self::Mul(Vec::new());
                        let mut stack = vec![AstExpr::Binary(bin)];
                        while let Some(node) = stack.pop() {
                            match node {
                                AstExpr::Binary(bin) if bin.op.kind == BinOpKind::Mul => {
                                    stack.push(*bin.lhs);
                                    stack.push(*bin.rhs);
                                },
                                node => {
                                    // if the generated expression is another `SymExpr::Mul`, add
                                    // its factors to the current list of factors instead
                                    // we call this "flattening" the expression
                                    factors *= Self::from(node);
                                },
                            }
                        }
                        factors.downgrade()
                    },
                    BinOpKind::Div => {
                        // treat this as lhs * rhs^-1
                        make_fraction(
                            Self::from(*bin.lhs),
                            Self::from(*bin.rhs),
                        )
                    },
                    BinOpKind::Add => {
                        // iteratively flatten binary expressions into terms
                        let mut terms = Self::Add(Vec::new());
                        let mut stack = vec![AstExpr::Binary(bin)];
                        while let Some(node) = stack.pop() {
                            match node {
                                AstExpr::Binary(bin) if bin.op.kind == BinOpKind::Add => {
                                    stack.push(*bin.lhs);
                                    stack.push(*bin.rhs);
                                },
                                node => {
                                    // same flattening as multiplication
                                    terms += Self::from(node);
                                },
                            }
                        }
                        terms.downgrade()
                    },
                    BinOpKind::Sub => {
                        // treat this as lhs + -1 * rhs
                        Self::from(*bin.lhs) + Self::from(*bin.rhs).neg()
                    },
                }
            },
        }
    }
}

/// Adds two [`SymExpr`]s together. No simplification is done, except for the case where the
/// operands are a mix of [`Primary`] and / or [`SymExpr::Add`], in which case both are combined
/// in one list of terms (flattening).
impl Add for SymExpr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs + rhs,
            (Self::Add(mut terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
                Self::Add(terms)
            },
            (Self::Add(mut terms), other) | (other, Self::Add(mut terms)) => {
                terms.push(other);
                Self::Add(terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

/// Adds two [`SymExpr`]s together. The behavior is the same as [`Add`], except we can reuse the
/// allocated memory of `self` if possible.
impl AddAssign for SymExpr {
    fn add_assign(&mut self, rhs: Self) {
        match (self, rhs) {
            (Self::Add(terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
            },
            (Self::Add(terms), other) => {
                terms.push(other);
            },
            (lhs, rhs) => {
                let owned = std::mem::replace(lhs, Self::Add(Vec::new()));
                *lhs = owned + rhs;
            },
        }
    }
}

/// Multiplies two [`SymExpr`]s together. No simplification is done, except for the case where the
/// operands are a mix of [`Primary`] and / or [`SymExpr::Mul`], in which case both are combined
/// in one list of factors (flattening).
impl Mul for SymExpr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs * rhs,
            (Self::Mul(mut factors), Self::Mul(other)) => {
                factors.extend(other);
                Self::Mul(factors)
            },
            (Self::Mul(mut factors), other) | (other, Self::Mul(mut factors)) => {
                factors.push(other);
                Self::Mul(factors)
            },
            (lhs, rhs) => Self::Mul(vec![lhs, rhs]),
        }
    }
}

impl MulAssign for SymExpr {
    fn mul_assign(&mut self, rhs: Self) {
        match (self, rhs) {
            (Self::Mul(factors), Self::Mul(rhs_factors)) => {
                factors.extend(rhs_factors);
            },
            (Self::Mul(factors), other) => {
                factors.push(other);
            },
            (lhs, rhs) => {
                let owned = std::mem::replace(lhs, Self::Mul(Vec::new()));
                *lhs = owned * rhs;
            },
        }
    }
}

/// Multiplies this expression by -1. No simplification is done, except for the case where the
/// expression is a numeric [`Primary`], in which case the number is negated.
impl Neg for SymExpr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Integer(int)) => Self::Primary(Primary::Integer(-int)),
            Self::Primary(Primary::Rational(rat)) => Self::Primary(Primary::Rational(-rat)),
            expr => Self::Primary(Primary::Integer(int(-1))) * expr,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::primitive::rat;
    use taylor_parser::Parser;
    use taylor_parser::parser::expr::Expr as AstExpr;
    use pretty_assertions::assert_eq;
    use super::*;

    /// Parse the given expression and return the [`SymExpr`] representation.
    fn parse_expr(input: &str) -> SymExpr {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        SymExpr::from(expr)
    }

    #[test]
    fn strict_equality() {
        let a = parse_expr("2(x + (y - 5))");
        let b = parse_expr("(y - 5 + x) * 2");
        assert_eq!(a, b);
    }

    #[test]
    fn strict_equality_2() {
        // these are NOT strictly equal (but are semantically equal)
        // `b` is a distributed version of `a`
        let a = parse_expr("2(x + (y - 5))");
        let b = parse_expr("2x + 2y - 10");
        assert_ne!(a, b);
    }

    #[test]
    fn simple_expr() {
        let expr = parse_expr("x^2 + 5x + 6");

        // NOTE: the order of the terms and factors is not guaranteed, but the output is still
        // semantically correct
        assert_eq!(expr, SymExpr::Add(vec![
            // 6
            SymExpr::Primary(Primary::Integer(int(6))),
            // + 5x
            SymExpr::Mul(vec![
                SymExpr::Primary(Primary::Integer(int(5))),
                SymExpr::Primary(Primary::Symbol(String::from("x"))),
            ]),
            // + x^2
            SymExpr::Exp(
                Box::new(SymExpr::Primary(Primary::Symbol(String::from("x")))),
                Box::new(SymExpr::Primary(Primary::Integer(int(2)))),
            ),
        ]));
    }

    #[test]
    fn numeric_fraction_folds() {
        // numeric division folds to an exact rational
        let expr = parse_expr("2/15");
        assert_eq!(expr, SymExpr::Primary(Primary::Rational(rat((2, 15)))));
    }

    #[test]
    fn decimal_literal_is_exact() {
        let expr = parse_expr("3.14");
        assert_eq!(expr, SymExpr::Primary(Primary::Rational(rat((157, 50)))));
    }

    #[test]
    fn integral_rational_downgrades() {
        let expr = parse_expr("6/3");
        assert_eq!(expr, SymExpr::Primary(Primary::Integer(int(2))));
    }

    #[test]
    fn symbolic_fraction_stays_symbolic() {
        let expr = parse_expr("x/3");
        assert_eq!(expr, SymExpr::Mul(vec![
            SymExpr::Primary(Primary::Symbol(String::from("x"))),
            SymExpr::Exp(
                Box::new(SymExpr::Primary(Primary::Integer(int(3)))),
                Box::new(SymExpr::Primary(Primary::Integer(int(-1)))),
            ),
        ]));
    }

    #[test]
    fn derivative_symbols() {
        let expr = parse_expr("y'' + y' + y");
        assert_eq!(expr, SymExpr::Add(vec![
            SymExpr::Primary(Primary::Symbol(String::from("y"))),
            SymExpr::Primary(Primary::Symbol(String::from("y'"))),
            SymExpr::Primary(Primary::Symbol(String::from("y''"))),
        ]));
    }

    #[test]
    fn contains_symbol() {
        let expr = parse_expr("x + sin(y) * 3");
        assert!(expr.contains_symbol("x"));
        assert!(expr.contains_symbol("y"));
        assert!(!expr.contains_symbol("z"));
    }

    #[test]
    fn fmt_expr() {
        // the order switches around a bit because of the way we traverse the tree during
        // conversion, but the output is still semantically correct
        let expr = parse_expr("1 + 2x");
        assert_eq!(expr.to_string(), "x * 2 + 1");
    }
}
