//! Symbolic differentiation of expressions.
//!
//! The series engine differentiates in two places: term-by-term differentiation of a partial
//! series (for higher-order equations), and repeated differentiation of a closed-form solution
//! when expanding it into a Taylor series on the exact-solve fast path.

use super::expr::{Primary, SymExpr};

mod function;

/// Returns `true` if the given [`SymExpr`] is "clearly" zero. This is intended to clean up
/// results as they are built and is not mathematically rigorous.
fn is_trivially_zero(e: &SymExpr) -> bool {
    match e {
        SymExpr::Primary(Primary::Integer(i)) => i.is_zero(),
        SymExpr::Add(sum) => sum.iter().all(is_trivially_zero),
        SymExpr::Mul(mul) => mul.iter().any(is_trivially_zero),
        SymExpr::Exp(base, exponent) => is_trivially_zero(base) && !is_trivially_zero(exponent),
        _ => false,
    }
}

/// Returns `true` if the given [`SymExpr`] is "clearly" one. This is intended to clean up
/// results as they are built and is not mathematically rigorous.
fn is_trivially_unity(e: &SymExpr) -> bool {
    match e {
        SymExpr::Primary(Primary::Integer(i)) => *i == 1,
        SymExpr::Mul(exprs) => exprs.iter().all(is_trivially_unity),
        SymExpr::Exp(base, exponent) => is_trivially_zero(exponent) || is_trivially_unity(base),
        SymExpr::Add(exprs) => exprs.len() == 1 && is_trivially_unity(&exprs[0]),
        _ => false,
    }
}

/// Helper struct to build a product of expressions while applying basic simplification rules. If
/// any of the expressions are zero, the product is reduced to zero.
#[derive(Default)]
pub(super) struct MultBuilder(Vec<SymExpr>);

impl From<MultBuilder> for SymExpr {
    fn from(value: MultBuilder) -> Self {
        SymExpr::Mul(value.0).downgrade()
    }
}

impl MultBuilder {
    pub(super) fn mult(&mut self, e: SymExpr) {
        if is_trivially_zero(&e) || self.0.first().is_some_and(is_trivially_zero) {
            self.0 = vec![SymExpr::zero()];
            return;
        }

        if !is_trivially_unity(&e) {
            self.0.push(e)
        }
    }
}

/// Helper struct to build a summation of expressions while applying basic simplification rules.
/// Only non-zero expressions are added to the sum.
#[derive(Default)]
pub(super) struct SumBuilder(Vec<SymExpr>);

impl From<SumBuilder> for SymExpr {
    fn from(value: SumBuilder) -> Self {
        SymExpr::Add(value.0).downgrade()
    }
}

impl SumBuilder {
    pub(super) fn add(&mut self, e: SymExpr) {
        if !is_trivially_zero(&e) {
            self.0.push(e)
        }
    }
}

/// `(f + g)' = f' + g'`
fn sum_rule(exprs: &[SymExpr], with: &str) -> Result<SymExpr, SymbolicDerivativeError> {
    let mut sum = SumBuilder::default();
    for elem in exprs {
        sum.add(derivative(elem, with)?);
    }
    Ok(sum.into())
}

/// `(f * g * h)' = f' * g * h + f * g' * h + f * g * h'`
fn product_rule(product: &[SymExpr], with: &str) -> Result<SymExpr, SymbolicDerivativeError> {
    let mut outer_sum = SumBuilder::default();

    for derivative_index in 0..product.len() {
        let mut inner_mult = MultBuilder::default();
        for term_index in 0..product.len() {
            let term = if derivative_index == term_index {
                derivative(&product[derivative_index], with)?
            } else {
                product[term_index].clone()
            };

            inner_mult.mult(term);
        }

        outer_sum.add(inner_mult.into());
    }

    Ok(outer_sum.into())
}

/// `(f^r)' = r * f^(r-1) * f'` for a constant numeric exponent `r`
fn power_rule(base: &SymExpr, exponent: &SymExpr, with: &str) -> Result<SymExpr, SymbolicDerivativeError> {
    let Some(r) = exponent.as_number() else {
        // variables are allowed in the exponent only if the whole power is constant with respect
        // to `with`; we do not support symbolically computing `a^x` yet
        return Err(SymbolicDerivativeError::Unsupported);
    };

    let mut mult_group = MultBuilder::default();
    mult_group.mult(derivative(base, with)?);
    mult_group.mult(SymExpr::from_number(r.clone()));
    mult_group.mult(SymExpr::Exp(
        Box::new(base.clone()),
        Box::new(SymExpr::from_number(r - 1u32)),
    ));
    Ok(mult_group.into())
}

#[derive(Debug, PartialEq)]
pub enum SymbolicDerivativeError {
    /// The function may be differentiable, but we do not support symbolically computing it yet
    Unsupported,
}

/// Computes the derivative of the given expression with respect to the given variable. Returns
/// [`Err`] if the derivative could not be symbolically computed.
///
/// No simplification is applied beyond dropping trivially-zero terms and unit factors; callers
/// that need a canonical result should run the output through
/// [`simplify`](crate::symbolic::simplify).
pub fn derivative(f: &SymExpr, with: &str) -> Result<SymExpr, SymbolicDerivativeError> {
    if is_trivially_zero(f) {
        return Ok(SymExpr::zero())
    }
    let expr = match f {
        SymExpr::Primary(Primary::Integer(_)) | SymExpr::Primary(Primary::Rational(_)) => {
            Ok(SymExpr::zero())
        },
        SymExpr::Primary(Primary::Symbol(sym)) => {
            if sym == with {
                Ok(SymExpr::one())
            } else {
                Ok(SymExpr::zero())
            }
        }
        SymExpr::Primary(Primary::Call(func, args)) => {
            function::function_derivative(func, args, with)
        }
        SymExpr::Add(exprs) => sum_rule(exprs, with),
        SymExpr::Mul(exprs) => product_rule(exprs, with),
        SymExpr::Exp(base, exponent) => power_rule(base, exponent, with),
    };

    if expr.as_ref().is_ok_and(|e| !is_trivially_zero(e)) {
        expr
    } else {
        Ok(SymExpr::zero())
    }
}

/// Computes the `n`-th derivative of the given expression with respect to the given variable.
pub fn nth_derivative(f: &SymExpr, with: &str, n: usize) -> Result<SymExpr, SymbolicDerivativeError> {
    let mut expr = f.clone();
    for _ in 0..n {
        expr = derivative(&expr, with)?;
    }
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use crate::symbolic::simplify::simplify;
    use taylor_parser::Parser;
    use taylor_parser::parser::expr::Expr as AstExpr;
    use pretty_assertions::assert_eq;
    use std::ops::Neg;
    use super::*;

    /// Parse the given expression and return the [`SymExpr`] representation.
    fn parse_expr(input: &str) -> SymExpr {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        SymExpr::from(expr)
    }

    /// Asserts that the derivative of `input` with respect to `x` is semantically equal to
    /// `expected`.
    fn assert_derivative(input: &str, expected: &str) {
        let computed = derivative(&parse_expr(input), "x").unwrap();
        let difference = computed + parse_expr(expected).neg();
        assert_eq!(
            simplify(&difference),
            SymExpr::zero(),
            "d/dx [{}] should equal {}",
            input,
            expected,
        );
    }

    #[test]
    fn power_rule_polynomial() {
        assert_derivative("x^2 + x + 1", "2x + 1");
        assert_derivative("x^5", "5x^4");
        assert_derivative("3x^2 - 2x", "6x - 2");
    }

    #[test]
    fn constants() {
        assert_derivative("42", "0");
        assert_derivative("y", "0");
        assert_derivative("2/3", "0");
    }

    #[test]
    fn product_and_sum() {
        assert_derivative("x * x", "2x");
        assert_derivative("x^2 * x^3", "5x^4");
    }

    #[test]
    fn reciprocal_power() {
        // d/dx x^-1 = -x^-2
        assert_derivative("x^-1", "-(x^-2)");
    }

    #[test]
    fn chain_rule_trig() {
        assert_derivative("sin(x)", "cos(x)");
        assert_derivative("cos(x)", "-sin(x)");
        assert_derivative("sin(x^2)", "2x * cos(x^2)");
    }

    #[test]
    fn chain_rule_exp() {
        assert_derivative("exp(x)", "exp(x)");
        assert_derivative("exp(2x)", "2 * exp(2x)");
    }

    #[test]
    fn chain_rule_ln() {
        assert_derivative("ln(x)", "x^-1");
    }

    #[test]
    fn unknown_call_is_unsupported() {
        let result = derivative(&parse_expr("gamma(x)"), "x");
        assert_eq!(result, Err(SymbolicDerivativeError::Unsupported));
    }

    #[test]
    fn nth_derivatives() {
        let third = nth_derivative(&parse_expr("x^3"), "x", 3).unwrap();
        let difference = third + parse_expr("6").neg();
        assert_eq!(simplify(&difference), SymExpr::zero());
    }
}
