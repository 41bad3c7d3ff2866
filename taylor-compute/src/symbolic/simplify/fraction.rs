//! Tools to help manipulate fractions.

use crate::primitive::{int, rat};
use crate::symbolic::expr::{Primary, SymExpr};
use rug::Rational;

/// Create a [`SymExpr`] representing a fraction with the given numerator and denominator.
///
/// If both operands are numeric and the denominator is non-zero, the fraction is folded into its
/// exact rational value. Otherwise, the representation is a [`SymExpr::Mul`] containing two
/// factors: the numerator, and the denominator raised to the power of -1.
pub(crate) fn make_fraction(numerator: SymExpr, denominator: SymExpr) -> SymExpr {
    if let (Some(num), Some(den)) = (numerator.as_number(), denominator.as_number()) {
        if den != 0 {
            return SymExpr::from_number(num / den);
        }
    }

    numerator *
        SymExpr::Exp(
            Box::new(denominator),
            Box::new(SymExpr::Primary(Primary::Integer(int(-1)))),
        )
}

/// Splits an expression into its rational coefficient and the remaining symbolic factors.
///
/// All [`SymExpr`]s in this library are represented in some canonical form: numeric values are a
/// single [`Primary::Integer`] or [`Primary::Rational`], and a term with a coefficient is a
/// [`SymExpr::Mul`] whose factors include at most one numeric primary once simplified.
///
/// This function extracts that coefficient. If the expression is not [`SymExpr::Mul`], the
/// coefficient is 1 (or the value itself for a lone number):
///
/// - `5` -> `(5, 1)`
/// - `3*a` -> `(3, a)`
/// - `1/4*a*b` -> `(1/4, a*b)`
/// - `a` -> `(1, a)`
pub(crate) fn split_coefficient(expr: &SymExpr) -> (Rational, SymExpr) {
    match expr {
        SymExpr::Primary(primary) => match primary.to_rational() {
            Some(value) => (value, SymExpr::one()),
            None => (rat(1), expr.clone()),
        },
        SymExpr::Mul(factors) => {
            let mut coefficient = rat(1);
            let mut rest = Vec::with_capacity(factors.len());
            for factor in factors {
                match factor.as_number() {
                    Some(value) => coefficient *= value,
                    None => rest.push(factor.clone()),
                }
            }
            (coefficient, SymExpr::Mul(rest).downgrade())
        },
        _ => (rat(1), expr.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_fraction_folds() {
        let expr = make_fraction(
            SymExpr::Primary(Primary::Integer(int(2))),
            SymExpr::Primary(Primary::Integer(int(6))),
        );
        assert_eq!(expr, SymExpr::Primary(Primary::Rational(rat((1, 3)))));
    }

    #[test]
    fn symbolic_fraction_keeps_shape() {
        let expr = make_fraction(
            SymExpr::Primary(Primary::Symbol("a".to_string())),
            SymExpr::Primary(Primary::Integer(int(3))),
        );
        assert_eq!(expr, SymExpr::Mul(vec![
            SymExpr::Primary(Primary::Symbol("a".to_string())),
            SymExpr::Exp(
                Box::new(SymExpr::Primary(Primary::Integer(int(3)))),
                Box::new(SymExpr::Primary(Primary::Integer(int(-1)))),
            ),
        ]));
    }

    #[test]
    fn coefficient_of_term() {
        let term = SymExpr::Mul(vec![
            SymExpr::Primary(Primary::Rational(rat((1, 4)))),
            SymExpr::Primary(Primary::Symbol("a".to_string())),
        ]);
        let (coefficient, rest) = split_coefficient(&term);
        assert_eq!(coefficient, rat((1, 4)));
        assert_eq!(rest, SymExpr::Primary(Primary::Symbol("a".to_string())));
    }
}
