//! Truncated power series with exact coefficients.
//!
//! A [`TruncatedSeries`] represents `Σ a_k (x - x0)^k` for `k = 0..=N`: a polynomial
//! approximation of a function expanded about the point `x0`, exact in every coefficient up to
//! the truncation order `N`. Coefficients are simplified [`SymExpr`]s — arbitrary-precision
//! rationals in the common case, or expressions over symbolic constants such as `i`.
//!
//! Series equality is semantic, not syntactic: two series (or a series and a reference
//! expression) are considered equal iff the simplified difference of their reconstructed sums is
//! the zero expression.

pub mod substitute;

use crate::primitive::{int, rat};
use crate::symbolic::expr::{Primary, SymExpr};
use crate::symbolic::simplify::simplify;
use std::ops::Neg;

pub use substitute::{SeriesEnv, SubstitutionFailure};

/// A coefficient lookup past the truncation order.
///
/// The engine guarantees exactness of all coefficients of degree ≤ N and makes no claim about
/// behavior beyond N, so asking for a higher degree is an error rather than a defaulted zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutOfRange {
    /// The requested degree.
    pub degree: usize,

    /// The truncation order of the series.
    pub order: usize,
}

impl std::fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "coefficient of degree {} requested from a series truncated at order {}",
            self.degree, self.order,
        )
    }
}

impl std::error::Error for OutOfRange {}

/// A truncated power series: `N + 1` exact coefficients indexed by degree, expanded about a
/// fixed center.
///
/// A series is built strictly degree-by-degree by the solvers in [`crate::solve`] and is
/// immutable afterwards. The degree-0 coefficient is always the function's value at the center
/// (the initial condition); the recurrence never overwrites it.
#[derive(Debug, Clone, PartialEq)]
pub struct TruncatedSeries {
    /// The name of the independent variable.
    var: String,

    /// The expansion point `x0`.
    center: SymExpr,

    /// The coefficients `a_0..a_N`, indexed by degree.
    coeffs: Vec<SymExpr>,
}

impl TruncatedSeries {
    /// Creates a series from its coefficients. The vector must hold `N + 1` coefficients for a
    /// series of truncation order `N`, so it must not be empty.
    pub fn new(var: impl Into<String>, center: SymExpr, coeffs: Vec<SymExpr>) -> Self {
        debug_assert!(!coeffs.is_empty(), "a series holds at least its degree-0 coefficient");
        Self {
            var: var.into(),
            center,
            coeffs,
        }
    }

    /// The name of the independent variable.
    pub fn var(&self) -> &str {
        &self.var
    }

    /// The expansion point.
    pub fn center(&self) -> &SymExpr {
        &self.center
    }

    /// The truncation order `N`.
    pub fn order(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Returns the coefficient of `(x - x0)^degree`, or [`OutOfRange`] if the degree exceeds the
    /// truncation order.
    pub fn coeff(&self, degree: usize) -> Result<&SymExpr, OutOfRange> {
        self.coeffs.get(degree).ok_or(OutOfRange {
            degree,
            order: self.order(),
        })
    }

    /// All coefficients, indexed by degree.
    pub fn coeffs(&self) -> &[SymExpr] {
        &self.coeffs
    }

    /// Returns a copy of this series truncated to the (lower or equal) order `n`.
    pub fn truncate(&self, n: usize) -> Self {
        Self {
            var: self.var.clone(),
            center: self.center.clone(),
            coeffs: self.coeffs[..=n.min(self.order())].to_vec(),
        }
    }

    /// Reconstructs the series as a single expression `Σ a_k (x - x0)^k`.
    pub fn as_expr(&self) -> SymExpr {
        let offset = if self.center.is_zero() {
            SymExpr::Primary(Primary::Symbol(self.var.clone()))
        } else {
            SymExpr::Primary(Primary::Symbol(self.var.clone())) + self.center.clone().neg()
        };

        let mut terms = Vec::new();
        for (degree, coeff) in self.coeffs.iter().enumerate() {
            if coeff.is_zero() {
                continue;
            }

            let term = match degree {
                0 => coeff.clone(),
                1 if coeff.is_one() => offset.clone(),
                1 => coeff.clone() * offset.clone(),
                _ => {
                    let power = SymExpr::Exp(
                        Box::new(offset.clone()),
                        Box::new(SymExpr::Primary(Primary::Integer(int(degree as u32)))),
                    );
                    if coeff.is_one() {
                        power
                    } else {
                        coeff.clone() * power
                    }
                },
            };
            terms.push(term);
        }

        SymExpr::Add(terms).downgrade()
    }

    /// Differentiates the series term by term: `d_k = (k+1) a_(k+1)`.
    ///
    /// The truncation order drops by one, since nothing is known about the coefficient the last
    /// term would need. Differentiating a degree-0 series yields the zero series of order 0.
    pub fn differentiate(&self) -> Self {
        let coeffs = if self.order() == 0 {
            vec![SymExpr::zero()]
        } else {
            self.coeffs[1..]
                .iter()
                .enumerate()
                .map(|(k, coeff)| {
                    simplify(&(SymExpr::from_number(rat(k as u32 + 1)) * coeff.clone()))
                })
                .collect()
        };

        Self {
            var: self.var.clone(),
            center: self.center.clone(),
            coeffs,
        }
    }

    /// Returns the simplified difference between this series and a reference expression.
    ///
    /// The reference must be a polynomial (or simplify to one); a zero result means the series
    /// and the reference agree exactly.
    pub fn difference_from(&self, reference: &SymExpr) -> SymExpr {
        simplify(&(self.as_expr() + reference.clone().neg()))
    }

    /// Returns true iff this series is semantically equal to the reference expression.
    pub fn equivalent_to(&self, reference: &SymExpr) -> bool {
        self.difference_from(reference).is_zero()
    }

    /// Returns the simplified difference between two series of the same variable and center.
    pub fn difference(&self, other: &TruncatedSeries) -> SymExpr {
        self.difference_from(&other.as_expr())
    }
}

impl std::fmt::Display for TruncatedSeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_expr())
    }
}

#[cfg(test)]
mod tests {
    use crate::primitive::{int, rat};
    use crate::symbolic::expr::{Primary, SymExpr};
    use taylor_parser::Parser;
    use taylor_parser::parser::expr::Expr as AstExpr;
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse_expr(input: &str) -> SymExpr {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        SymExpr::from(expr)
    }

    fn num(n: i32) -> SymExpr {
        SymExpr::Primary(Primary::Integer(int(n)))
    }

    /// `1 + 2x + 3x^2` about 0.
    fn sample() -> TruncatedSeries {
        TruncatedSeries::new("x", SymExpr::zero(), vec![num(1), num(2), num(3)])
    }

    #[test]
    fn coefficient_lookup() {
        let series = sample();
        assert_eq!(series.order(), 2);
        assert_eq!(series.coeff(0).unwrap(), &num(1));
        assert_eq!(series.coeff(2).unwrap(), &num(3));
        assert_eq!(series.coeff(3), Err(OutOfRange { degree: 3, order: 2 }));
    }

    #[test]
    fn reconstruction() {
        let series = sample();
        assert!(series.equivalent_to(&parse_expr("3x^2 + 2x + 1")));
        assert!(!series.equivalent_to(&parse_expr("3x^2 + 2x")));
    }

    #[test]
    fn reconstruction_at_nonzero_center() {
        // 2 + (x - 1)^2 about 1
        let series = TruncatedSeries::new("x", num(1), vec![num(2), num(0), num(1)]);
        assert!(series.equivalent_to(&parse_expr("x^2 - 2x + 3")));
    }

    #[test]
    fn termwise_derivative() {
        let series = sample();
        let derivative = series.differentiate();
        assert_eq!(derivative.order(), 1);
        assert_eq!(derivative.coeff(0).unwrap(), &num(2));
        assert_eq!(derivative.coeff(1).unwrap(), &num(6));
    }

    #[test]
    fn derivative_of_constant_series() {
        let series = TruncatedSeries::new("x", SymExpr::zero(), vec![num(7)]);
        let derivative = series.differentiate();
        assert_eq!(derivative.order(), 0);
        assert_eq!(derivative.coeff(0).unwrap(), &SymExpr::zero());
    }

    #[test]
    fn truncate_keeps_prefix() {
        let series = sample();
        let shorter = series.truncate(1);
        assert_eq!(shorter.order(), 1);
        assert_eq!(shorter.coeff(0).unwrap(), &num(1));
        assert_eq!(shorter.coeff(1).unwrap(), &num(2));
    }

    #[test]
    fn symbolic_coefficients() {
        // c + c*x: reconstruction keeps the symbolic constant
        let c = SymExpr::Primary(Primary::Symbol("c".to_string()));
        let series = TruncatedSeries::new("x", SymExpr::zero(), vec![c.clone(), c]);
        assert!(series.equivalent_to(&parse_expr("c * (1 + x)")));
    }

    #[test]
    fn series_difference() {
        let a = sample();
        let b = TruncatedSeries::new("x", SymExpr::zero(), vec![num(1), num(2), num(4)]);
        assert!(a.difference(&a.clone()).is_zero());

        let diff = a.difference(&b);
        assert_eq!(diff, parse_expr("-(x^2)"));
    }

    #[test]
    fn rational_coefficient_display() {
        let series = TruncatedSeries::new(
            "x",
            SymExpr::zero(),
            vec![num(1), num(1), SymExpr::Primary(Primary::Rational(rat((1, 2))))],
        );
        assert_eq!(series.to_string(), "1 + x + 1/2 * x^2");
    }
}
