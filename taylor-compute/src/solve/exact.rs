//! The exact-solve fast path.
//!
//! Before running a recurrence, the solve entry points ask a [`ClosedFormSolver`] for a
//! closed-form solution. On success the closed form is expanded into the same
//! [`TruncatedSeries`] representation by repeated symbolic differentiation; on *any* failure —
//! no closed form found, or a coefficient that does not reduce to a constant — the caller falls
//! back to the matching recurrence solver. The two paths agree exactly for every input where
//! both succeed, which is the correctness oracle used by the comparison tooling built on top of
//! this engine.

use crate::symbolic::derivative::derivative;
use crate::symbolic::expr::{Primary, SymExpr};
use crate::symbolic::simplify::{fraction::make_fraction, simplify};
use crate::series::{substitute, SeriesEnv, TruncatedSeries};
use crate::primitive::{factorial, rat};
use rug::Rational;
use std::ops::Neg;
use super::error::NoExactSolution;
use super::{FirstOrderOde, OdeSpec};

/// A closed-form solution, matching the shape of the ODE specification it solves.
#[derive(Debug, Clone, PartialEq)]
pub enum ClosedForm {
    /// The solution of a scalar equation.
    Scalar(SymExpr),

    /// The paired solutions of a 2x2 system.
    Pair(SymExpr, SymExpr),
}

/// An external solver that attempts a closed-form solution of an ODE.
///
/// Implementations are consulted as an optional fast path only: returning
/// [`NoExactSolution`] for everything is always acceptable, since the recurrence solvers handle
/// every analytic right-hand side.
pub trait ClosedFormSolver {
    /// Attempts to solve the given specification in closed form.
    fn solve(&self, spec: &OdeSpec) -> Result<ClosedForm, NoExactSolution>;
}

/// The built-in closed-form solver.
///
/// It covers the first-order classes whose solutions the series expander is guaranteed to
/// process: pure quadrature (`y' = f(x)` with polynomial `f`) and linear constant-coefficient
/// equations (`y' = a*y + b`). Everything else is left to the recurrence. Extending the solver
/// never changes results, only which path produces them.
pub struct RuleSolver;

impl ClosedFormSolver for RuleSolver {
    fn solve(&self, spec: &OdeSpec) -> Result<ClosedForm, NoExactSolution> {
        match spec {
            OdeSpec::FirstOrder(ode) => {
                quadrature(ode)
                    .or_else(|_| linear_constant(ode))
                    .map(ClosedForm::Scalar)
            },
            // an m-th-order specification with m = 1 is a first-order equation in disguise
            OdeSpec::NthOrder(ode) if ode.order == 1 => {
                let init = ode.init.get(&0).ok_or(NoExactSolution)?;
                let first_order = FirstOrderOde {
                    var: ode.var.clone(),
                    func: ode.func.clone(),
                    rhs: ode.rhs.clone(),
                    init: init.clone(),
                    center: ode.center.clone(),
                    truncation: ode.truncation,
                };
                self.solve(&OdeSpec::FirstOrder(first_order))
            },
            _ => Err(NoExactSolution),
        }
    }
}

/// `y' = f(x)` with `f` free of the unknown: integrate the polynomial expansion of `f` term by
/// term.
fn quadrature(ode: &FirstOrderOde) -> Result<SymExpr, NoExactSolution> {
    if ode.rhs.contains_symbol(&ode.func) {
        return Err(NoExactSolution);
    }

    let degree = poly_degree(&ode.rhs, &ode.var).ok_or(NoExactSolution)?;
    let center = simplify(&ode.center);
    let env = SeriesEnv::new(&ode.var, &center);
    let rhs_coeffs = substitute::expand_truncated(&ode.rhs, &env, degree)
        .map_err(|_| NoExactSolution)?;

    // y = y0 + Σ c_k (x - x0)^(k+1) / (k+1)
    let mut coeffs = Vec::with_capacity(degree + 2);
    coeffs.push(simplify(&ode.init));
    for (k, coeff) in rhs_coeffs.into_iter().enumerate() {
        coeffs.push(simplify(&make_fraction(
            coeff,
            SymExpr::from_number(rat(k as u32 + 1)),
        )));
    }

    Ok(TruncatedSeries::new(ode.var.clone(), center, coeffs).as_expr())
}

/// `y' = a*y + b` with constant `a != 0` and `b`: the closed form is
/// `(y0 + b/a) * e^(a*(x - x0)) - b/a`.
fn linear_constant(ode: &FirstOrderOde) -> Result<SymExpr, NoExactSolution> {
    let unknown = SymExpr::Primary(Primary::Symbol(ode.func.clone()));

    let a = simplify(&derivative(&ode.rhs, &ode.func).map_err(|_| NoExactSolution)?);
    if a.is_zero() || a.contains_symbol(&ode.var) || a.contains_symbol(&ode.func) {
        return Err(NoExactSolution);
    }

    let b = simplify(&(ode.rhs.clone() + (a.clone() * unknown).neg()));
    if b.contains_symbol(&ode.var) || b.contains_symbol(&ode.func) {
        return Err(NoExactSolution);
    }

    let center = simplify(&ode.center);
    let shift = simplify(&make_fraction(b, a.clone()));
    let amplitude = simplify(&(simplify(&ode.init) + shift.clone()));

    let offset = SymExpr::Primary(Primary::Symbol(ode.var.clone())) + center.neg();
    let exponential = SymExpr::Primary(Primary::Call("exp".to_string(), vec![a * offset]));

    Ok(amplitude * exponential + shift.neg())
}

/// A syntactic degree bound of the expression as a polynomial in the given variable, or [`None`]
/// if it is not a polynomial.
fn poly_degree(expr: &SymExpr, var: &str) -> Option<usize> {
    match expr {
        SymExpr::Primary(Primary::Symbol(sym)) if sym == var => Some(1),
        SymExpr::Primary(Primary::Call(_, args)) => {
            // calls are opaque: constant if their arguments are
            if args.iter().all(|arg| !arg.contains_symbol(var)) {
                Some(0)
            } else {
                None
            }
        },
        SymExpr::Primary(_) => Some(0),
        SymExpr::Add(terms) => terms.iter()
            .map(|term| poly_degree(term, var))
            .try_fold(0, |acc, degree| degree.map(|d| acc.max(d))),
        SymExpr::Mul(factors) => factors.iter()
            .map(|factor| poly_degree(factor, var))
            .try_fold(0, |acc, degree| degree.map(|d| acc + d)),
        SymExpr::Exp(base, exponent) => {
            if exponent.contains_symbol(var) {
                return None;
            }
            let base_degree = poly_degree(base, var)?;
            if base_degree == 0 {
                return Some(0);
            }
            let power = exponent.as_integer()?.to_u32()?;
            Some(base_degree * power as usize)
        },
    }
}

/// Expands a closed-form expression into a truncated series about the center by repeated
/// symbolic differentiation and evaluation: `a_k = f^(k)(x0) / k!`.
///
/// Fails if a derivative cannot be computed symbolically or a coefficient does not reduce to a
/// constant; the caller then falls back to the recurrence.
pub fn expand_closed_form(
    expr: &SymExpr,
    var: &str,
    center: &SymExpr,
    order: usize,
) -> Result<TruncatedSeries, NoExactSolution> {
    let mut coeffs = Vec::with_capacity(order + 1);
    let mut current = expr.clone();

    for k in 0..=order {
        if k > 0 {
            current = derivative(&current, var).map_err(|_| NoExactSolution)?;
        }

        let value = simplify(&current.substitute(var, center));
        if !is_constant(&value, var) {
            return Err(NoExactSolution);
        }

        coeffs.push(simplify(&make_fraction(
            value,
            SymExpr::from_number(Rational::from(factorial(k))),
        )));
    }

    Ok(TruncatedSeries::new(var, center.clone(), coeffs))
}

/// A coefficient is constant when it no longer references the variable and every function call
/// has been folded away (a residual like `sin(1)` has no exact rational value).
fn is_constant(expr: &SymExpr, var: &str) -> bool {
    !expr.contains_symbol(var) && !contains_call(expr)
}

fn contains_call(expr: &SymExpr) -> bool {
    match expr {
        SymExpr::Primary(Primary::Call(..)) => true,
        SymExpr::Primary(_) => false,
        SymExpr::Add(children) | SymExpr::Mul(children) => children.iter().any(contains_call),
        SymExpr::Exp(base, exp) => contains_call(base) || contains_call(exp),
    }
}

#[cfg(test)]
mod tests {
    use taylor_parser::Parser;
    use taylor_parser::parser::expr::Expr as AstExpr;
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse_expr(input: &str) -> SymExpr {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        SymExpr::from(expr)
    }

    #[test]
    fn polynomial_degrees() {
        assert_eq!(poly_degree(&parse_expr("x^2 + 3x + 1"), "x"), Some(2));
        assert_eq!(poly_degree(&parse_expr("(x^2 + 1)^3"), "x"), Some(6));
        assert_eq!(poly_degree(&parse_expr("y + 2"), "x"), Some(0));
        assert_eq!(poly_degree(&parse_expr("sin(x)"), "x"), None);
        assert_eq!(poly_degree(&parse_expr("x^-1"), "x"), None);
    }

    #[test]
    fn expand_polynomial_closed_form() {
        // the Taylor expansion of a polynomial about 0 is the polynomial itself
        let expr = parse_expr("1 + 2x + 3x^2");
        let center = SymExpr::zero();
        let series = expand_closed_form(&expr, "x", &center, 3).unwrap();
        assert_eq!(series.coeffs(), &[
            parse_expr("1"),
            parse_expr("2"),
            parse_expr("3"),
            parse_expr("0"),
        ]);
    }

    #[test]
    fn expand_exponential_closed_form() {
        let expr = parse_expr("exp(2x)");
        let center = SymExpr::zero();
        let series = expand_closed_form(&expr, "x", &center, 3).unwrap();
        assert_eq!(series.coeffs(), &[
            parse_expr("1"),
            parse_expr("2"),
            parse_expr("2"),
            parse_expr("4/3"),
        ]);
    }

    #[test]
    fn residual_call_reports_failure() {
        // sin(1 + x) at 0 leaves sin(1), which has no exact value
        let expr = parse_expr("sin(1 + x)");
        let center = SymExpr::zero();
        assert_eq!(expand_closed_form(&expr, "x", &center, 2), Err(NoExactSolution));
    }
}
