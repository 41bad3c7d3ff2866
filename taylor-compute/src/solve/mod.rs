//! Solve ODEs as truncated power series.
//!
//! Three entry points, one per equation shape:
//!
//! - [`solve_first_order`] for `y' = F(x, y)`,
//! - [`solve_nth_order`] for `y^(m) = G(x, y, y', ..., y^(m-1))`,
//! - [`solve_system2`] for the coupled pair `f' = F(x, f, g)`, `g' = G(x, f, g)`.
//!
//! Right-hand sides are expressions over the independent variable and the unknown-function
//! symbols; an m-th-order equation references derivatives with primed names (`y'`, `y''`).
//! Initial data, the expansion point, and the truncation order complete a request; the result is
//! a [`TruncatedSeries`] (or a pair), no matter which path produced it. The truncation order is
//! a `usize`, so a negative order is unrepresentable rather than checked at runtime.
//!
//! Each entry point first consults the [`exact`] fast path and falls back to the matching
//! [`recurrence`] solver when no usable closed form exists. The two paths are semantically
//! interchangeable for any input where both succeed.

pub mod error;
pub mod exact;
pub mod recurrence;

use crate::series::TruncatedSeries;
use crate::symbolic::expr::SymExpr;
use crate::symbolic::simplify::simplify;
use std::collections::BTreeMap;

pub use error::{NoExactSolution, SolveError};
pub use exact::{ClosedForm, ClosedFormSolver, RuleSolver};

/// A scalar first-order equation `y' = F(x, y)` with its initial value, expansion point, and
/// truncation order.
#[derive(Debug, Clone, PartialEq)]
pub struct FirstOrderOde {
    /// The independent variable.
    pub var: String,

    /// The unknown function symbol.
    pub func: String,

    /// The right-hand side `F(x, y)`.
    pub rhs: SymExpr,

    /// `y(x0)`.
    pub init: SymExpr,

    /// The expansion point `x0`.
    pub center: SymExpr,

    /// The truncation order `N`.
    pub truncation: usize,
}

/// A scalar m-th-order equation `y^(m) = G(x, y, y', ..., y^(m-1))`.
///
/// Derivatives are referenced by primed symbol names derived from the unknown's name; initial
/// conditions map each derivative order `k` in `0..m` to `y^(k)(x0)`. All `m` entries are
/// required — a missing entry is a specification error, not a defaulted zero.
#[derive(Debug, Clone, PartialEq)]
pub struct NthOrderOde {
    /// The independent variable.
    pub var: String,

    /// The unknown function symbol.
    pub func: String,

    /// The equation order `m >= 1`.
    pub order: usize,

    /// The right-hand side `G(x, y, y', ..., y^(m-1))`.
    pub rhs: SymExpr,

    /// `y^(k)(x0)` for each `k` in `0..m`.
    pub init: BTreeMap<usize, SymExpr>,

    /// The expansion point `x0`.
    pub center: SymExpr,

    /// The truncation order `N`.
    pub truncation: usize,
}

/// A coupled pair of first-order equations `f' = F(x, f, g)`, `g' = G(x, f, g)`.
#[derive(Debug, Clone, PartialEq)]
pub struct System2Ode {
    /// The independent variable.
    pub var: String,

    /// The two unknown function symbols.
    pub funcs: (String, String),

    /// The right-hand sides `F(x, f, g)` and `G(x, f, g)`.
    pub rhs: (SymExpr, SymExpr),

    /// `f(x0)` and `g(x0)`.
    pub init: (SymExpr, SymExpr),

    /// The expansion point `x0`.
    pub center: SymExpr,

    /// The truncation order `N`.
    pub truncation: usize,
}

/// An ODE specification: one of the three supported equation shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum OdeSpec {
    /// A scalar first-order equation.
    FirstOrder(FirstOrderOde),

    /// A scalar m-th-order equation.
    NthOrder(NthOrderOde),

    /// A coupled pair of first-order equations.
    System2(System2Ode),
}

/// The solution series, matching the shape of the specification that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Solution {
    /// The series of a scalar equation.
    Scalar(TruncatedSeries),

    /// The paired series of a 2x2 system.
    Pair(TruncatedSeries, TruncatedSeries),
}

/// The symbol referencing the `k`-th derivative of an unknown: `y` -> `y'` -> `y''` -> ...
pub(crate) fn derivative_symbol(func: &str, k: usize) -> String {
    format!("{}{}", func, "'".repeat(k))
}

/// Checks that a supplied value (an initial condition or the expansion point) is constant: free
/// of the independent variable and of every unknown-function symbol.
fn check_constant(expr: &SymExpr, var: &str, funcs: &[&str]) -> Result<(), SolveError> {
    let non_constant = expr.contains_symbol(var)
        || funcs.iter().any(|func| expr.contains_symbol(func));
    if non_constant {
        return Err(SolveError::NonConstantValue { expr: expr.clone() });
    }
    Ok(())
}

/// Checks that the right-hand side references no derivative of the unknown at or above the
/// given order (order 1 forbids `y'` and higher for a first-order equation).
fn check_derivative_references(rhs: &SymExpr, func: &str, order: usize) -> Result<(), SolveError> {
    let mut offending = None;
    rhs.visit_symbols(&mut |symbol| {
        let Some(primes) = symbol.strip_prefix(func) else { return };
        if !primes.is_empty() && primes.chars().all(|c| c == '\'') && primes.len() >= order {
            offending.get_or_insert_with(|| symbol.to_string());
        }
    });

    match offending {
        Some(symbol) => Err(SolveError::UnknownDerivative { symbol }),
        None => Ok(()),
    }
}

fn validate_first_order(ode: &FirstOrderOde) -> Result<(), SolveError> {
    check_derivative_references(&ode.rhs, &ode.func, 1)?;
    check_constant(&ode.init, &ode.var, &[&ode.func])?;
    check_constant(&ode.center, &ode.var, &[&ode.func])?;
    Ok(())
}

fn validate_nth_order(ode: &NthOrderOde) -> Result<(), SolveError> {
    if ode.order == 0 {
        return Err(SolveError::InvalidOrder);
    }

    for k in 0..ode.order {
        if !ode.init.contains_key(&k) {
            return Err(SolveError::MissingInitialCondition { order: k });
        }
    }
    if let Some((&order, _)) = ode.init.iter().find(|(&k, _)| k >= ode.order) {
        return Err(SolveError::UnexpectedInitialCondition { order });
    }

    check_derivative_references(&ode.rhs, &ode.func, ode.order)?;
    for value in ode.init.values() {
        check_constant(value, &ode.var, &[&ode.func])?;
    }
    check_constant(&ode.center, &ode.var, &[&ode.func])?;
    Ok(())
}

fn validate_system2(ode: &System2Ode) -> Result<(), SolveError> {
    let funcs = [&*ode.funcs.0, &*ode.funcs.1];
    for rhs in [&ode.rhs.0, &ode.rhs.1] {
        check_derivative_references(rhs, &ode.funcs.0, 1)?;
        check_derivative_references(rhs, &ode.funcs.1, 1)?;
    }
    for value in [&ode.init.0, &ode.init.1] {
        check_constant(value, &ode.var, &funcs)?;
    }
    check_constant(&ode.center, &ode.var, &funcs)?;
    Ok(())
}

/// Solves `y' = F(x, y)` with `y(x0)` given, returning the series of the solution truncated at
/// the requested order.
pub fn solve_first_order(ode: &FirstOrderOde) -> Result<TruncatedSeries, SolveError> {
    validate_first_order(ode)?;

    // fast path: a closed form expanded directly; any failure falls back to the recurrence
    if let Ok(ClosedForm::Scalar(expr)) = RuleSolver.solve(&OdeSpec::FirstOrder(ode.clone())) {
        let center = simplify(&ode.center);
        if let Ok(series) = exact::expand_closed_form(&expr, &ode.var, &center, ode.truncation) {
            return Ok(series);
        }
    }

    recurrence::first_order(ode)
}

/// Solves `y^(m) = G(x, y, y', ..., y^(m-1))` with the first `m` derivative values at `x0`
/// given.
pub fn solve_nth_order(ode: &NthOrderOde) -> Result<TruncatedSeries, SolveError> {
    validate_nth_order(ode)?;

    if let Ok(ClosedForm::Scalar(expr)) = RuleSolver.solve(&OdeSpec::NthOrder(ode.clone())) {
        let center = simplify(&ode.center);
        if let Ok(series) = exact::expand_closed_form(&expr, &ode.var, &center, ode.truncation) {
            return Ok(series);
        }
    }

    recurrence::nth_order(ode)
}

/// Solves the coupled pair `f' = F(x, f, g)`, `g' = G(x, f, g)` with `f(x0)` and `g(x0)` given.
pub fn solve_system2(ode: &System2Ode) -> Result<(TruncatedSeries, TruncatedSeries), SolveError> {
    validate_system2(ode)?;

    if let Ok(ClosedForm::Pair(f_expr, g_expr)) = RuleSolver.solve(&OdeSpec::System2(ode.clone())) {
        let center = simplify(&ode.center);
        let expanded = exact::expand_closed_form(&f_expr, &ode.var, &center, ode.truncation)
            .and_then(|f| {
                exact::expand_closed_form(&g_expr, &ode.var, &center, ode.truncation)
                    .map(|g| (f, g))
            });
        if let Ok(pair) = expanded {
            return Ok(pair);
        }
    }

    recurrence::system2(ode)
}

/// Solves any specification, dispatching on its shape.
pub fn solve(spec: &OdeSpec) -> Result<Solution, SolveError> {
    match spec {
        OdeSpec::FirstOrder(ode) => solve_first_order(ode).map(Solution::Scalar),
        OdeSpec::NthOrder(ode) => solve_nth_order(ode).map(Solution::Scalar),
        OdeSpec::System2(ode) => solve_system2(ode).map(|(f, g)| Solution::Pair(f, g)),
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

    /// Builds a first-order request about 0 in the conventional names.
    fn first_order(rhs: &str, init: &str, truncation: usize) -> FirstOrderOde {
        FirstOrderOde {
            var: "x".to_string(),
            func: "y".to_string(),
            rhs: parse_expr(rhs),
            init: parse_expr(init),
            center: SymExpr::zero(),
            truncation,
        }
    }

    /// Builds an m-th-order request about 0 in the conventional names.
    fn nth_order(order: usize, rhs: &str, init: &[&str], truncation: usize) -> NthOrderOde {
        NthOrderOde {
            var: "x".to_string(),
            func: "y".to_string(),
            order,
            rhs: parse_expr(rhs),
            init: init.iter()
                .enumerate()
                .map(|(k, value)| (k, parse_expr(value)))
                .collect(),
            center: SymExpr::zero(),
            truncation,
        }
    }

    /// Builds a 2x2 system request about 0 in the conventional names.
    fn system2(rhs_f: &str, rhs_g: &str, init_f: &str, init_g: &str, truncation: usize) -> System2Ode {
        System2Ode {
            var: "x".to_string(),
            funcs: ("f".to_string(), "g".to_string()),
            rhs: (parse_expr(rhs_f), parse_expr(rhs_g)),
            init: (parse_expr(init_f), parse_expr(init_g)),
            center: SymExpr::zero(),
            truncation,
        }
    }

    /// Asserts that a computed series equals the polynomial given in source form.
    fn assert_series(series: &TruncatedSeries, expected: &str) {
        assert!(
            series.equivalent_to(&parse_expr(expected)),
            "series was {}, expected {}",
            series,
            expected,
        );
    }

    #[test]
    fn exponential() {
        // y' = y, y(0) = 1
        let series = solve_first_order(&first_order("y", "1", 6)).unwrap();
        assert_series(&series, "1 + x + x^2/2 + x^3/6 + x^4/24 + x^5/120 + x^6/720");
    }

    #[test]
    fn pure_quadrature() {
        // y' = x^2, y(0) = 0
        let series = solve_first_order(&first_order("x^2", "0", 5)).unwrap();
        assert_series(&series, "x^3/3");
    }

    #[test]
    fn fast_path_and_recurrence_agree() {
        // y' = 2y + 1 has the closed form (1/2)(e^(2x) - 1); both paths must produce the same
        // coefficients for every degree
        let ode = first_order("2y + 1", "0", 6);

        let ClosedForm::Scalar(closed) = RuleSolver.solve(&OdeSpec::FirstOrder(ode.clone())).unwrap() else {
            panic!("expected a scalar closed form");
        };
        let fast = exact::expand_closed_form(&closed, "x", &SymExpr::zero(), 6).unwrap();
        let slow = recurrence::first_order(&ode).unwrap();

        assert!(fast.difference(&slow).is_zero(), "fast {} != slow {}", fast, slow);
        assert_eq!(fast.coeffs(), slow.coeffs());
    }

    #[test]
    fn quadrature_fast_path_agrees_with_recurrence() {
        let ode = first_order("x^2 - 3x + 1", "2", 5);
        let via_entry = solve_first_order(&ode).unwrap();
        let via_recurrence = recurrence::first_order(&ode).unwrap();
        assert_eq!(via_entry.coeffs(), via_recurrence.coeffs());
    }

    #[test]
    fn causality() {
        // no coefficient depends on the truncation order it was computed under
        let long = solve_first_order(&first_order("x + y^2", "1", 8)).unwrap();
        let short = solve_first_order(&first_order("x + y^2", "1", 4)).unwrap();
        assert_eq!(long.truncate(4).coeffs(), short.coeffs());
    }

    #[test]
    fn truncation_order_zero() {
        let series = solve_first_order(&first_order("y^2 + x", "3", 0)).unwrap();
        assert_eq!(series.order(), 0);
        assert_eq!(series.coeff(0).unwrap(), &parse_expr("3"));
    }

    #[test]
    fn riccati_tangent() {
        // y' = 1 + y^2, y(0) = 0 -> tan(x)
        let series = solve_first_order(&first_order("1 + y^2", "0", 5)).unwrap();
        assert_series(&series, "x + x^3/3 + 2x^5/15");
    }

    #[test]
    fn geometric() {
        // y' = y^2, y(0) = 1 -> 1/(1 - x)
        let series = solve_first_order(&first_order("y^2", "1", 5)).unwrap();
        assert_series(&series, "1 + x + x^2 + x^3 + x^4 + x^5");
    }

    #[test]
    fn nonlinear_without_low_order_terms() {
        // y' = x^2 + y^2, y(0) = 0 -> x^3/3 with no x^5 term through degree 6
        let series = solve_first_order(&first_order("x^2 + y^2", "0", 6)).unwrap();
        assert_series(&series, "x^3/3");
    }

    #[test]
    fn nonlinear_inhomogeneous() {
        // y' = x + y^2, y(0) = 1
        let series = solve_first_order(&first_order("x + y^2", "1", 3)).unwrap();
        assert_series(&series, "1 + x + 3x^2/2 + 4x^3/3");
    }

    #[test]
    fn bernoulli() {
        // y' = x*y, y(0) = 1 -> e^(x^2/2)
        let series = solve_first_order(&first_order("x * y", "1", 6)).unwrap();
        assert_series(&series, "1 + x^2/2 + x^4/8 + x^6/48");
    }

    #[test]
    fn linear_inhomogeneous_with_sine() {
        // y' = y + sin(x), y(0) = 0
        let series = solve_first_order(&first_order("y + sin(x)", "0", 5)).unwrap();
        assert_series(&series, "x^2/2 + x^3/6");
    }

    #[test]
    fn sine_from_quadrature() {
        // y' = cos(x), y(0) = 0 -> sin(x)
        let series = solve_first_order(&first_order("cos(x)", "0", 7)).unwrap();
        assert_series(&series, "x - x^3/6 + x^5/120 - x^7/5040");
    }

    #[test]
    fn arctangent() {
        // y' = 1/(1 + x^2), y(0) = 0 -> atan(x)
        let series = solve_first_order(&first_order("1/(1 + x^2)", "0", 9)).unwrap();
        assert_series(&series, "x - x^3/3 + x^5/5 - x^7/7 + x^9/9");
    }

    #[test]
    fn arcsine() {
        // y' = 1/sqrt(1 - x^2), y(0) = 0 -> asin(x)
        let series = solve_first_order(&first_order("1/sqrt(1 - x^2)", "0", 5)).unwrap();
        assert_series(&series, "x + x^3/6 + 3x^5/40");
    }

    #[test]
    fn cosine_second_order() {
        // y'' = -y, y(0) = 1, y'(0) = 0 -> cos(x)
        let series = solve_nth_order(&nth_order(2, "-y", &["1", "0"], 6)).unwrap();
        assert_series(&series, "1 - x^2/2 + x^4/24 - x^6/720");
    }

    #[test]
    fn third_order_with_inhomogeneity() {
        // y''' = x + y, y(0) = 1, y'(0) = 0, y''(0) = 0
        let series = solve_nth_order(&nth_order(3, "x + y", &["1", "0", "0"], 5)).unwrap();
        assert_series(&series, "1 + x^3/6 + x^4/24");
    }

    #[test]
    fn second_order_with_first_derivative() {
        // y'' = y', y(0) = 0, y'(0) = 1 -> e^x - 1
        let series = solve_nth_order(&nth_order(2, "y'", &["0", "1"], 5)).unwrap();
        assert_series(&series, "x + x^2/2 + x^3/6 + x^4/24 + x^5/120");
    }

    #[test]
    fn constant_rhs_is_not_special_cased() {
        // y''' = 0 flows through the same recurrence and yields a polynomial
        let series = solve_nth_order(&nth_order(3, "0", &["1", "2", "3"], 5)).unwrap();
        assert_series(&series, "1 + 2x + 3x^2/2");
    }

    #[test]
    fn nth_order_reduces_to_first_order() {
        let via_nth = solve_nth_order(&nth_order(1, "y", &["1"], 5)).unwrap();
        let via_first = solve_first_order(&first_order("y", "1", 5)).unwrap();
        assert_eq!(via_nth.coeffs(), via_first.coeffs());
    }

    #[test]
    fn truncation_below_equation_order() {
        // with N < m - 1 the result is simply the supplied values as a shorter polynomial
        let series = solve_nth_order(&nth_order(3, "x + y", &["1", "4", "6"], 1)).unwrap();
        assert_eq!(series.order(), 1);
        assert_series(&series, "1 + 4x");
    }

    #[test]
    fn derivative_consistency() {
        // differentiating the returned series m times and evaluating at x0 reproduces the
        // right-hand side's initial value
        let series = solve_nth_order(&nth_order(2, "-y", &["1", "0"], 6)).unwrap();
        let second = series.differentiate().differentiate();
        assert_eq!(second.coeff(0).unwrap(), &parse_expr("-1"));
    }

    #[test]
    fn initial_values_survive_unchanged() {
        let series = solve_nth_order(&nth_order(2, "y + x", &["5", "7"], 4)).unwrap();
        assert_eq!(series.coeff(0).unwrap(), &parse_expr("5"));
        assert_eq!(series.coeff(1).unwrap(), &parse_expr("7"));
    }

    #[test]
    fn symbolic_initial_value() {
        // y'' = -y with y(0) = c keeps the constant symbolic: c - c x^2/2 + ...
        let series = solve_nth_order(&nth_order(2, "-y", &["c", "0"], 4)).unwrap();
        assert_eq!(series.coeff(2).unwrap(), &simplify(&parse_expr("-c/2")));
        assert_eq!(series.coeff(4).unwrap(), &simplify(&parse_expr("c/24")));
    }

    #[test]
    fn imaginary_expansion_point() {
        // y' = x about the imaginary unit: a_1 = i
        let ode = FirstOrderOde {
            var: "x".to_string(),
            func: "y".to_string(),
            rhs: parse_expr("x"),
            init: parse_expr("0"),
            center: parse_expr("i"),
            truncation: 2,
        };
        let series = solve_first_order(&ode).unwrap();
        assert_eq!(series.coeff(1).unwrap(), &parse_expr("i"));
        assert_eq!(series.coeff(2).unwrap(), &parse_expr("1/2"));
    }

    #[test]
    fn nonzero_rational_center() {
        // y' = y about 2 with y(2) = 1: coefficients are 1/k! regardless of the center
        let ode = FirstOrderOde {
            var: "x".to_string(),
            func: "y".to_string(),
            rhs: parse_expr("y"),
            init: parse_expr("1"),
            center: parse_expr("2"),
            truncation: 4,
        };
        let series = solve_first_order(&ode).unwrap();
        assert_eq!(series.coeff(3).unwrap(), &parse_expr("1/6"));
        assert_eq!(series.center(), &parse_expr("2"));
    }

    #[test]
    fn harmonic_oscillator_system() {
        // f' = g, g' = -f, f(0) = 0, g(0) = 1 -> (sin, cos)
        let (f, g) = solve_system2(&system2("g", "-f", "0", "1", 5)).unwrap();
        assert_series(&f, "x - x^3/6 + x^5/120");
        assert_series(&g, "1 - x^2/2 + x^4/24");
    }

    #[test]
    fn exponential_coupled_system() {
        // f' = f + g, g' = f + g, f(0) = 1, g(0) = 0; the x^5 coefficient is 2/15, a regression
        // check for a historically miscomputed value
        let (f, g) = solve_system2(&system2("f + g", "f + g", "1", "0", 5)).unwrap();
        assert_series(&f, "1 + x + x^2 + 2x^3/3 + x^4/3 + 2x^5/15");
        assert_series(&g, "x + x^2 + 2x^3/3 + x^4/3 + 2x^5/15");
        assert_eq!(f.coeff(5).unwrap(), &parse_expr("2/15"));
        assert_eq!(g.coeff(5).unwrap(), &parse_expr("2/15"));
    }

    #[test]
    fn system_updates_use_only_lower_degrees() {
        // cross-coupled growth: f' = g, g' = f, f(0) = 1, g(0) = 1 -> both e^x
        let (f, g) = solve_system2(&system2("g", "f", "1", "1", 5)).unwrap();
        assert_eq!(f.coeffs(), g.coeffs());
        assert_series(&f, "1 + x + x^2/2 + x^3/6 + x^4/24 + x^5/120");
    }

    #[test]
    fn dispatch_by_shape() {
        let spec = OdeSpec::FirstOrder(first_order("y", "1", 3));
        let Solution::Scalar(series) = solve(&spec).unwrap() else {
            panic!("expected a scalar solution");
        };
        assert_series(&series, "1 + x + x^2/2 + x^3/6");
    }

    #[test]
    fn missing_initial_condition() {
        let mut ode = nth_order(2, "-y", &["1", "0"], 4);
        ode.init.remove(&1);
        assert_eq!(
            solve_nth_order(&ode),
            Err(SolveError::MissingInitialCondition { order: 1 }),
        );
    }

    #[test]
    fn extra_initial_condition() {
        let mut ode = nth_order(2, "-y", &["1", "0"], 4);
        ode.init.insert(2, parse_expr("1"));
        assert_eq!(
            solve_nth_order(&ode),
            Err(SolveError::UnexpectedInitialCondition { order: 2 }),
        );
    }

    #[test]
    fn order_zero_is_invalid() {
        let mut ode = nth_order(1, "y", &["1"], 4);
        ode.order = 0;
        ode.init.clear();
        assert_eq!(solve_nth_order(&ode), Err(SolveError::InvalidOrder));
    }

    #[test]
    fn unknown_derivative_in_first_order_rhs() {
        assert_eq!(
            solve_first_order(&first_order("y'", "1", 3)),
            Err(SolveError::UnknownDerivative { symbol: "y'".to_string() }),
        );
    }

    #[test]
    fn unknown_derivative_in_nth_order_rhs() {
        // a second-order equation may reference y and y', but not y''
        assert_eq!(
            solve_nth_order(&nth_order(2, "y''", &["1", "0"], 4)),
            Err(SolveError::UnknownDerivative { symbol: "y''".to_string() }),
        );
    }

    #[test]
    fn non_constant_initial_value() {
        assert_eq!(
            solve_first_order(&first_order("y", "x + 1", 3)),
            Err(SolveError::NonConstantValue { expr: parse_expr("x + 1") }),
        );
    }

    #[test]
    fn non_analytic_rhs() {
        // y' = 1/x has a pole at the expansion point
        let err = solve_first_order(&first_order("1/x", "1", 3)).unwrap_err();
        assert!(matches!(err, SolveError::Substitution(_)));
    }
}
