//! The series substitution primitive.
//!
//! Given an expression over the independent variable and zero or more unknown-function symbols,
//! and the *currently known* truncated series of each unknown, this module computes exact
//! coefficients of the expression's expansion about the center: substitute `x -> x0 + t` and
//! each unknown with its series-as-polynomial-in-`t`, expand, and truncate.
//!
//! Truncation happens *inside* every product and power, never after full expansion; expanding
//! first and truncating afterwards would blow up combinatorially with the degree. Every
//! operation here is causal — the output coefficient of degree `k` depends only on input
//! coefficients of degree at most `k` — which is what makes the solver recurrences in
//! [`crate::solve`] terminate without back-substitution.
//!
//! Beyond polynomial arithmetic, the primitive knows how to expand series reciprocals (for
//! right-hand sides like `1/(1+x^2)`), rational powers of series with unit constant term (the
//! binomial series, for `1/sqrt(1-x^2)`), and compositions `f(u(t))` for the known functions
//! `sin`, `cos`, `exp`, and `ln` (for right-hand sides like `y + sin(x)`). Anything else fails
//! with [`SubstitutionFailure`], carrying the offending expression and the requested degree.

use crate::primitive::{factorial, int, rat};
use crate::symbolic::expr::{Primary, SymExpr};
use crate::symbolic::simplify::{fraction::make_fraction, simplify};
use rug::Rational;
use std::ops::Neg;

/// The expansion/truncation machinery cannot process an expression, e.g. a right-hand side that
/// is not analytic at the expansion point.
#[derive(Debug, Clone, PartialEq)]
pub struct SubstitutionFailure {
    /// The expression that could not be expanded.
    pub expr: SymExpr,

    /// The degree the expansion was requested at.
    pub degree: usize,
}

impl std::fmt::Display for SubstitutionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "cannot expand `{}` as a power series to degree {}",
            self.expr, self.degree,
        )
    }
}

impl std::error::Error for SubstitutionFailure {}

/// The context of one expansion: the independent variable, the expansion point, and the known
/// truncated series of each unknown-function symbol.
///
/// Series are bound as coefficient slices in the local step variable `t` (so `x = x0 + t` maps
/// the binding of `y` to `Σ a_k t^k`). A partial series may be shorter than the requested
/// degree; the absent high-degree coefficients cannot influence output coefficients at or below
/// the degrees the binding does cover, so the recurrence solvers always read exact values.
#[derive(Debug)]
pub struct SeriesEnv<'a> {
    var: &'a str,
    center: &'a SymExpr,
    bindings: Vec<(&'a str, &'a [SymExpr])>,
}

impl<'a> SeriesEnv<'a> {
    /// Creates an environment with no unknowns bound.
    pub fn new(var: &'a str, center: &'a SymExpr) -> Self {
        Self {
            var,
            center,
            bindings: Vec::new(),
        }
    }

    /// Binds an unknown-function symbol to its currently known series coefficients.
    pub fn bind(mut self, symbol: &'a str, coeffs: &'a [SymExpr]) -> Self {
        self.bindings.push((symbol, coeffs));
        self
    }

    fn lookup(&self, name: &str) -> Option<&'a [SymExpr]> {
        self.bindings.iter()
            .find(|(symbol, _)| *symbol == name)
            .map(|(_, coeffs)| *coeffs)
    }
}

/// Returns the coefficient of `t^degree` in the expansion of the expression about the center.
///
/// This is the solver-facing entry point: one recurrence step is exactly one call per unknown.
pub fn coefficient(expr: &SymExpr, env: &SeriesEnv, degree: usize) -> Result<SymExpr, SubstitutionFailure> {
    let mut coeffs = expand_truncated(expr, env, degree)?;
    // the vector holds degree + 1 entries, so this cannot fail
    Ok(coeffs.pop().unwrap())
}

/// Expands the expression about the center as a polynomial in the local step variable, truncated
/// to the given degree. Returns the full coefficient vector, indexed by degree `0..=degree`.
pub fn expand_truncated(expr: &SymExpr, env: &SeriesEnv, degree: usize) -> Result<Vec<SymExpr>, SubstitutionFailure> {
    match expr {
        SymExpr::Primary(Primary::Integer(_)) | SymExpr::Primary(Primary::Rational(_)) => {
            Ok(const_vec(expr.clone(), degree))
        },
        SymExpr::Primary(Primary::Symbol(sym)) => {
            if sym == env.var {
                // x = x0 + t
                let mut coeffs = const_vec(env.center.clone(), degree);
                if degree >= 1 {
                    coeffs[1] = SymExpr::one();
                }
                Ok(coeffs)
            } else if let Some(series) = env.lookup(sym) {
                let mut coeffs = series.iter().take(degree + 1).cloned().collect::<Vec<_>>();
                coeffs.resize(degree + 1, SymExpr::zero());
                Ok(coeffs)
            } else {
                // a symbolic constant, such as `i` or a named initial value
                Ok(const_vec(expr.clone(), degree))
            }
        },
        SymExpr::Primary(Primary::Call(name, args)) => expand_call(expr, name, args, env, degree),
        SymExpr::Add(terms) => {
            let mut acc = vec![SymExpr::zero(); degree + 1];
            for term in terms {
                acc = add_vecs(acc, expand_truncated(term, env, degree)?);
            }
            Ok(acc)
        },
        SymExpr::Mul(factors) => {
            let mut acc = const_vec(SymExpr::one(), degree);
            for factor in factors {
                let rhs = expand_truncated(factor, env, degree)?;
                acc = mul_trunc(&acc, &rhs, degree);
            }
            Ok(acc)
        },
        SymExpr::Exp(base, exponent) => {
            if let Some(k) = exponent.as_integer() {
                let base_coeffs = expand_truncated(base, env, degree)?;
                let power = k.clone().abs().to_u32().ok_or_else(|| fail(expr, degree))?;
                if *k >= 0 {
                    Ok(pow_trunc(&base_coeffs, power, degree))
                } else {
                    let recip = recip_trunc(&base_coeffs, degree).ok_or_else(|| fail(expr, degree))?;
                    Ok(pow_trunc(&recip, power, degree))
                }
            } else if let Some(r) = exponent.as_number() {
                // rational exponent: binomial series about a unit constant term
                let base_coeffs = expand_truncated(base, env, degree)?;
                if base_coeffs[0].is_one() {
                    Ok(binomial_trunc(base_coeffs, &r, degree))
                } else {
                    Err(fail(expr, degree))
                }
            } else {
                Err(fail(expr, degree))
            }
        },
    }
}

fn fail(expr: &SymExpr, degree: usize) -> SubstitutionFailure {
    SubstitutionFailure {
        expr: expr.clone(),
        degree,
    }
}

/// A coefficient vector holding the given value at degree 0 and zero elsewhere.
fn const_vec(value: SymExpr, degree: usize) -> Vec<SymExpr> {
    let mut coeffs = vec![SymExpr::zero(); degree + 1];
    coeffs[0] = value;
    coeffs
}

/// Elementwise sum of two coefficient vectors of equal length.
fn add_vecs(lhs: Vec<SymExpr>, rhs: Vec<SymExpr>) -> Vec<SymExpr> {
    lhs.into_iter()
        .zip(rhs)
        .map(|(a, b)| simplify(&(a + b)))
        .collect()
}

/// Truncated convolution: the product of two coefficient vectors, dropping all terms of degree
/// greater than `degree`.
fn mul_trunc(lhs: &[SymExpr], rhs: &[SymExpr], degree: usize) -> Vec<SymExpr> {
    let mut out = vec![SymExpr::Add(Vec::new()); degree + 1];
    for (i, a) in lhs.iter().enumerate() {
        if i > degree {
            break;
        }
        if a.is_zero() {
            continue;
        }
        for (j, b) in rhs.iter().enumerate() {
            if i + j > degree {
                break;
            }
            if b.is_zero() {
                continue;
            }
            let product = a.clone() * b.clone();
            out[i + j] += product;
        }
    }
    out.into_iter().map(|entry| simplify(&entry.downgrade())).collect()
}

/// The `power`-th power of a coefficient vector, truncated to `degree`.
fn pow_trunc(base: &[SymExpr], power: u32, degree: usize) -> Vec<SymExpr> {
    let mut out = const_vec(SymExpr::one(), degree);
    for _ in 0..power {
        out = mul_trunc(&out, base, degree);
    }
    out
}

/// The reciprocal of a coefficient vector, truncated to `degree`, via the causal recurrence
/// `c_0 = 1/b_0`, `c_k = -1/b_0 * Σ_(j=1..k) b_j c_(k-j)`.
///
/// Returns [`None`] if the constant term is zero: the reciprocal has a pole at the expansion
/// point and is not analytic there.
fn recip_trunc(base: &[SymExpr], degree: usize) -> Option<Vec<SymExpr>> {
    if base[0].is_zero() {
        return None;
    }

    let inv = simplify(&make_fraction(SymExpr::one(), base[0].clone()));
    let mut out = vec![SymExpr::zero(); degree + 1];
    out[0] = inv.clone();
    for k in 1..=degree {
        let mut sum = SymExpr::Add(Vec::new());
        for j in 1..=k {
            if base[j].is_zero() {
                continue;
            }
            sum += base[j].clone() * out[k - j].clone();
        }
        out[k] = simplify(&(sum.downgrade().neg() * inv.clone()));
    }
    Some(out)
}

/// The binomial series `(1 + v)^r = Σ_j C(r, j) v^j` for a rational exponent, applied to a
/// coefficient vector with unit constant term.
fn binomial_trunc(mut base: Vec<SymExpr>, exponent: &Rational, degree: usize) -> Vec<SymExpr> {
    // v = base - 1
    base[0] = SymExpr::zero();
    compose(|j| binomial_coefficient(exponent, j), &base, degree)
}

/// `C(r, j) = r (r-1) ... (r-j+1) / j!` for a rational `r`.
fn binomial_coefficient(r: &Rational, j: usize) -> Rational {
    let mut result = rat(1);
    for i in 0..j {
        let factor = r.clone() - rat(i as u32);
        result = result * factor / rat(i as u32 + 1);
    }
    result
}

/// Composes a known Maclaurin coefficient stream with an inner series that has zero constant
/// term: `f(u(t)) = Σ_j f_j u(t)^j`, truncated to `degree`.
///
/// Powers of the inner series are built incrementally, so the cost is one truncated convolution
/// per degree. The composition is exact because `u^j` contributes nothing below degree `j`.
fn compose(f: impl Fn(usize) -> Rational, inner: &[SymExpr], degree: usize) -> Vec<SymExpr> {
    let mut acc = const_vec(SymExpr::from_number(f(0)), degree);
    let mut power = const_vec(SymExpr::one(), degree);
    for j in 1..=degree {
        power = mul_trunc(&power, inner, degree);
        let coeff = f(j);
        if coeff != 0 {
            acc = add_vecs(acc, scale(&power, &coeff));
        }
    }
    acc
}

/// Multiplies every entry of a coefficient vector by an exact rational.
fn scale(coeffs: &[SymExpr], factor: &Rational) -> Vec<SymExpr> {
    coeffs.iter()
        .map(|coeff| simplify(&(SymExpr::from_number(factor.clone()) * coeff.clone())))
        .collect()
}

/// Expands `f(u(t))` for the known functions.
fn expand_call(
    expr: &SymExpr,
    name: &str,
    args: &[SymExpr],
    env: &SeriesEnv,
    degree: usize,
) -> Result<Vec<SymExpr>, SubstitutionFailure> {
    let [arg] = args else {
        return Err(fail(expr, degree));
    };
    let inner = expand_truncated(arg, env, degree)?;

    match name {
        // sin, cos, and exp compose with any inner series vanishing at the expansion point
        "sin" | "cos" | "exp" => {
            if !inner[0].is_zero() {
                return Err(fail(expr, degree));
            }
            let stream: fn(usize) -> Rational = match name {
                "sin" => |j| {
                    if j % 2 == 0 {
                        rat(0)
                    } else {
                        let sign = if (j / 2) % 2 == 0 { 1 } else { -1 };
                        Rational::from((int(sign), factorial(j)))
                    }
                },
                "cos" => |j| {
                    if j % 2 == 1 {
                        rat(0)
                    } else {
                        let sign = if (j / 2) % 2 == 0 { 1 } else { -1 };
                        Rational::from((int(sign), factorial(j)))
                    }
                },
                _ => |j| Rational::from((int(1), factorial(j))),
            };
            Ok(compose(stream, &inner, degree))
        },
        // ln(1 + v) = v - v^2/2 + v^3/3 - ...
        "ln" => {
            if !inner[0].is_one() {
                return Err(fail(expr, degree));
            }
            let mut shifted = inner;
            shifted[0] = SymExpr::zero();
            Ok(compose(
                |j| {
                    if j == 0 {
                        rat(0)
                    } else {
                        let sign = if j % 2 == 1 { 1 } else { -1 };
                        rat((sign, j as i32))
                    }
                },
                &shifted,
                degree,
            ))
        },
        // sqrt(1 + v) via the binomial series
        "sqrt" => {
            if !inner[0].is_one() {
                return Err(fail(expr, degree));
            }
            Ok(binomial_trunc(inner, &rat((1, 2)), degree))
        },
        _ => Err(fail(expr, degree)),
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

    /// Expands `input` about 0 with no unknowns bound and compares against the expected
    /// coefficients, given as source strings.
    fn assert_expansion(input: &str, expected: &[&str]) {
        let expr = parse_expr(input);
        let zero = SymExpr::zero();
        let env = SeriesEnv::new("x", &zero);
        let coeffs = expand_truncated(&expr, &env, expected.len() - 1).unwrap();
        let expected = expected.iter().map(|s| simplify(&parse_expr(s))).collect::<Vec<_>>();
        assert_eq!(coeffs, expected, "expansion of {}", input);
    }

    #[test]
    fn polynomial() {
        assert_expansion("x^2", &["0", "0", "1", "0"]);
        assert_expansion("1 + x + 3x^2", &["1", "1", "3"]);
        assert_expansion("(1 + x)^3", &["1", "3", "3", "1"]);
    }

    #[test]
    fn polynomial_about_nonzero_center() {
        // x^2 about 2: (2 + t)^2 = 4 + 4t + t^2
        let expr = parse_expr("x^2");
        let center = parse_expr("2");
        let env = SeriesEnv::new("x", &center);
        let coeffs = expand_truncated(&expr, &env, 2).unwrap();
        assert_eq!(coeffs, vec![parse_expr("4"), parse_expr("4"), parse_expr("1")]);
    }

    #[test]
    fn geometric_series() {
        assert_expansion("1/(1 - x)", &["1", "1", "1", "1", "1"]);
        assert_expansion("1/(1 + x^2)", &["1", "0", "-1", "0", "1", "0", "-1"]);
    }

    #[test]
    fn sine_series() {
        assert_expansion("sin(x)", &["0", "1", "0", "-1/6", "0", "1/120"]);
    }

    #[test]
    fn cosine_series() {
        assert_expansion("cos(x)", &["1", "0", "-1/2", "0", "1/24"]);
    }

    #[test]
    fn exponential_of_polynomial() {
        // exp(2x) = 1 + 2x + 2x^2 + 4/3 x^3
        assert_expansion("exp(2x)", &["1", "2", "2", "4/3"]);
    }

    #[test]
    fn logarithm_series() {
        assert_expansion("ln(1 + x)", &["0", "1", "-1/2", "1/3", "-1/4"]);
    }

    #[test]
    fn arcsine_integrand() {
        // 1/sqrt(1 - x^2) = 1 + x^2/2 + 3x^4/8
        assert_expansion("1/sqrt(1 - x^2)", &["1", "0", "1/2", "0", "3/8"]);
    }

    #[test]
    fn bound_unknown() {
        // y = 2 + t, so y^2 - x = 4 + 3t + t^2 about 0
        let expr = parse_expr("y^2 - x");
        let zero = SymExpr::zero();
        let y = vec![parse_expr("2"), parse_expr("1")];
        let env = SeriesEnv::new("x", &zero).bind("y", &y);
        let coeffs = expand_truncated(&expr, &env, 2).unwrap();
        assert_eq!(coeffs, vec![parse_expr("4"), parse_expr("3"), parse_expr("1")]);
    }

    #[test]
    fn absent_high_coefficients_do_not_matter() {
        // binding y to a shorter prefix must not change the low-degree output
        let expr = parse_expr("y^2 + x");
        let zero = SymExpr::zero();
        let long = vec![parse_expr("1"), parse_expr("2"), parse_expr("5")];
        let short = vec![parse_expr("1"), parse_expr("2")];

        let env = SeriesEnv::new("x", &zero).bind("y", &long);
        let with_long = expand_truncated(&expr, &env, 1).unwrap();
        let env = SeriesEnv::new("x", &zero).bind("y", &short);
        let with_short = expand_truncated(&expr, &env, 1).unwrap();
        assert_eq!(with_long, with_short);
    }

    #[test]
    fn symbolic_constant_coefficients() {
        // c is not bound, so it expands as a constant: c * x has coefficient c at degree 1
        let expr = parse_expr("c * x");
        let zero = SymExpr::zero();
        let env = SeriesEnv::new("x", &zero);
        let coeffs = expand_truncated(&expr, &env, 1).unwrap();
        assert_eq!(coeffs[0], SymExpr::zero());
        assert_eq!(coeffs[1], parse_expr("c"));
    }

    #[test]
    fn pole_at_center_fails() {
        let expr = parse_expr("1/x");
        let zero = SymExpr::zero();
        let env = SeriesEnv::new("x", &zero);
        let err = expand_truncated(&expr, &env, 3).unwrap_err();
        assert_eq!(err.degree, 3);
    }

    #[test]
    fn unknown_function_fails() {
        let expr = parse_expr("gamma(x)");
        let zero = SymExpr::zero();
        let env = SeriesEnv::new("x", &zero);
        assert!(expand_truncated(&expr, &env, 2).is_err());
    }

    #[test]
    fn sine_of_nonvanishing_argument_fails() {
        // sin(1 + x) has no rational Maclaurin coefficients
        let expr = parse_expr("sin(1 + x)");
        let zero = SymExpr::zero();
        let env = SeriesEnv::new("x", &zero);
        assert!(expand_truncated(&expr, &env, 2).is_err());
    }

    #[test]
    fn coefficient_extracts_last_entry() {
        let expr = parse_expr("x^3");
        let zero = SymExpr::zero();
        let env = SeriesEnv::new("x", &zero);
        assert_eq!(coefficient(&expr, &env, 3).unwrap(), SymExpr::one());
        assert_eq!(coefficient(&expr, &env, 2).unwrap(), SymExpr::zero());
    }
}
