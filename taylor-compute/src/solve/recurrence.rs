//! The causal coefficient recurrences.
//!
//! Each solver matches coefficients of `t^n` on both sides of the equation. Differentiating
//! `y(t) = Σ a_k t^k` term by term gives `y'(t) = Σ (k+1) a_(k+1) t^k`, so matching the
//! coefficient of `t^n` in `y' = F(x, y)` gives `(n+1) a_(n+1) = c_n`, where `c_n` comes from
//! the substitution primitive applied to the *partial* series known so far. The recurrence is
//! causal — `a_(n+1)` depends only on `a_0..a_n` — so it terminates in exactly as many steps as
//! there are unknown coefficients, with no back-substitution or fixed-point iteration.

use crate::primitive::{factorial, rat};
use crate::series::{substitute, SeriesEnv, TruncatedSeries};
use crate::symbolic::expr::SymExpr;
use crate::symbolic::simplify::{fraction::make_fraction, simplify};
use rug::Rational;
use super::error::SolveError;
use super::{derivative_symbol, FirstOrderOde, NthOrderOde, System2Ode};

/// Divides an exact coefficient by a rational, simplifying the result.
fn divided(value: SymExpr, by: Rational) -> SymExpr {
    simplify(&make_fraction(value, SymExpr::from_number(by)))
}

/// Differentiates a coefficient vector term by term: `d_k = (k+1) a_(k+1)`.
fn differentiate_coeffs(coeffs: &[SymExpr]) -> Vec<SymExpr> {
    coeffs.iter()
        .skip(1)
        .enumerate()
        .map(|(k, coeff)| simplify(&(SymExpr::from_number(rat(k as u32 + 1)) * coeff.clone())))
        .collect()
}

/// Computes the series for `y' = F(x, y)` given `y(x0)`.
///
/// Each step `n` extracts the coefficient of `t^n` from the right-hand side with the partial
/// series `Y_n = Σ_(k=0..n) a_k t^k` substituted for the unknown, and sets
/// `a_(n+1) = c_n / (n+1)`. With truncation order 0 the result is just the initial value; no
/// recurrence step runs.
pub fn first_order(ode: &FirstOrderOde) -> Result<TruncatedSeries, SolveError> {
    let center = simplify(&ode.center);
    let mut coeffs = Vec::with_capacity(ode.truncation + 1);
    coeffs.push(simplify(&ode.init));

    for n in 0..ode.truncation {
        let c_n = {
            let env = SeriesEnv::new(&ode.var, &center).bind(&ode.func, &coeffs);
            substitute::coefficient(&ode.rhs, &env, n)?
        };
        coeffs.push(divided(c_n, rat(n as u32 + 1)));
    }

    Ok(TruncatedSeries::new(ode.var.clone(), center, coeffs))
}

/// Computes the series for `y^(m) = G(x, y, y', ..., y^(m-1))` given the first `m` derivative
/// values at `x0`.
///
/// The coefficient of `t^n` in `y^(m)` is `a_(n+m) * (n+m)!/n!`, so each step sets
/// `a_(n+m) = c_n * n!/(n+m)!`. The partial series is re-differentiated `m-1` times each step to
/// bind `y', ..., y^(m-1)`; a constant right-hand side is not special-cased and flows through
/// the same recurrence. With `m = 1` this reduces exactly to [`first_order`].
pub fn nth_order(ode: &NthOrderOde) -> Result<TruncatedSeries, SolveError> {
    let m = ode.order;
    let center = simplify(&ode.center);

    // a_k = y^(k)(x0) / k! for the supplied derivative values; when the truncation order is
    // below m - 1, the result is simply the supplied values as a shorter polynomial
    let mut coeffs = Vec::with_capacity(ode.truncation + 1);
    for k in 0..=ode.truncation.min(m - 1) {
        let value = simplify(&ode.init[&k]);
        coeffs.push(divided(value, Rational::from(factorial(k))));
    }

    if ode.truncation < m {
        return Ok(TruncatedSeries::new(ode.var.clone(), center, coeffs));
    }

    for n in 0..=ode.truncation - m {
        // bind y and its derivatives, each differentiated from the partial series known so far
        // (all of a_0..a_(n+m-1) are known at this point)
        let mut derived = Vec::with_capacity(m);
        derived.push(coeffs.clone());
        for _ in 1..m {
            derived.push(differentiate_coeffs(derived.last().unwrap()));
        }

        let names = (0..m)
            .map(|k| derivative_symbol(&ode.func, k))
            .collect::<Vec<_>>();

        let c_n = {
            let mut env = SeriesEnv::new(&ode.var, &center);
            for (name, series) in names.iter().zip(&derived) {
                env = env.bind(name, series);
            }
            substitute::coefficient(&ode.rhs, &env, n)?
        };

        // a_(n+m) = c_n * n! / (n+m)!
        let ratio = Rational::from((factorial(n), factorial(n + m)));
        coeffs.push(simplify(&(SymExpr::from_number(ratio) * c_n)));
    }

    Ok(TruncatedSeries::new(ode.var.clone(), center, coeffs))
}

/// Computes the paired series for `f' = F(x, f, g)`, `g' = G(x, f, g)` given `f(x0)` and
/// `g(x0)`.
///
/// The shape is identical to [`first_order`] with two interleaved unknowns. Both coefficient
/// extractions at step `n` see only coefficients of degree ≤ n from *both* partial series, so
/// there is no circular dependency: each unknown's next coefficient depends only on lower-degree
/// data of itself and its partner.
pub fn system2(ode: &System2Ode) -> Result<(TruncatedSeries, TruncatedSeries), SolveError> {
    let center = simplify(&ode.center);
    let mut f_coeffs = Vec::with_capacity(ode.truncation + 1);
    let mut g_coeffs = Vec::with_capacity(ode.truncation + 1);
    f_coeffs.push(simplify(&ode.init.0));
    g_coeffs.push(simplify(&ode.init.1));

    for n in 0..ode.truncation {
        let (c_f, c_g) = {
            let env = SeriesEnv::new(&ode.var, &center)
                .bind(&ode.funcs.0, &f_coeffs)
                .bind(&ode.funcs.1, &g_coeffs);
            (
                substitute::coefficient(&ode.rhs.0, &env, n)?,
                substitute::coefficient(&ode.rhs.1, &env, n)?,
            )
        };

        f_coeffs.push(divided(c_f, rat(n as u32 + 1)));
        g_coeffs.push(divided(c_g, rat(n as u32 + 1)));
    }

    Ok((
        TruncatedSeries::new(ode.var.clone(), center.clone(), f_coeffs),
        TruncatedSeries::new(ode.var.clone(), center, g_coeffs),
    ))
}
