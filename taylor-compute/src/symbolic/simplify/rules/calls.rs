//! Simplification rules that evaluate known functions at distinguished points.
//!
//! These rules are what allow a closed-form solution such as `e^(2x)` to be expanded into a
//! Taylor series: each coefficient is an expression like `2^k * exp(0) / k!`, which must reduce
//! to an exact number.

use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::do_call, step::Step},
    step_collector::StepCollector,
};
use rug::Rational;

/// `sin(0) = 0`, `cos(0) = 1`, `exp(0) = 1`
pub fn call_at_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let rules: [(&str, fn() -> SymExpr); 3] = [
        ("sin", SymExpr::zero),
        ("cos", SymExpr::one),
        ("exp", SymExpr::one),
    ];

    let opt = rules.iter().find_map(|(name, value)| {
        do_call(expr, name, |args| {
            match args {
                [arg] if arg.is_zero() => Some(value()),
                _ => None,
            }
        })
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::EvaluateCallAtZero);
    Some(opt)
}

/// `ln(1) = 0`
pub fn ln_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, "ln", |args| {
        match args {
            [arg] if arg.is_one() => Some(SymExpr::zero()),
            _ => None,
        }
    })?;

    step_collector.push(Step::LnOne);
    Some(opt)
}

/// `sqrt(n) = m` when `n` is a perfect-square rational with square root `m`.
pub fn sqrt_perfect_square(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, "sqrt", |args| {
        let [arg] = args else { return None; };
        let value = arg.as_number()?;
        if value < 0 {
            return None;
        }

        let (numer, denom) = value.into_numer_denom();
        let numer_root = numer.sqrt_rem(rug::Integer::new());
        let denom_root = denom.sqrt_rem(rug::Integer::new());
        if numer_root.1.is_zero() && denom_root.1.is_zero() {
            Some(SymExpr::from_number(Rational::from((numer_root.0, denom_root.0))))
        } else {
            None
        }
    })?;

    step_collector.push(Step::EvaluateSqrt);
    Some(opt)
}

/// Applies all known-function rules.
///
/// All known-function rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    call_at_zero(expr, step_collector)
        .or_else(|| ln_one(expr, step_collector))
        .or_else(|| sqrt_perfect_square(expr, step_collector))
}
