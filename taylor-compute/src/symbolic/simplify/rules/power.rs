//! Simplification rules for power expressions.

use crate::primitive::rat;
use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::do_power, step::Step},
    step_collector::StepCollector,
};
use rug::Rational;

/// `a^0 = 1`
pub fn power_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |_, rhs| {
        if rhs.is_zero() {
            Some(SymExpr::one())
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::PowerZero);
    Some(opt)
}

/// `a^1 = a`
pub fn power_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if rhs.is_one() {
            Some(lhs.clone())
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerOne);
    Some(opt)
}

/// `1^a = 1`
pub fn one_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, _| {
        if lhs.is_one() {
            Some(SymExpr::one())
        } else {
            None
        }
    })?;

    step_collector.push(Step::OnePower);
    Some(opt)
}

/// `0^a = 0` for positive numeric `a`
pub fn zero_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if lhs.is_zero() && rhs.as_number().map(|n| n > 0).unwrap_or(false) {
            Some(SymExpr::zero())
        } else {
            None
        }
    })?;

    step_collector.push(Step::ZeroPower);
    Some(opt)
}

/// `(a^b)^c = a^(b*c)` for integer `c`
pub fn power_of_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if let SymExpr::Exp(base, exp) = lhs {
            if rhs.is_integer() {
                return Some(SymExpr::Exp(
                    base.clone(),
                    Box::new(*exp.clone() * rhs.clone()),
                ));
            }
        }

        None
    })?;

    step_collector.push(Step::PowerOfPower);
    Some(opt)
}

/// `2^3 = 8`, `2^-1 = 1/2`, `(2/3)^2 = 4/9`
///
/// Evaluates numeric bases raised to integer exponents exactly.
pub fn evaluate_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let base = lhs.as_number()?;
        let exp = rhs.as_integer()?;

        // `a^0` and `0^a` are handled by the rules above
        if base == 0 {
            return None;
        }

        let power = exp.clone().abs().to_u32()?;
        let mut value = rat(1);
        for _ in 0..power {
            value *= &base;
        }
        if *exp < 0 {
            value = Rational::from((value.denom().clone(), value.numer().clone()));
        }
        Some(SymExpr::from_number(value))
    })?;

    step_collector.push(Step::EvaluatePower);
    Some(opt)
}

/// Applies all power rules.
///
/// All power rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    power_zero(expr, step_collector)
        .or_else(|| power_one(expr, step_collector))
        .or_else(|| one_power(expr, step_collector))
        .or_else(|| zero_power(expr, step_collector))
        .or_else(|| power_of_power(expr, step_collector))
        .or_else(|| evaluate_power(expr, step_collector))
}
