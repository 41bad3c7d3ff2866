//! Simplification rules for expressions involving multiplication, including combining like
//! factors.

use crate::primitive::rat;
use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::do_multiply, step::Step},
    step_collector::StepCollector,
};

/// `(a * b) * c = a * b * c`
///
/// Rules can produce products nested inside products; flattening restores the canonical n-ary
/// form the other multiplication rules expect.
pub fn flatten_factors(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if !factors.iter().any(|factor| matches!(factor, SymExpr::Mul(_))) {
            return None;
        }

        let mut new_factors = Vec::with_capacity(factors.len());
        for factor in factors {
            match factor {
                SymExpr::Mul(inner) => new_factors.extend(inner.iter().cloned()),
                other => new_factors.push(other.clone()),
            }
        }
        Some(SymExpr::Mul(new_factors).downgrade())
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::FlattenFactors);
    Some(opt)
}

/// `0*a = 0`
/// `a*0 = 0`
pub fn multiply_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if factors.iter().any(|factor| factor.is_zero()) {
            Some(SymExpr::zero())
        } else {
            None
        }
    })?;

    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// `1*a = a`
/// `a*1 = a`
pub fn multiply_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let new_factors = factors.iter()
            .filter(|factor| !factor.is_one())
            .cloned()
            .collect::<Vec<_>>();

        if new_factors.len() == factors.len() {
            None
        } else {
            Some(SymExpr::Mul(new_factors).downgrade())
        }
    })?;

    step_collector.push(Step::MultiplyOne);
    Some(opt)
}

/// `2 * a * 3 = 6 * a`
///
/// Numeric factors are multiplied exactly with rational arithmetic; this also reduces numeric
/// fractions, since `3 * 12^-1` has already been folded to `1/4` at construction time.
pub fn multiply_numbers(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let numeric = factors.iter().filter(|factor| factor.as_number().is_some()).count();
        if numeric < 2 {
            return None;
        }

        let mut product = rat(1);
        let mut new_factors = Vec::with_capacity(factors.len() - numeric + 1);
        for factor in factors {
            match factor.as_number() {
                Some(value) => product *= value,
                None => new_factors.push(factor.clone()),
            }
        }
        new_factors.push(SymExpr::from_number(product));
        Some(SymExpr::Mul(new_factors).downgrade())
    })?;

    step_collector.push(Step::MultiplyNumbers);
    Some(opt)
}

/// Combines like factors.
///
/// `a^b*a^c = a^(b+c)`
/// `a*a = a^2`
/// etc.
pub fn combine_like_factors(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let mut new_factors = factors.to_vec();
        let mut current_factor_idx = 0;

        /// Utility function to extract the base and exponent of an expression. If the expression
        /// is not [`SymExpr::Exp`], the exponent is `1`.
        ///
        /// - `a^b` -> `(a, b)`
        /// - `a` -> `(a, 1)`
        fn get_exp(expr: &SymExpr) -> (SymExpr, SymExpr) {
            match expr {
                SymExpr::Exp(lhs, rhs) => (*lhs.clone(), *rhs.clone()),
                expr => (expr.clone(), SymExpr::one()),
            }
        }

        // this is O(n^2) worst case, due to scanning the whole vec for each factor
        while current_factor_idx < new_factors.len() {
            // leave plain numbers to `multiply_numbers`, and sums to the distributive rules
            // (combining equal sum bases into a power here would undo their expansion)
            if new_factors[current_factor_idx].as_number().is_some()
                || matches!(new_factors[current_factor_idx], SymExpr::Add(_)) {
                current_factor_idx += 1;
                continue;
            }

            let (current_base, mut current_exp) = get_exp(&new_factors[current_factor_idx]);

            // look at every factor after `current_factor`
            let mut next_factor_idx = current_factor_idx + 1;
            let mut combined = false;
            while next_factor_idx < new_factors.len() {
                let (next_base, next_exp) = get_exp(&new_factors[next_factor_idx]);

                // bases must be strictly equal
                if current_base == next_base {
                    // if they are, apply a^b*a^c = a^(b+c)
                    current_exp += next_exp;
                    new_factors.swap_remove(next_factor_idx);
                    combined = true;
                } else {
                    next_factor_idx += 1;
                }
            }

            if combined {
                if current_exp.is_one() {
                    new_factors[current_factor_idx] = current_base;
                } else {
                    new_factors[current_factor_idx] = SymExpr::Exp(
                        Box::new(current_base),
                        Box::new(current_exp),
                    );
                }
            }

            current_factor_idx += 1;
        }

        if new_factors.len() == factors.len() {
            None
        } else {
            Some(SymExpr::Mul(new_factors).downgrade())
        }
    })?;

    step_collector.push(Step::CombineLikeFactors);
    Some(opt)
}

/// Applies all multiplication rules.
///
/// All multiplication rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    flatten_factors(expr, step_collector)
        .or_else(|| multiply_zero(expr, step_collector))
        .or_else(|| multiply_one(expr, step_collector))
        .or_else(|| multiply_numbers(expr, step_collector))
        .or_else(|| combine_like_factors(expr, step_collector))
}
