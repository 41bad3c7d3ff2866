//! Simplification rules for expressions involving addition, including combining like terms.

use crate::primitive::rat;
use crate::symbolic::{
    expr::SymExpr,
    simplify::{fraction::split_coefficient, rules::do_add, step::Step},
    step_collector::StepCollector,
};

/// `(a + b) + c = a + b + c`
///
/// Rules can produce sums nested inside sums; flattening restores the canonical n-ary form the
/// other addition rules expect.
pub fn flatten_terms(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        if !terms.iter().any(|term| matches!(term, SymExpr::Add(_))) {
            return None;
        }

        let mut new_terms = Vec::with_capacity(terms.len());
        for term in terms {
            match term {
                SymExpr::Add(inner) => new_terms.extend(inner.iter().cloned()),
                other => new_terms.push(other.clone()),
            }
        }
        Some(SymExpr::Add(new_terms).downgrade())
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::FlattenTerms);
    Some(opt)
}

/// `0+a = a`
/// `a+0 = a`
pub fn add_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let new_terms = terms.iter()
            .filter(|term| !term.is_zero())
            .cloned()
            .collect::<Vec<_>>();

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(SymExpr::Add(new_terms).downgrade())
        }
    })?;

    step_collector.push(Step::AddZero);
    Some(opt)
}

/// `2 + a + 3 = 5 + a`
///
/// Numeric terms are summed exactly with rational arithmetic; this also covers fraction addition
/// such as `1/2 + 1/3 = 5/6`.
pub fn add_numbers(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let numeric = terms.iter().filter(|term| term.as_number().is_some()).count();
        if numeric < 2 {
            return None;
        }

        let mut sum = rat(0);
        let mut new_terms = Vec::with_capacity(terms.len() - numeric + 1);
        for term in terms {
            match term.as_number() {
                Some(value) => sum += value,
                None => new_terms.push(term.clone()),
            }
        }
        new_terms.push(SymExpr::from_number(sum));
        Some(SymExpr::Add(new_terms).downgrade())
    })?;

    step_collector.push(Step::AddNumbers);
    Some(opt)
}

/// Combines like terms.
///
/// `a+a = 2a`
/// `a+a+a = 3a`
/// `2a+3a = 5a`
/// etc.
pub fn combine_like_terms(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let mut new_terms = terms.to_vec();
        let mut current_term_idx = 0;

        // this is O(n^2) worst case, due to scanning the whole vec for each term
        while current_term_idx < new_terms.len() {
            let (mut current_coeff, current_factors) = split_coefficient(&new_terms[current_term_idx]);

            // look at every term after `current_term`
            let mut next_term_idx = current_term_idx + 1;
            while next_term_idx < new_terms.len() {
                let (next_coeff, next_factors) = split_coefficient(&new_terms[next_term_idx]);

                // factors must be strictly equal
                if current_factors == next_factors {
                    // if so, apply a*n + a*m = (n+m)*a
                    current_coeff += next_coeff;
                    new_terms.swap_remove(next_term_idx);
                } else {
                    next_term_idx += 1;
                }
            }

            if current_coeff == 1 {
                new_terms[current_term_idx] = current_factors;
            } else {
                new_terms[current_term_idx] =
                    SymExpr::from_number(current_coeff) * current_factors;
            }

            current_term_idx += 1;
        }

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(SymExpr::Add(new_terms).downgrade())
        }
    })?;

    step_collector.push(Step::CombineLikeTerms);
    Some(opt)
}

/// Applies all addition rules.
///
/// All addition rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    flatten_terms(expr, step_collector)
        .or_else(|| add_zero(expr, step_collector))
        .or_else(|| add_numbers(expr, step_collector))
        .or_else(|| combine_like_terms(expr, step_collector))
}
