//! Simplify expressions to a canonical form.
//!
//! Simplification works by applying a set of rewrite rules to the expression in multiple passes.
//! Children are simplified first, so each rule can assume its operands are already in canonical
//! form; whenever a rule fires, the resulting expression is simplified again, since a rewrite at
//! one level can expose opportunities at another.
//!
//! The individual rules live in the [`rules`] module. They are grouped by the operation they
//! apply to (addition, multiplication, powers, distribution, the imaginary unit, and known
//! function values), and each one either returns the rewritten expression or `None` if it does
//! not apply.

pub mod fraction;
pub mod rules;
pub mod step;

use super::expr::{Primary, SymExpr};
use super::step_collector::StepCollector;
pub use step::Step;

/// Simplify the given expression, discarding the steps taken.
pub fn simplify(expr: &SymExpr) -> SymExpr {
    simplify_with(expr, &mut ())
}

/// Simplify the given expression, reporting each applied rule to the given step collector.
pub fn simplify_with(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> SymExpr {
    // simplify the children first, so that rules see canonical operands
    let expr = match expr {
        SymExpr::Primary(Primary::Call(name, args)) => SymExpr::Primary(Primary::Call(
            name.clone(),
            args.iter().map(|arg| simplify_with(arg, step_collector)).collect(),
        )),
        SymExpr::Primary(primary) => SymExpr::Primary(primary.clone()),
        SymExpr::Add(terms) => {
            let mut sum = SymExpr::Add(Vec::with_capacity(terms.len()));
            for term in terms {
                // `+=` flattens nested sums as it goes
                sum += simplify_with(term, step_collector);
            }
            sum.downgrade()
        },
        SymExpr::Mul(factors) => {
            let mut product = SymExpr::Mul(Vec::with_capacity(factors.len()));
            for factor in factors {
                product *= simplify_with(factor, step_collector);
            }
            product.downgrade()
        },
        SymExpr::Exp(base, exp) => SymExpr::Exp(
            Box::new(simplify_with(base, step_collector)),
            Box::new(simplify_with(exp, step_collector)),
        ),
    };

    // then apply rules at this level until none fire
    match rules::all(&expr, step_collector) {
        Some(new) => simplify_with(&new.downgrade(), step_collector),
        None => expr,
    }
}

#[cfg(test)]
mod tests {
    use crate::primitive::{int, rat};
    use taylor_parser::Parser;
    use taylor_parser::parser::expr::Expr as AstExpr;
    use pretty_assertions::assert_eq;
    use super::*;

    /// Parse and simplify the given expression.
    fn simplify_expr(input: &str) -> SymExpr {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        simplify(&SymExpr::from(expr))
    }

    #[test]
    fn combine_terms() {
        assert_eq!(simplify_expr("x + x + x"), SymExpr::Mul(vec![
            SymExpr::Primary(Primary::Integer(int(3))),
            SymExpr::Primary(Primary::Symbol("x".to_string())),
        ]));
    }

    #[test]
    fn fold_fractions() {
        assert_eq!(
            simplify_expr("1/2 + 1/3"),
            SymExpr::Primary(Primary::Rational(rat((5, 6)))),
        );
    }

    #[test]
    fn zero_sum() {
        assert_eq!(simplify_expr("x - x"), SymExpr::zero());
    }

    #[test]
    fn multiply_by_zero() {
        assert_eq!(simplify_expr("0 * (x + y^2)"), SymExpr::zero());
    }

    #[test]
    fn combine_factors() {
        assert_eq!(simplify_expr("x * x^2"), SymExpr::Exp(
            Box::new(SymExpr::Primary(Primary::Symbol("x".to_string()))),
            Box::new(SymExpr::Primary(Primary::Integer(int(3)))),
        ));
    }

    #[test]
    fn numeric_powers() {
        assert_eq!(simplify_expr("2^10"), SymExpr::Primary(Primary::Integer(int(1024))));
        assert_eq!(simplify_expr("2^-2"), SymExpr::Primary(Primary::Rational(rat((1, 4)))));
        assert_eq!(simplify_expr("(2/3)^2"), SymExpr::Primary(Primary::Rational(rat((4, 9)))));
    }

    #[test]
    fn expand_binomial_difference() {
        // `(x + 1)^2` and `x^2 + 2x + 1` are semantically equal, so the difference must
        // simplify to the zero expression
        assert_eq!(simplify_expr("(x + 1) * (x + 1) - (x^2 + 2x + 1)"), SymExpr::zero());
    }

    #[test]
    fn imaginary_powers() {
        assert_eq!(simplify_expr("i^2"), SymExpr::Primary(Primary::Integer(int(-1))));
        assert_eq!(simplify_expr("i^2 * i^3 - i"), SymExpr::zero());
    }

    #[test]
    fn known_function_values() {
        assert_eq!(simplify_expr("sin(0) + cos(0) + exp(0)"), SymExpr::Primary(Primary::Integer(int(2))));
        assert_eq!(simplify_expr("ln(1)"), SymExpr::zero());
        assert_eq!(simplify_expr("sqrt(49/4)"), SymExpr::Primary(Primary::Rational(rat((7, 2)))));
    }

    #[test]
    fn function_arguments_are_simplified() {
        assert_eq!(simplify_expr("sin(x - x)"), SymExpr::zero());
    }
}
