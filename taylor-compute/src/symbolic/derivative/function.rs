//! Symbolic derivatives of the known functions, with the chain rule applied to their arguments.

use crate::primitive::{int, rat};
use crate::symbolic::expr::{Primary, SymExpr};

use super::MultBuilder;
use super::derivative;
use super::SymbolicDerivativeError;

/// Builds a call expression with the given single argument.
fn call(name: &str, arg: SymExpr) -> SymExpr {
    SymExpr::Primary(Primary::Call(name.to_string(), vec![arg]))
}

/// Computes the derivative of a known function and applies the chain rule.
pub(super) fn function_derivative(func: &str, args: &[SymExpr], with: &str) -> Result<SymExpr, SymbolicDerivativeError> {
    let [arg] = args else {
        return Err(SymbolicDerivativeError::Unsupported);
    };

    let mut mult_group = MultBuilder::default();
    mult_group.mult(derivative(arg, with)?);

    match func {
        "sin" => {
            // sin(u)' = u' * cos(u)
            mult_group.mult(call("cos", arg.clone()));
        },
        "cos" => {
            // cos(u)' = u' * -1 * sin(u)
            mult_group.mult(SymExpr::Primary(Primary::Integer(int(-1))));
            mult_group.mult(call("sin", arg.clone()));
        },
        "exp" => {
            // exp(u)' = u' * exp(u)
            mult_group.mult(call("exp", arg.clone()));
        },
        "ln" => {
            // ln(u)' = u' * u^-1
            mult_group.mult(SymExpr::Exp(
                Box::new(arg.clone()),
                Box::new(SymExpr::Primary(Primary::Integer(int(-1)))),
            ));
        },
        "sqrt" => {
            // sqrt(u)' = u' * 1/2 * u^(-1/2)
            mult_group.mult(SymExpr::Primary(Primary::Rational(rat((1, 2)))));
            mult_group.mult(SymExpr::Exp(
                Box::new(arg.clone()),
                Box::new(SymExpr::Primary(Primary::Rational(rat((-1, 2))))),
            ));
        },
        _ => {
            return Err(SymbolicDerivativeError::Unsupported);
        }
    };

    Ok(mult_group.into())
}
