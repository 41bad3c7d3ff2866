//! Error types for the solve entry points.

use crate::series::SubstitutionFailure;
use crate::symbolic::expr::SymExpr;

/// A defect in the solve request itself. Specification errors are always fatal to the individual
/// solve call and are never silently defaulted.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// The initial condition for the given derivative order is missing.
    MissingInitialCondition {
        /// The derivative order with no supplied value.
        order: usize,
    },

    /// An initial condition was supplied for a derivative order at or above the equation order.
    UnexpectedInitialCondition {
        /// The out-of-range derivative order.
        order: usize,
    },

    /// The equation order is zero; an ODE determines its unknown through at least one
    /// derivative.
    InvalidOrder,

    /// The right-hand side references a derivative the solver has not been told about, such as
    /// `y'` in a first-order equation or `y''` in a second-order one.
    UnknownDerivative {
        /// The offending derivative symbol.
        symbol: String,
    },

    /// An initial value or expansion point references the independent variable or an unknown
    /// function; both must be constants.
    NonConstantValue {
        /// The offending expression.
        expr: SymExpr,
    },

    /// The expansion/truncation machinery could not process the right-hand side, e.g. because it
    /// is not analytic at the expansion point.
    Substitution(SubstitutionFailure),
}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingInitialCondition { order } => {
                write!(f, "missing initial condition for derivative order {}", order)
            },
            Self::UnexpectedInitialCondition { order } => {
                write!(f, "initial condition supplied for derivative order {}, which is at or above the equation order", order)
            },
            Self::InvalidOrder => {
                write!(f, "the equation order must be at least 1")
            },
            Self::UnknownDerivative { symbol } => {
                write!(f, "the right-hand side references `{}`, a derivative of higher order than the equation", symbol)
            },
            Self::NonConstantValue { expr } => {
                write!(f, "`{}` is not a constant", expr)
            },
            Self::Substitution(failure) => {
                write!(f, "{}", failure)
            },
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Substitution(failure) => Some(failure),
            _ => None,
        }
    }
}

impl From<SubstitutionFailure> for SolveError {
    fn from(failure: SubstitutionFailure) -> Self {
        Self::Substitution(failure)
    }
}

/// The exact-solve fast path found no usable closed form.
///
/// This is an expected, recoverable signal: the caller falls back to the matching recurrence
/// solver, which handles every analytic right-hand side. It is never escalated into a
/// [`SolveError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoExactSolution;

impl std::fmt::Display for NoExactSolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "no closed-form solution was found")
    }
}

impl std::error::Error for NoExactSolution {}
