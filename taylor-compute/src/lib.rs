//! Exact Taylor-series solutions of ordinary differential equations.
//!
//! This crate computes the Taylor-series coefficients of the solution to an ODE — scalar
//! first-order, scalar m-th order, or a coupled pair of first-order equations — directly from the
//! equation's right-hand side and initial conditions, without requiring a closed-form solution.
//! Coefficients are exact: arbitrary-precision rationals, or expressions over symbolic constants
//! such as the imaginary unit `i`.
//!
//! The entry points live in the [`solve`] module, one per equation shape:
//!
//! ```
//! use taylor_compute::solve::{solve_first_order, FirstOrderOde};
//! use taylor_compute::symbolic::SymExpr;
//! use taylor_parser::Parser;
//! use taylor_parser::parser::expr::Expr;
//!
//! fn parse(input: &str) -> SymExpr {
//!     Parser::new(input).try_parse_full::<Expr>().unwrap().into()
//! }
//!
//! // y' = y, y(0) = 1, expanded about 0 up to degree 4
//! let ode = FirstOrderOde {
//!     var: "x".to_string(),
//!     func: "y".to_string(),
//!     rhs: parse("y"),
//!     init: parse("1"),
//!     center: parse("0"),
//!     truncation: 4,
//! };
//! let series = solve_first_order(&ode).unwrap();
//! assert_eq!(series.coeff(3).unwrap(), &parse("1/6"));
//! ```
//!
//! Each solve first attempts a closed-form solution (the [`solve::exact`] fast path) and falls
//! back to the coefficient recurrence in [`solve::recurrence`]; the two paths agree exactly
//! wherever both succeed.

pub mod primitive;
pub mod series;
pub mod solve;
pub mod symbolic;
