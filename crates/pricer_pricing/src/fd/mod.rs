//! One-factor finite-difference machinery.
//!
//! A log-uniform price grid, a time grid hitting every ex-dividend date,
//! a theta scheme on the Black-Scholes operator and step conditions
//! applied after each backward step.

mod error;
mod grid;
mod operator;
mod scheme;
mod solver;
mod step_condition;
mod time_grid;

pub use error::FdError;
pub use grid::{interpolate_on_grid, FdGrid};
pub use operator::{solve_tridiagonal_inplace, BlackScholesOperator};
pub use scheme::{stable_time_step, FdScheme, ThetaStepper};
pub use solver::rollback;
pub use step_condition::{DividendCondition, NullCondition, ShoutCondition, StepCondition};
pub use time_grid::TimeGrid;
