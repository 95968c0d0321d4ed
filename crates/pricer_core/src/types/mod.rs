//! Core time and error types.
//!
//! This module provides:
//! - `time`: Date, DayCountConvention, BusinessDayConvention
//! - `evaluation`: the shared, observable evaluation date
//! - `error`: Structured error types for pricing, date and interpolation operations
//!
//! # Re-exports
//!
//! - [`Date`], [`DayCountConvention`], [`BusinessDayConvention`], [`time_to_maturity_dates`] from `time`
//! - [`EvaluationDate`] from `evaluation`
//! - [`PricingError`], [`DateError`], [`InterpolationError`] from `error`

pub mod error;
pub mod evaluation;
pub mod time;

pub use error::{DateError, InterpolationError, PricingError};
pub use evaluation::EvaluationDate;
pub use time::{time_to_maturity_dates, BusinessDayConvention, Date, DayCountConvention};

/// One basis point, the unit in which spread sensitivities are quoted.
pub const BASIS_POINT: f64 = 1.0e-4;
