//! # pricer_core: Valuation Foundation
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the pricer workspace, providing:
//! - The lazy instrument/engine contract (`traits::instrument`, `traits::engine`)
//! - Change notification for cache invalidation (`traits::observable`)
//! - Time types: `Date`, `DayCountConvention`, `BusinessDayConvention`, `EvaluationDate` (`types`)
//! - Error types: `PricingError`, `DateError`, `InterpolationError` (`types::error`)
//! - Yield curves (`market_data::curves`)
//! - Linear interpolation (`math::interpolators`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Date arithmetic
//! - thiserror: Error derivation
//! - tracing: Diagnostics from the calculation protocol
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::market_data::curves::{FlatCurve, YieldCurve};
//! use pricer_core::types::{Date, DayCountConvention};
//!
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let end = Date::from_ymd(2024, 7, 1).unwrap();
//! let year_fraction = DayCountConvention::ActualActual365.year_fraction_dates(start, end);
//!
//! let curve = FlatCurve::new(0.03_f64);
//! let df = curve.discount_on(start, end).unwrap();
//! # assert_eq!(df, curve.discount_factor(year_fraction).unwrap());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for Date, DayCountConvention, BusinessDayConvention

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod traits;
pub mod types;
