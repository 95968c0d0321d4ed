//! Market inputs consumed by indices and engines.
//!
//! Only discount curves live here. A curve is queried either by year
//! fraction from its origin or, through [`YieldCurve::discount_on`], by a
//! pair of dates with Act/365 year fractions.
//!
//! ```
//! use pricer_core::market_data::{FlatCurve, YieldCurve};
//! use pricer_core::types::Date;
//!
//! let curve = FlatCurve::new(0.05_f64);
//! let today = Date::from_ymd(2024, 1, 10).unwrap();
//! let pay = Date::from_ymd(2025, 1, 9).unwrap();
//! let df = curve.discount_on(today, pay).unwrap();
//! assert!((df - (-0.05_f64).exp()).abs() < 1e-12);
//! ```

pub mod curves;
pub mod error;

pub use curves::{CurveInterpolation, FlatCurve, InterpolatedCurve, YieldCurve};
pub use error::MarketDataError;
