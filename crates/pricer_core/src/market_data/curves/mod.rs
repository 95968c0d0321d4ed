//! Discount curves.
//!
//! [`YieldCurve`] is the only interface engines and indices see; curves are
//! shared behind `Arc<dyn YieldCurve<f64> + Send + Sync>`. [`FlatCurve`] holds
//! one rate and [`InterpolatedCurve`] interpolates zero rates or log discount
//! factors between pillars.

mod flat;
mod interpolated;
mod traits;

pub use flat::FlatCurve;
pub use interpolated::{CurveInterpolation, InterpolatedCurve};
pub use traits::YieldCurve;
