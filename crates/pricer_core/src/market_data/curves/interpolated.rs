//! Interpolated yield curve implementation.

use super::YieldCurve;
use crate::market_data::error::MarketDataError;
use crate::math::interpolators::{Interpolator, LinearInterpolator};
use num_traits::Float;

/// Interpolation method for yield curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveInterpolation {
    /// Linear interpolation on zero rates.
    Linear,
    /// Linear interpolation on log discount factors (piecewise flat forwards).
    LogLinear,
}

/// Yield curve built from (tenor, zero rate) pillars.
///
/// Beyond the pillars the end zero rates are held flat.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{YieldCurve, InterpolatedCurve, CurveInterpolation};
///
/// let curve = InterpolatedCurve::new(
///     &[0.5, 1.0, 2.0],
///     &[0.02, 0.025, 0.03],
///     CurveInterpolation::LogLinear,
/// ).unwrap();
///
/// let df = curve.discount_factor(0.75).unwrap();
/// assert!(df < 1.0 && df > 0.98);
/// ```
#[derive(Debug, Clone)]
pub struct InterpolatedCurve<T: Float> {
    rates: LinearInterpolator<T>,
    log_dfs: LinearInterpolator<T>,
    method: CurveInterpolation,
}

impl<T: Float> InterpolatedCurve<T> {
    /// Builds a curve from strictly increasing, positive tenors.
    pub fn new(
        tenors: &[T],
        rates: &[T],
        method: CurveInterpolation,
    ) -> Result<Self, MarketDataError> {
        if let Some(&t) = tenors.iter().find(|&&t| t <= T::zero()) {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        let log_dfs: Vec<T> = tenors
            .iter()
            .zip(rates.iter())
            .map(|(&t, &r)| -r * t)
            .collect();
        Ok(Self {
            rates: LinearInterpolator::new(tenors, rates)?,
            log_dfs: LinearInterpolator::new(tenors, &log_dfs)?,
            method,
        })
    }

    /// Interpolation method.
    #[inline]
    pub fn method(&self) -> CurveInterpolation {
        self.method
    }

    fn zero_rate_at(&self, t: T) -> T {
        let (t_min, t_max) = self.rates.domain();
        if t <= t_min || t >= t_max || self.method == CurveInterpolation::Linear {
            return self.rates.interpolate_flat(t);
        }
        -self.log_dfs.interpolate_flat(t) / t
    }
}

impl<T: Float> YieldCurve<T> for InterpolatedCurve<T> {
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        if t == T::zero() {
            return Ok(T::one());
        }
        Ok((-self.zero_rate_at(t) * t).exp())
    }
}
