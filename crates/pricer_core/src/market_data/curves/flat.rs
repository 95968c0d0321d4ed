//! Constant-rate curve.

use super::YieldCurve;
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Single continuously compounded rate for all maturities.
///
/// The usual discounting and forecasting curve in tests and the CLI.
///
/// ```
/// use pricer_core::market_data::curves::{FlatCurve, YieldCurve};
///
/// let curve = FlatCurve::new(0.02_f64);
/// assert!((curve.discount_factor(2.0).unwrap() - (-0.04_f64).exp()).abs() < 1e-14);
/// assert_eq!(curve.zero_rate(7.0).unwrap(), 0.02);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatCurve<T: Float> {
    rate: T,
}

impl<T: Float> FlatCurve<T> {
    /// Curve at `rate`.
    #[inline]
    pub fn new(rate: T) -> Self {
        Self { rate }
    }

    /// Rate of the curve.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    fn check(t: T) -> Result<(), MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(())
    }
}

impl<T: Float> YieldCurve<T> for FlatCurve<T> {
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        Self::check(t)?;
        Ok((-self.rate * t).exp())
    }

    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(self.rate)
    }

    fn forward_discount(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        Self::check(t1)?;
        if t2 < t1 {
            return Err(MarketDataError::UnorderedTimes {
                start: t1.to_f64().unwrap_or(f64::NAN),
                end: t2.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok((-self.rate * (t2 - t1)).exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_forward_equals_rate() {
        let curve = FlatCurve::new(0.035_f64);
        assert_relative_eq!(curve.forward_rate(0.5, 3.0).unwrap(), 0.035, epsilon = 1e-12);
        assert_relative_eq!(
            curve.forward_discount(1.0, 3.0).unwrap(),
            curve.discount_factor(3.0).unwrap() / curve.discount_factor(1.0).unwrap(),
            epsilon = 1e-15
        );
        assert_eq!(curve.discount_factor(0.0).unwrap(), 1.0);
    }

    #[test]
    fn test_negative_times_rejected() {
        let curve = FlatCurve::new(0.01_f32);
        assert!(curve.discount_factor(-0.1).is_err());
        assert!(curve.forward_discount(-1.0, 1.0).is_err());
        assert!(curve.forward_discount(2.0, 1.0).is_err());
    }
}
