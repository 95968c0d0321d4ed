//! Curve construction and query errors.

use crate::types::{InterpolationError, PricingError};
use thiserror::Error;

/// Failure to build or query a yield curve.
///
/// ```
/// use pricer_core::market_data::MarketDataError;
///
/// let err = MarketDataError::UnorderedTimes { start: 2.0, end: 1.0 };
/// assert_eq!(err.to_string(), "Curve query from t = 2 to t = 1 runs backwards");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Maturity before the curve origin, or a non-positive pillar.
    #[error("Invalid maturity: t = {t}")]
    InvalidMaturity {
        /// Offending year fraction.
        t: f64,
    },

    /// Forward query whose end does not come after its start.
    #[error("Curve query from t = {start} to t = {end} runs backwards")]
    UnorderedTimes {
        /// Period start.
        start: f64,
        /// Period end.
        end: f64,
    },

    /// Discount factor with no real zero rate.
    #[error("Non-positive discount factor {df} at t = {t}")]
    NonPositiveDiscount {
        /// Maturity.
        t: f64,
        /// Discount factor found there.
        df: f64,
    },

    /// Pillar data rejected by the interpolator.
    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),
}

impl From<MarketDataError> for PricingError {
    fn from(err: MarketDataError) -> Self {
        PricingError::ModelFailure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_positive_discount_display() {
        let err = MarketDataError::NonPositiveDiscount { t: 3.0, df: -0.5 };
        assert_eq!(err.to_string(), "Non-positive discount factor -0.5 at t = 3");
    }

    #[test]
    fn test_converts_to_model_failure() {
        let err: PricingError = MarketDataError::InvalidMaturity { t: -0.5 }.into();
        assert_eq!(err.to_string(), "Model failure: Invalid maturity: t = -0.5");
    }
}
