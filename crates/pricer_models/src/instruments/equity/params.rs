//! Single-asset option parameters.

use super::super::error::InstrumentError;
use super::super::payoff::PayoffType;

/// Contract and market inputs of a single-asset option.
///
/// Rates are continuously compounded; `residual_time` is in years.
///
/// # Examples
/// ```
/// use pricer_models::instruments::equity::OptionParams;
/// use pricer_models::instruments::PayoffType;
///
/// let params = OptionParams::new(PayoffType::Call, 100.0, 95.0, 0.0, 0.05, 1.0, 0.2);
/// assert!(params.validate().is_ok());
/// assert_eq!(params.intrinsic(110.0), 15.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionParams {
    /// Call or put.
    pub option_type: PayoffType,
    /// Spot price of the underlying.
    pub underlying: f64,
    /// Strike price.
    pub strike: f64,
    /// Continuous dividend yield.
    pub dividend_yield: f64,
    /// Continuous risk-free rate.
    pub risk_free_rate: f64,
    /// Time to maturity in years.
    pub residual_time: f64,
    /// Black-Scholes volatility.
    pub volatility: f64,
}

impl OptionParams {
    /// Bundles the inputs; call [`validate`](Self::validate) before use.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        option_type: PayoffType,
        underlying: f64,
        strike: f64,
        dividend_yield: f64,
        risk_free_rate: f64,
        residual_time: f64,
        volatility: f64,
    ) -> Self {
        Self {
            option_type,
            underlying,
            strike,
            dividend_yield,
            risk_free_rate,
            residual_time,
            volatility,
        }
    }

    /// Payoff at `spot`.
    #[inline]
    pub fn intrinsic(&self, spot: f64) -> f64 {
        self.option_type.evaluate(spot, self.strike)
    }

    /// Checks positivity and finiteness of every input.
    pub fn validate(&self) -> Result<(), InstrumentError> {
        if !(self.strike.is_finite() && self.strike > 0.0) {
            return Err(InstrumentError::InvalidStrike {
                strike: self.strike,
            });
        }
        if !(self.residual_time.is_finite() && self.residual_time > 0.0) {
            return Err(InstrumentError::InvalidExpiry {
                expiry: self.residual_time,
            });
        }
        if !(self.underlying.is_finite() && self.underlying > 0.0) {
            return Err(InstrumentError::InvalidParameter {
                message: format!("underlying must be positive, got {}", self.underlying),
            });
        }
        if !(self.volatility.is_finite() && self.volatility > 0.0) {
            return Err(InstrumentError::InvalidParameter {
                message: format!("volatility must be positive, got {}", self.volatility),
            });
        }
        if !(self.risk_free_rate.is_finite() && self.dividend_yield.is_finite()) {
            return Err(InstrumentError::InvalidParameter {
                message: "rates must be finite".to_string(),
            });
        }
        Ok(())
    }
}
