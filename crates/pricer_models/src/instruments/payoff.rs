//! Plain-vanilla payoffs.

use std::fmt;
use std::str::FromStr;

use super::error::InstrumentError;

/// Type of option payoff.
///
/// # Examples
/// ```
/// use pricer_models::instruments::PayoffType;
///
/// assert_eq!(PayoffType::Call.evaluate(110.0, 100.0), 10.0);
/// assert_eq!(PayoffType::Put.evaluate(110.0, 100.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PayoffType {
    /// max(S - K, 0)
    Call,
    /// max(K - S, 0)
    Put,
}

impl PayoffType {
    /// Intrinsic value at `spot`.
    #[inline]
    pub fn evaluate(&self, spot: f64, strike: f64) -> f64 {
        match self {
            PayoffType::Call => (spot - strike).max(0.0),
            PayoffType::Put => (strike - spot).max(0.0),
        }
    }

    /// Slope of the payoff far from the strike on the side of `spot`.
    #[inline]
    pub fn slope(&self, spot: f64, strike: f64) -> f64 {
        match self {
            PayoffType::Call if spot > strike => 1.0,
            PayoffType::Put if spot < strike => -1.0,
            _ => 0.0,
        }
    }
}

impl fmt::Display for PayoffType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayoffType::Call => write!(f, "Call"),
            PayoffType::Put => write!(f, "Put"),
        }
    }
}

impl FromStr for PayoffType {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(PayoffType::Call),
            "put" | "p" => Ok(PayoffType::Put),
            _ => Err(InstrumentError::InvalidParameter {
                message: format!("unknown option type '{}'", s),
            }),
        }
    }
}
