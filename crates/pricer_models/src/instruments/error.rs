//! Errors raised while building swaps and options.
//!
//! They surface to callers as [`PricingError`]; a malformed dividend
//! schedule maps to `NumericalInstability`, the rest to `InvalidInput`.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Rejected instrument terms.
///
/// ```
/// use pricer_models::instruments::InstrumentError;
/// use pricer_models::instruments::rates::BasisSwapType;
///
/// let err = BasisSwapType::try_from(2).unwrap_err();
/// assert_eq!(err, InstrumentError::UnknownSwapType { code: 2 });
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Strike is not a positive finite number.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Residual time is not a positive finite number.
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid residual time
        expiry: f64,
    },

    /// Nominal is unset or not finite.
    #[error("Invalid notional: N = {notional}")]
    InvalidNotional {
        /// The invalid notional value
        notional: f64,
    },

    /// Basis-swap type code other than 1 or -1.
    #[error("Unknown basis-swap type: {code}")]
    UnknownSwapType {
        /// The rejected integer code
        code: i32,
    },

    /// Ill-formed dividend schedule.
    #[error("Invalid dividend schedule: {message}")]
    DividendSchedule {
        /// Description of the ordering or range violation
        message: String,
    },

    /// Invalid parameter (general validation failure).
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// Description of the parameter error
        message: String,
    },
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        match err {
            InstrumentError::DividendSchedule { .. } => {
                PricingError::NumericalInstability(err.to_string())
            }
            InstrumentError::InvalidParameter { message } => PricingError::InvalidInput(message),
            other => PricingError::InvalidInput(other.to_string()),
        }
    }
}
