//! Finite-difference error types.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Failures while building or rolling back a finite-difference grid.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FdError {
    /// Price coordinates not strictly increasing.
    #[error("Grid coordinates not strictly increasing at node {index}")]
    NonMonotoneGrid {
        /// First offending node
        index: usize,
    },

    /// NaN or infinity appeared in the option values.
    #[error("Non-finite value at node {node} for t = {time}")]
    NonFinite {
        /// Offending node
        node: usize,
        /// Time of the layer
        time: f64,
    },

    /// Zero pivot in the tridiagonal solve.
    #[error("Singular tridiagonal system at row {row}")]
    SingularSystem {
        /// Row of the zero pivot
        row: usize,
    },

    /// Inconsistent grid or time-grid setup.
    #[error("Invalid finite-difference setup: {0}")]
    InvalidSetup(String),
}

impl From<FdError> for PricingError {
    fn from(err: FdError) -> Self {
        match err {
            FdError::InvalidSetup(msg) => PricingError::InvalidInput(msg),
            other => PricingError::NumericalInstability(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numerical_failures_map_to_instability() {
        let err: PricingError = FdError::SingularSystem { row: 3 }.into();
        assert_eq!(
            err,
            PricingError::NumericalInstability("Singular tridiagonal system at row 3".to_string())
        );
    }

    #[test]
    fn test_setup_maps_to_invalid_input() {
        let err: PricingError = FdError::InvalidSetup("no steps".to_string()).into();
        assert!(matches!(err, PricingError::InvalidInput(_)));
    }
}
