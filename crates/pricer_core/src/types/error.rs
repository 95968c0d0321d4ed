//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors raised while validating, calculating or reading instrument results
//! - `DateError`: Errors from date construction and parsing
//! - `InterpolationError`: Errors from interpolation operations

use thiserror::Error;

/// Categorised pricing errors.
///
/// Every failure an instrument or engine can report while being valued is
/// mapped onto one of these variants.
///
/// # Variants
/// - `InvalidInput`: Argument validation failed (array lengths, missing nominal, bad dates)
/// - `NotAvailable`: A result was requested but the engine did not provide it
/// - `UnsupportedInstrument`: The attached engine does not understand the instrument
/// - `NumericalInstability`: The numerical scheme produced non-finite or inconsistent values
/// - `ModelFailure`: A model or market-data lookup failed during calculation
/// - `MissingEngine`: No pricing engine has been attached
/// - `MissingFixing`: A historic index fixing required for a coupon is absent
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("Negative spot price".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: Negative spot price");
///
/// let err = PricingError::NotAvailable("fair spread".to_string());
/// assert_eq!(format!("{}", err), "fair spread not available");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Invalid input data or parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Requested result was not produced
    #[error("{0} not available")]
    NotAvailable(String),

    /// Instrument type not supported by the attached engine
    #[error("Unsupported instrument: {0}")]
    UnsupportedInstrument(String),

    /// Numerical instability during computation
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),

    /// Model failed to produce valid result
    #[error("Model failure: {0}")]
    ModelFailure(String),

    /// No pricing engine attached
    #[error("Null pricing engine for {0}")]
    MissingEngine(String),

    /// Historic fixing missing for an index
    #[error("Missing {index} fixing for {date}")]
    MissingFixing {
        /// Index name
        index: String,
        /// Fixing date (ISO 8601)
        date: String,
    },
}

/// Date-related errors.
///
/// # Variants
/// - `InvalidDate`: Invalid date components (e.g., February 30th)
/// - `ParseError`: Failed to parse date string
/// - `Overflow`: Date arithmetic left the representable range
///
/// # Examples
/// ```
/// use pricer_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string.
    #[error("Date parse error: {0}")]
    ParseError(String),

    /// Date arithmetic overflow.
    #[error("Date arithmetic overflow: {0}")]
    Overflow(String),
}

impl From<DateError> for PricingError {
    fn from(err: DateError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

/// Interpolation-related errors.
///
/// # Examples
/// ```
/// use pricer_core::types::InterpolationError;
///
/// let err = InterpolationError::OutOfBounds { x: 5.0, min: 0.0, max: 3.0 };
/// assert!(format!("{}", err).contains("outside valid domain"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpolationError {
    /// Query point outside valid interpolation domain.
    #[error("Query point {x} outside valid domain [{min}, {max}]")]
    OutOfBounds {
        /// The query point that was out of bounds
        x: f64,
        /// Minimum valid value
        min: f64,
        /// Maximum valid value
        max: f64,
    },

    /// Insufficient data points for interpolation.
    #[error("Insufficient data points: got {got}, need at least {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Data is not strictly increasing where it must be.
    #[error("Data is not monotonic at index {index}")]
    NonMonotonicData {
        /// Index where monotonicity violation was detected
        index: usize,
    },

    /// Invalid input data or parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<InterpolationError> for PricingError {
    fn from(err: InterpolationError) -> Self {
        match err {
            InterpolationError::NonMonotonicData { .. } => {
                PricingError::NumericalInstability(err.to_string())
            }
            other => PricingError::InvalidInput(other.to_string()),
        }
    }
}
