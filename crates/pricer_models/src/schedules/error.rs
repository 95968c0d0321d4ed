//! Schedule and tenor errors.

use pricer_core::types::time::Date;
use pricer_core::types::PricingError;
use thiserror::Error;

/// Failure to parse a tenor or to build a schedule.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Start date must be before end date.
    #[error("Start date {start} must be before end date {end}")]
    InvalidDateRange {
        /// The start date.
        start: Date,
        /// The end date.
        end: Date,
    },

    /// Missing required field in builder.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Fewer than two boundary dates.
    #[error("Schedule needs at least two dates, got {got}")]
    NoPeriods {
        /// Number of dates supplied.
        got: usize,
    },

    /// Dates are not strictly increasing.
    #[error("Schedule date {date} at position {index} does not follow its predecessor")]
    NotIncreasing {
        /// Position of the offending date.
        index: usize,
        /// The offending date.
        date: Date,
    },

    /// Tenor text matching no known tenor.
    #[error("Unknown tenor: {input}")]
    UnknownTenor {
        /// Text as given.
        input: String,
    },

    /// Date arithmetic overflow.
    #[error("Date arithmetic overflow: {reason}")]
    DateOverflow {
        /// Reason for the overflow.
        reason: String,
    },
}

impl From<ScheduleError> for PricingError {
    fn from(err: ScheduleError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}
