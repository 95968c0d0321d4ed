//! CLI error type.

use pricer_core::types::PricingError;
use thiserror::Error;

use crate::config::ConfigError;

/// Everything that can stop a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Bad or unreadable configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Instrument construction or valuation failed.
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Invalid command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result alias used by every command.
pub type Result<T> = std::result::Result<T, CliError>;
