//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Store timeout must be between 1 and 60000 ms")]
    InvalidTimeout,

    #[error("Retention must be at least one day")]
    InvalidRetention,

    #[error("Report window must be between one day and the retention period")]
    InvalidReportWindow,

    #[error("Minimum hour samples must be at least 1")]
    InvalidMinHourSamples,

    #[error("UTC offset must be within +/-14 hours")]
    InvalidUtcOffset,
}
