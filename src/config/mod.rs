//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CRAVING_SENTINEL` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use craving_sentinel::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Event logs stored in {}", config.store.data_dir.display());
//! ```

mod analysis;
mod error;
mod logging;
mod store;

pub use analysis::AnalysisConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use store::{StoreBackend, StoreConfig, StoreFormat};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// in-memory setup. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Event store backend, location and timeout
    #[serde(default)]
    pub store: StoreConfig,

    /// Retention, report window and local time settings
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Tracing subscriber settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CRAVING_SENTINEL` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CRAVING_SENTINEL__STORE__BACKEND=file` -> `store.backend = file`
    /// - `CRAVING_SENTINEL__ANALYSIS__UTC_OFFSET_MINUTES=-300` -> `analysis.utc_offset_minutes = -300`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CRAVING_SENTINEL")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.store.validate()?;
        self.analysis.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
