//! Event store configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound on the store timeout, in milliseconds.
const MAX_TIMEOUT_MS: u64 = 60_000;

/// Where event logs live
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    File,
}

/// On-disk encoding for the file backend
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreFormat {
    #[default]
    Json,
    Yaml,
}

impl StoreFormat {
    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            StoreFormat::Json => "json",
            StoreFormat::Yaml => "yaml",
        }
    }
}

/// Event store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Storage backend
    #[serde(default)]
    pub backend: StoreBackend,

    /// Directory holding one log file per user (file backend)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Serialization format (file backend)
    #[serde(default)]
    pub format: StoreFormat,

    /// Timeout applied to every store call, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl StoreConfig {
    /// Store timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Validate store configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_ms == 0 || self.timeout_ms > MAX_TIMEOUT_MS {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.backend == StoreBackend::File && self.data_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("store.data_dir"));
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            data_dir: default_data_dir(),
            format: StoreFormat::default(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data/events")
}

fn default_timeout_ms() -> u64 {
    2000
}
