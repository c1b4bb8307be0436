//! Analysis configuration

use chrono::FixedOffset;
use serde::Deserialize;

use super::error::ValidationError;

const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Tunables for the analysis components
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Days an event is kept before pruning
    #[serde(default = "default_retention_days")]
    pub retention_days: i64,

    /// Length of the weekly report window in days
    #[serde(default = "default_report_window_days")]
    pub report_window_days: i64,

    /// Events an hour needs before its own history replaces the baseline
    #[serde(default = "default_min_hour_samples")]
    pub min_hour_samples: usize,

    /// Offset of the user's local time from UTC, in minutes
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl AnalysisConfig {
    /// Local offset as a chrono FixedOffset
    pub fn offset(&self) -> Result<FixedOffset, ValidationError> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or(ValidationError::InvalidUtcOffset)
    }

    /// Validate analysis configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.retention_days < 1 {
            return Err(ValidationError::InvalidRetention);
        }
        if self.report_window_days < 1 || self.report_window_days > self.retention_days {
            return Err(ValidationError::InvalidReportWindow);
        }
        if self.min_hour_samples == 0 {
            return Err(ValidationError::InvalidMinHourSamples);
        }
        if self.utc_offset_minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(ValidationError::InvalidUtcOffset);
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            retention_days: default_retention_days(),
            report_window_days: default_report_window_days(),
            min_hour_samples: default_min_hour_samples(),
            utc_offset_minutes: 0,
        }
    }
}

fn default_retention_days() -> i64 {
    90
}

fn default_report_window_days() -> i64 {
    7
}

fn default_min_hour_samples() -> usize {
    3
}
