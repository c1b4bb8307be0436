//! StrategyUsageStore port - Interface for tracking coping strategy usage.
//!
//! Every time a user applies a coping strategy, one record is appended with
//! whether it helped. Usage and success counters shown next to strategies
//! are derived from these records.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::foundation::{Timestamp, UserId};

/// One application of a coping strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyUsageRecord {
    /// Catalog id of the strategy used.
    pub strategy_id: String,
    /// Whether the craving passed without smoking.
    pub helped: bool,
    /// When the strategy was used.
    pub used_at: Timestamp,
}

impl StrategyUsageRecord {
    pub fn new(strategy_id: impl Into<String>, helped: bool, used_at: Timestamp) -> Self {
        Self {
            strategy_id: strategy_id.into(),
            helped,
            used_at,
        }
    }
}

/// Usage and success counts for one strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyUsageCounts {
    pub usage_count: u32,
    pub success_count: u32,
}

/// Folds usage records into per-strategy counters.
pub fn tally_usage(records: &[StrategyUsageRecord]) -> HashMap<String, StrategyUsageCounts> {
    let mut counts: HashMap<String, StrategyUsageCounts> = HashMap::new();
    for record in records {
        let entry = counts.entry(record.strategy_id.clone()).or_default();
        entry.usage_count += 1;
        if record.helped {
            entry.success_count += 1;
        }
    }
    counts
}

/// Port for recording and reading strategy usage.
#[async_trait]
pub trait StrategyUsageStore: Send + Sync {
    /// Appends a usage record for a user.
    async fn record(
        &self,
        user_id: &UserId,
        record: StrategyUsageRecord,
    ) -> Result<(), StrategyUsageError>;

    /// Reads every usage record for a user.
    async fn list(&self, user_id: &UserId) -> Result<Vec<StrategyUsageRecord>, StrategyUsageError>;
}

/// Errors from the strategy usage store.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StrategyUsageError {
    /// Storage backend failed.
    #[error("storage error: {0}")]
    Storage(String),
}
