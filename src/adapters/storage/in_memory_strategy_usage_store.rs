//! In-Memory Strategy Usage Store Adapter

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::UserId;
use crate::ports::{StrategyUsageError, StrategyUsageRecord, StrategyUsageStore};

/// In-memory log of strategy usage, per user
#[derive(Debug, Clone, Default)]
pub struct InMemoryStrategyUsageStore {
    records: Arc<RwLock<HashMap<UserId, Vec<StrategyUsageRecord>>>>,
}

impl InMemoryStrategyUsageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StrategyUsageStore for InMemoryStrategyUsageStore {
    async fn record(
        &self,
        user_id: &UserId,
        record: StrategyUsageRecord,
    ) -> Result<(), StrategyUsageError> {
        let mut records = self.records.write().await;
        records.entry(user_id.clone()).or_default().push(record);
        Ok(())
    }

    async fn list(&self, user_id: &UserId) -> Result<Vec<StrategyUsageRecord>, StrategyUsageError> {
        let records = self.records.read().await;
        Ok(records.get(user_id).cloned().unwrap_or_default())
    }
}
