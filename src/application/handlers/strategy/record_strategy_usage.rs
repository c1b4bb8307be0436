//! RecordStrategyUsage - Command handler for logging a coping strategy use.

use std::sync::Arc;

use crate::domain::analysis::find_strategy;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{Clock, StrategyUsageRecord, StrategyUsageStore};

/// Command to record that a user applied a strategy.
#[derive(Debug, Clone)]
pub struct RecordStrategyUsageCommand {
    pub user_id: UserId,
    pub strategy_id: String,
    pub helped: bool,
}

/// Handler for recording strategy usage.
pub struct RecordStrategyUsageHandler {
    store: Arc<dyn StrategyUsageStore>,
    clock: Arc<dyn Clock>,
}

impl RecordStrategyUsageHandler {
    pub fn new(store: Arc<dyn StrategyUsageStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn handle(
        &self,
        cmd: RecordStrategyUsageCommand,
    ) -> Result<StrategyUsageRecord, DomainError> {
        // 1. Only catalog strategies can be tracked
        let strategy_id = cmd.strategy_id.trim();
        let template = find_strategy(strategy_id).ok_or_else(|| {
            DomainError::new(ErrorCode::StrategyNotFound, "Unknown coping strategy")
                .with_detail("strategy_id", strategy_id)
        })?;

        // 2. Append the usage record
        let record = StrategyUsageRecord::new(template.id, cmd.helped, self.clock.now());
        self.store
            .record(&cmd.user_id, record.clone())
            .await
            .map_err(|e| DomainError::new(ErrorCode::StoreWriteFailed, e.to_string()))?;

        tracing::info!(
            user_id = %cmd.user_id,
            strategy_id = template.id,
            helped = cmd.helped,
            "Strategy usage recorded"
        );

        Ok(record)
    }
}
