//! Application layer - Orchestration over domain and ports.
//!
//! - `EventLog` serializes appends per user and applies store timeouts
//! - `CravingInsights` exposes every query and command with the
//!   degrade-to-default policy
//! - `handlers` holds command handlers that can fail

mod event_log;
pub mod handlers;
mod insights;
mod trigger_stats_cache;

pub use event_log::EventLog;
pub use handlers::{RecordStrategyUsageCommand, RecordStrategyUsageHandler};
pub use insights::{CravingInsights, InsightsSettings, LogCravingOutcome};
pub use trigger_stats_cache::TriggerStatsCache;
