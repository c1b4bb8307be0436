//! Strategy handlers.

mod record_strategy_usage;

pub use record_strategy_usage::{RecordStrategyUsageCommand, RecordStrategyUsageHandler};
