//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod strategy;

pub use strategy::{RecordStrategyUsageCommand, RecordStrategyUsageHandler};
