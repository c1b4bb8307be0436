//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `EventStore` - Read-all / write-all access to a user's event log
//! - `StrategyUsageStore` - Append-only log of coping strategy usage
//!
//! ## Environment Ports
//!
//! - `Clock` - Current instant and local UTC offset
//! - `RandomSource` - Injectable randomness for message selection

mod clock;
mod event_store;
mod random_source;
mod strategy_usage_store;

pub use clock::Clock;
pub use event_store::{EventStore, EventStoreError};
pub use random_source::{choose, RandomSource};
pub use strategy_usage_store::{
    tally_usage, StrategyUsageCounts, StrategyUsageError, StrategyUsageRecord, StrategyUsageStore,
};
