//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Event log and strategy usage stores (file, in-memory)
//! - `environment` - Clocks and random sources

pub mod environment;
pub mod storage;

pub use environment::{FixedClock, SeededRandom, SystemClock, ThreadRandom};
pub use storage::{
    FileEventStore, FileStrategyUsageStore, InMemoryEventStore, InMemoryStrategyUsageStore,
};
