//! Storage Adapters
//!
//! Implementations of the EventStore and StrategyUsageStore ports.
//!
//! ## Available Adapters
//!
//! - **FileEventStore** / **FileStrategyUsageStore** - One JSON or YAML file per user
//! - **InMemoryEventStore** / **InMemoryStrategyUsageStore** - In memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileEventStore, InMemoryEventStore};
//!
//! // Production: file-based storage
//! let store = FileEventStore::new("./data/events", StoreFormat::Json);
//!
//! // Testing: in-memory storage
//! let store = InMemoryEventStore::new();
//! ```

mod file_codec;
mod file_event_store;
mod file_strategy_usage_store;
mod in_memory_event_store;
mod in_memory_strategy_usage_store;

pub use file_event_store::FileEventStore;
pub use file_strategy_usage_store::FileStrategyUsageStore;
pub use in_memory_event_store::InMemoryEventStore;
pub use in_memory_strategy_usage_store::InMemoryStrategyUsageStore;
