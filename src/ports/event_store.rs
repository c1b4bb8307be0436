//! Event Store Port - Interface for persisting the craving event log.
//!
//! The store is a plain key-value collaborator: one serialized list of
//! events per user, accessed with read-all and write-all. It offers no
//! transactions; the last write wins. Callers that read, modify and write
//! back must serialize those steps themselves (see `application::EventLog`).

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::behavior::BehaviorEvent;
use crate::domain::foundation::{ErrorCode, UserId};

/// Errors that can occur during event store operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum EventStoreError {
    #[error("Failed to read event log: {0}")]
    Read(String),

    #[error("Failed to write event log: {0}")]
    Write(String),

    #[error("Failed to (de)serialize event log: {0}")]
    Serialization(String),

    #[error("Event store did not answer within {0:?}")]
    Timeout(Duration),
}

impl EventStoreError {
    /// Maps the failure onto the domain error code vocabulary.
    pub fn code(&self) -> ErrorCode {
        match self {
            EventStoreError::Read(_) | EventStoreError::Serialization(_) => {
                ErrorCode::StoreReadFailed
            }
            EventStoreError::Write(_) => ErrorCode::StoreWriteFailed,
            EventStoreError::Timeout(_) => ErrorCode::StoreTimeout,
        }
    }
}

/// Port for reading and overwriting a user's event log
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Read every stored event for a user.
    ///
    /// A user with no log yet has an empty list, not an error.
    async fn read_all(&self, user_id: &UserId) -> Result<Vec<BehaviorEvent>, EventStoreError>;

    /// Replace the user's whole log with `events`.
    async fn write_all(
        &self,
        user_id: &UserId,
        events: &[BehaviorEvent],
    ) -> Result<(), EventStoreError>;
}
