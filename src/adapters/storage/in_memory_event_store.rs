//! In-Memory Event Store Adapter
//!
//! Keeps every user's event log in memory.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::behavior::BehaviorEvent;
use crate::domain::foundation::UserId;
use crate::ports::{EventStore, EventStoreError};

/// In-memory storage for event logs
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventStore {
    logs: Arc<RwLock<HashMap<UserId, Vec<BehaviorEvent>>>>,
    failure: Arc<RwLock<Option<EventStoreError>>>,
    latency: Arc<RwLock<Option<Duration>>>,
}

impl InMemoryEventStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail with `error` (None restores service)
    pub async fn fail_with(&self, error: Option<EventStoreError>) {
        *self.failure.write().await = error;
    }

    /// Delay every following call by `latency`
    pub async fn set_latency(&self, latency: Option<Duration>) {
        *self.latency.write().await = latency;
    }

    /// Number of events stored for a user
    pub async fn event_count(&self, user_id: &UserId) -> usize {
        self.logs
            .read()
            .await
            .get(user_id)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.logs.write().await.clear();
    }

    async fn simulate(&self) -> Result<(), EventStoreError> {
        let latency = *self.latency.read().await;
        if let Some(delay) = latency {
            tokio::time::sleep(delay).await;
        }
        match self.failure.read().await.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn read_all(&self, user_id: &UserId) -> Result<Vec<BehaviorEvent>, EventStoreError> {
        self.simulate().await?;
        let logs = self.logs.read().await;
        Ok(logs.get(user_id).cloned().unwrap_or_default())
    }

    async fn write_all(
        &self,
        user_id: &UserId,
        events: &[BehaviorEvent],
    ) -> Result<(), EventStoreError> {
        self.simulate().await?;
        let mut logs = self.logs.write().await;
        logs.insert(user_id.clone(), events.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::behavior::BehaviorEventDraft;
    use crate::domain::foundation::{Mood, Timestamp};
    use chrono::FixedOffset;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn event(craving: i32) -> BehaviorEvent {
        let now = Timestamp::from_unix_secs(1_705_314_600);
        let draft = BehaviorEventDraft::new(Mood::Neutral, 5, craving, false).at(now);
        BehaviorEvent::ingest(draft, now, FixedOffset::east_opt(0).unwrap()).event
    }

    #[tokio::test]
    async fn unknown_user_reads_empty_log() {
        let store = InMemoryEventStore::new();
        assert!(store.read_all(&user("nobody")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn write_replaces_whole_log() {
        let store = InMemoryEventStore::new();
        let alice = user("alice");

        store.write_all(&alice, &[event(3), event(4)]).await.unwrap();
        store.write_all(&alice, &[event(9)]).await.unwrap();

        let events = store.read_all(&alice).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].craving_level.value(), 9);
    }

    #[tokio::test]
    async fn users_are_isolated() {
        let store = InMemoryEventStore::new();
        store.write_all(&user("alice"), &[event(3)]).await.unwrap();

        assert_eq!(store.event_count(&user("alice")).await, 1);
        assert_eq!(store.event_count(&user("bob")).await, 0);
    }

    #[tokio::test]
    async fn injected_failure_is_returned_until_cleared() {
        let store = InMemoryEventStore::new();
        store
            .fail_with(Some(EventStoreError::Read("disk gone".into())))
            .await;

        let result = store.read_all(&user("alice")).await;
        assert!(matches!(result, Err(EventStoreError::Read(_))));

        store.fail_with(None).await;
        assert!(store.read_all(&user("alice")).await.is_ok());
    }

    #[tokio::test]
    async fn clear_drops_everything() {
        let store = InMemoryEventStore::new();
        store.write_all(&user("alice"), &[event(3)]).await.unwrap();
        store.clear().await;

        assert_eq!(store.event_count(&user("alice")).await, 0);
    }
}
