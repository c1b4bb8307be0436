//! EventLog - serialized access to a user's craving log.
//!
//! The store only offers read-all and write-all, so an append is a
//! read-modify-write. Appends for one user run inside that user's lock;
//! different users proceed in parallel. Reads take no lock.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::domain::behavior::{prune_expired, BehaviorEvent, BehaviorEventDraft, IngestedEvent};
use crate::domain::foundation::UserId;
use crate::ports::{Clock, EventStore, EventStoreError};

pub struct EventLog {
    store: Arc<dyn EventStore>,
    clock: Arc<dyn Clock>,
    timeout: Duration,
    retention_days: i64,
    user_locks: Mutex<HashMap<UserId, Arc<tokio::sync::Mutex<()>>>>,
}

impl EventLog {
    pub fn new(
        store: Arc<dyn EventStore>,
        clock: Arc<dyn Clock>,
        timeout: Duration,
        retention_days: i64,
    ) -> Self {
        Self {
            store,
            clock,
            timeout,
            retention_days,
            user_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Sanitizes raw input against the current clock.
    pub fn ingest(&self, draft: BehaviorEventDraft) -> IngestedEvent {
        let ingested = BehaviorEvent::ingest(draft, self.clock.now(), self.clock.offset());
        for adjustment in &ingested.adjustments {
            tracing::warn!(field = adjustment.field(), "Craving input adjusted: {}", adjustment);
        }
        ingested
    }

    /// Appends an event, prunes expired entries and writes the whole log.
    ///
    /// Returns the number of events stored after pruning.
    pub async fn append(&self, user_id: &UserId, event: BehaviorEvent) -> Result<usize, EventStoreError> {
        let lock = self.lock_for(user_id);
        let result = {
            let _guard = lock.lock().await;
            self.append_locked(user_id, event).await
        };
        drop(lock);
        self.release_lock(user_id);
        result
    }

    async fn append_locked(&self, user_id: &UserId, event: BehaviorEvent) -> Result<usize, EventStoreError> {
        let mut events = self.with_timeout(self.store.read_all(user_id)).await?;
        events.push(event);
        let before = events.len();
        let events = prune_expired(events, &self.clock.now(), self.retention_days);
        if events.len() < before {
            tracing::debug!(
                user_id = %user_id,
                pruned = before - events.len(),
                "Pruned expired craving events"
            );
        }

        self.with_timeout(self.store.write_all(user_id, &events)).await?;
        Ok(events.len())
    }

    /// Every retained event for a user.
    pub async fn read_all(&self, user_id: &UserId) -> Result<Vec<BehaviorEvent>, EventStoreError> {
        let events = self.with_timeout(self.store.read_all(user_id)).await?;
        let now = self.clock.now();
        Ok(events
            .into_iter()
            .filter(|e| e.is_retained(&now, self.retention_days))
            .collect())
    }

    fn lock_for(&self, user_id: &UserId) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self
            .user_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        locks.entry(user_id.clone()).or_default().clone()
    }

    /// Drops the user's lock once no append holds or waits on it.
    fn release_lock(&self, user_id: &UserId) {
        let mut locks = self
            .user_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if locks.get(user_id).is_some_and(|lock| Arc::strong_count(lock) == 1) {
            locks.remove(user_id);
        }
    }

    #[cfg(test)]
    fn tracked_locks(&self) -> usize {
        self.user_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    async fn with_timeout<T, F>(&self, fut: F) -> Result<T, EventStoreError>
    where
        F: Future<Output = Result<T, EventStoreError>>,
    {
        tokio::time::timeout(self.timeout, fut)
            .await
            .map_err(|_| EventStoreError::Timeout(self.timeout))?
    }
}
