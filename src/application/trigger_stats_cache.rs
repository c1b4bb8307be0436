//! Per-user cache of trigger statistics.
//!
//! An entry is served only while the retained log still matches the events it
//! was computed from: appends invalidate it, and events aging out of the
//! retention window change the log's fingerprint. A cache-wide generation
//! moves on every invalidation; a reader captures it before loading events and
//! may only store its result if it is unchanged, so a recompute that raced an
//! append never overwrites the invalidation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::analysis::TriggerStats;
use crate::domain::behavior::BehaviorEvent;
use crate::domain::foundation::{Timestamp, UserId};

/// Users whose statistics are kept at once.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Identifies the retained event set statistics were computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LogFingerprint {
    len: usize,
    oldest: Option<Timestamp>,
    newest: Option<Timestamp>,
}

impl LogFingerprint {
    fn of(events: &[BehaviorEvent]) -> Self {
        Self {
            len: events.len(),
            oldest: events.iter().map(|e| e.timestamp).min(),
            newest: events.iter().map(|e| e.timestamp).max(),
        }
    }
}

struct Entry {
    stats: Arc<TriggerStats>,
    source: LogFingerprint,
    stored_at: u64,
}

#[derive(Default)]
struct Inner {
    generation: u64,
    tick: u64,
    entries: HashMap<UserId, Entry>,
}

pub struct TriggerStatsCache {
    inner: Mutex<Inner>,
    capacity: usize,
}

impl Default for TriggerStatsCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl TriggerStatsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            capacity: capacity.max(1),
        }
    }

    /// Current generation, to be captured before reading events.
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Cached statistics if they were computed from exactly `events`.
    ///
    /// A stale entry is dropped.
    pub fn lookup(&self, user_id: &UserId, events: &[BehaviorEvent]) -> Option<Arc<TriggerStats>> {
        let mut inner = self.lock();
        let entry = inner.entries.get(user_id)?;
        if entry.source == LogFingerprint::of(events) {
            return Some(Arc::clone(&entry.stats));
        }
        inner.entries.remove(user_id);
        None
    }

    /// Stores `stats` computed from `events` if nothing was invalidated since
    /// `generation` was captured.
    pub fn store(
        &self,
        user_id: &UserId,
        generation: u64,
        events: &[BehaviorEvent],
        stats: Arc<TriggerStats>,
    ) -> bool {
        let mut inner = self.lock();
        if inner.generation != generation {
            return false;
        }

        if inner.entries.len() >= self.capacity && !inner.entries.contains_key(user_id) {
            let oldest = inner
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.stored_at)
                .map(|(user, _)| user.clone());
            if let Some(user) = oldest {
                inner.entries.remove(&user);
            }
        }

        inner.tick += 1;
        let stored_at = inner.tick;
        inner.entries.insert(
            user_id.clone(),
            Entry {
                stats,
                source: LogFingerprint::of(events),
                stored_at,
            },
        );
        true
    }

    pub fn invalidate(&self, user_id: &UserId) {
        let mut inner = self.lock();
        inner.generation += 1;
        inner.entries.remove(user_id);
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|p| p.into_inner())
    }
}
