//! Behavior module - the craving event log vocabulary.

mod event;

#[cfg(test)]
pub(crate) mod fixtures;

pub use event::{
    prune_expired, within_last_days, BehaviorEvent, BehaviorEventDraft, IngestedEvent,
    RETENTION_DAYS,
};
