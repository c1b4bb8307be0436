//! Event builders shared by unit tests.

use chrono::FixedOffset;

use super::{BehaviorEvent, BehaviorEventDraft};
use crate::domain::foundation::{Mood, Timestamp};

/// 2024-01-15T10:30:00Z, a Monday.
pub fn monday_morning() -> Timestamp {
    Timestamp::from_unix_secs(1_705_314_600)
}

pub fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

/// Event at `hour` on the reference Monday.
pub fn craving(hour: i32, craving: i32, did_smoke: bool, triggers: &[&str]) -> BehaviorEvent {
    craving_with_mood(hour, craving, did_smoke, triggers, Mood::Neutral, 5)
}

pub fn craving_with_mood(
    hour: i32,
    craving: i32,
    did_smoke: bool,
    triggers: &[&str],
    mood: Mood,
    stress: i32,
) -> BehaviorEvent {
    let draft = BehaviorEventDraft::new(mood, stress, craving, did_smoke)
        .at(monday_morning())
        .with_hour(hour)
        .with_day_of_week(1)
        .with_triggers(triggers.iter().copied());
    BehaviorEvent::ingest(draft, monday_morning(), utc()).event
}
