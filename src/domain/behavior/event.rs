//! BehaviorEvent - one logged craving occurrence.
//!
//! Events are built from a [`BehaviorEventDraft`] (raw user input) through
//! [`BehaviorEvent::ingest`], which clamps every numeric field into range and
//! reports each adjustment. Once built an event is never mutated.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::foundation::{
    DayOfWeek, EventId, HourOfDay, Intensity, Mood, Timestamp, TriggerId, ValidationError,
};

/// How long events stay in the log.
pub const RETENTION_DAYS: i64 = 90;

/// A stored craving event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorEvent {
    pub id: EventId,
    pub timestamp: Timestamp,
    pub hour: HourOfDay,
    pub day_of_week: DayOfWeek,
    pub mood: Mood,
    pub stress_level: Intensity,
    pub craving_level: Intensity,
    pub activity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    pub did_smoke: bool,
    #[serde(default)]
    pub triggers: BTreeSet<TriggerId>,
}

/// Raw, unvalidated input for a craving event.
///
/// `hour` and `day_of_week` default to the local time of `occurred_at`
/// (or of "now" when that is missing too).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorEventDraft {
    #[serde(default)]
    pub occurred_at: Option<Timestamp>,
    #[serde(default)]
    pub hour: Option<i32>,
    #[serde(default)]
    pub day_of_week: Option<i32>,
    #[serde(default)]
    pub mood: Mood,
    pub stress_level: i32,
    pub craving_level: i32,
    #[serde(default)]
    pub activity: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub weather: Option<String>,
    pub did_smoke: bool,
    #[serde(default)]
    pub triggers: Vec<String>,
}

impl BehaviorEventDraft {
    /// Starts a draft with the required fields; everything else defaults.
    pub fn new(mood: Mood, stress_level: i32, craving_level: i32, did_smoke: bool) -> Self {
        Self {
            mood,
            stress_level,
            craving_level,
            did_smoke,
            ..Self::default()
        }
    }

    pub fn at(mut self, occurred_at: Timestamp) -> Self {
        self.occurred_at = Some(occurred_at);
        self
    }

    pub fn with_hour(mut self, hour: i32) -> Self {
        self.hour = Some(hour);
        self
    }

    pub fn with_day_of_week(mut self, day: i32) -> Self {
        self.day_of_week = Some(day);
        self
    }

    pub fn with_activity(mut self, activity: impl Into<String>) -> Self {
        self.activity = activity.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_weather(mut self, weather: impl Into<String>) -> Self {
        self.weather = Some(weather.into());
        self
    }

    pub fn with_triggers<I, S>(mut self, triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.triggers = triggers.into_iter().map(Into::into).collect();
        self
    }
}

/// Result of ingesting a draft: the accepted event plus every adjustment
/// made along the way.
#[derive(Debug, Clone)]
pub struct IngestedEvent {
    pub event: BehaviorEvent,
    pub adjustments: Vec<ValidationError>,
}

impl BehaviorEvent {
    /// Builds an event from raw input, clamping numeric fields.
    ///
    /// Never fails: out-of-range numbers are clamped, blank trigger ids and
    /// blank optional text are dropped, and each of those is recorded in
    /// `adjustments`.
    pub fn ingest(draft: BehaviorEventDraft, now: Timestamp, offset: FixedOffset) -> IngestedEvent {
        let mut adjustments = Vec::new();
        let timestamp = draft.occurred_at.unwrap_or(now);

        let hour = match draft.hour {
            Some(raw) => {
                let (hour, err) = HourOfDay::sanitize(raw);
                adjustments.extend(err);
                hour
            }
            None => timestamp.local_hour(offset),
        };

        let day_of_week = match draft.day_of_week {
            Some(raw) => {
                let (day, err) = DayOfWeek::sanitize(raw);
                adjustments.extend(err);
                day
            }
            None => timestamp.local_day_of_week(offset),
        };

        let (stress_level, err) = Intensity::sanitize("stress_level", draft.stress_level);
        adjustments.extend(err);
        let (craving_level, err) = Intensity::sanitize("craving_level", draft.craving_level);
        adjustments.extend(err);

        let mut triggers = BTreeSet::new();
        for raw in &draft.triggers {
            match TriggerId::new(raw) {
                Ok(id) => {
                    triggers.insert(id);
                }
                Err(_) => adjustments.push(ValidationError::invalid_format(
                    "triggers",
                    "blank trigger id dropped",
                )),
            }
        }

        let event = BehaviorEvent {
            id: EventId::new(),
            timestamp,
            hour,
            day_of_week,
            mood: draft.mood,
            stress_level,
            craving_level,
            activity: draft.activity.trim().to_string(),
            location: non_blank(draft.location),
            weather: non_blank(draft.weather),
            did_smoke: draft.did_smoke,
            triggers,
        };

        IngestedEvent { event, adjustments }
    }

    /// True while `now - timestamp` is within the retention window.
    pub fn is_retained(&self, now: &Timestamp, retention_days: i64) -> bool {
        now.duration_since(&self.timestamp).num_seconds() <= retention_days * 86_400
    }

    /// True when the event was resisted.
    pub fn was_overcome(&self) -> bool {
        !self.did_smoke
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Drops events older than the retention window, keeping order.
pub fn prune_expired(
    events: Vec<BehaviorEvent>,
    now: &Timestamp,
    retention_days: i64,
) -> Vec<BehaviorEvent> {
    events
        .into_iter()
        .filter(|e| e.is_retained(now, retention_days))
        .collect()
}

/// Events whose timestamp falls in `[now - days, now]`.
pub fn within_last_days<'a>(
    events: &'a [BehaviorEvent],
    now: &Timestamp,
    days: i64,
) -> Vec<&'a BehaviorEvent> {
    let start = now.minus_days(days);
    events
        .iter()
        .filter(|e| !e.timestamp.is_before(&start) && !now.is_before(&e.timestamp))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    // 2024-01-15T10:30:00Z, a Monday
    fn monday_morning() -> Timestamp {
        Timestamp::from_unix_secs(1_705_314_600)
    }

    #[test]
    fn ingest_keeps_valid_fields() {
        let draft = BehaviorEventDraft::new(Mood::Bad, 7, 8, false)
            .with_hour(8)
            .with_day_of_week(2)
            .with_activity("  commuting ")
            .with_triggers(["morning_coffee", "stress"]);

        let ingested = BehaviorEvent::ingest(draft, monday_morning(), utc());

        assert!(ingested.adjustments.is_empty());
        let event = ingested.event;
        assert_eq!(event.hour.value(), 8);
        assert_eq!(event.day_of_week.value(), 2);
        assert_eq!(event.stress_level.value(), 7);
        assert_eq!(event.craving_level.value(), 8);
        assert_eq!(event.activity, "commuting");
        assert_eq!(event.triggers.len(), 2);
    }

    #[test]
    fn ingest_clamps_and_reports_out_of_range_numbers() {
        let draft = BehaviorEventDraft::new(Mood::Neutral, 0, 15, true)
            .with_hour(30)
            .with_day_of_week(-2);

        let ingested = BehaviorEvent::ingest(draft, monday_morning(), utc());

        let event = &ingested.event;
        assert_eq!(event.hour.value(), 23);
        assert_eq!(event.day_of_week.value(), 0);
        assert_eq!(event.stress_level.value(), 1);
        assert_eq!(event.craving_level.value(), 10);

        let fields: Vec<_> = ingested.adjustments.iter().map(|e| e.field()).collect();
        assert_eq!(fields, vec!["hour", "day_of_week", "stress_level", "craving_level"]);
    }

    #[test]
    fn ingest_derives_hour_and_day_from_timestamp() {
        let draft = BehaviorEventDraft::new(Mood::Good, 3, 4, false);
        let event = BehaviorEvent::ingest(draft, monday_morning(), utc()).event;

        assert_eq!(event.timestamp, monday_morning());
        assert_eq!(event.hour.value(), 10);
        assert_eq!(event.day_of_week, DayOfWeek::MONDAY);
    }

    #[test]
    fn ingest_deduplicates_and_drops_blank_triggers() {
        let draft = BehaviorEventDraft::new(Mood::Good, 3, 4, false)
            .with_triggers(["Stress", "stress ", "", "after_meal"]);

        let ingested = BehaviorEvent::ingest(draft, monday_morning(), utc());

        let ids: Vec<_> = ingested.event.triggers.iter().map(|t| t.as_str()).collect();
        assert_eq!(ids, vec!["after_meal", "stress"]);
        assert_eq!(ingested.adjustments.len(), 1);
    }

    #[test]
    fn ingest_drops_blank_optional_text() {
        let draft = BehaviorEventDraft::new(Mood::Good, 3, 4, false)
            .with_location("   ")
            .with_weather("rainy");

        let event = BehaviorEvent::ingest(draft, monday_morning(), utc()).event;
        assert_eq!(event.location, None);
        assert_eq!(event.weather.as_deref(), Some("rainy"));
    }

    #[test]
    fn retention_boundary_is_inclusive() {
        let now = monday_morning();
        let draft = BehaviorEventDraft::new(Mood::Good, 3, 4, false);

        let edge = BehaviorEvent::ingest(draft.clone().at(now.minus_days(90)), now, utc()).event;
        let stale = BehaviorEvent::ingest(draft.at(now.minus_days(91)), now, utc()).event;

        assert!(edge.is_retained(&now, RETENTION_DAYS));
        assert!(!stale.is_retained(&now, RETENTION_DAYS));
    }

    #[test]
    fn prune_expired_drops_only_old_events() {
        let now = monday_morning();
        let events: Vec<_> = [1, 45, 91, 200]
            .iter()
            .map(|days| {
                let draft = BehaviorEventDraft::new(Mood::Good, 3, 4, false).at(now.minus_days(*days));
                BehaviorEvent::ingest(draft, now, utc()).event
            })
            .collect();

        let kept = prune_expired(events, &now, RETENTION_DAYS);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn within_last_days_filters_window() {
        let now = monday_morning();
        let events: Vec<_> = [0, 3, 7, 8]
            .iter()
            .map(|days| {
                let draft = BehaviorEventDraft::new(Mood::Good, 3, 4, false).at(now.minus_days(*days));
                BehaviorEvent::ingest(draft, now, utc()).event
            })
            .collect();

        assert_eq!(within_last_days(&events, &now, 7).len(), 3);
    }

    #[test]
    fn event_serializes_with_camel_case_fields() {
        let draft = BehaviorEventDraft::new(Mood::Bad, 6, 7, true).with_triggers(["stress"]);
        let event = BehaviorEvent::ingest(draft, monday_morning(), utc()).event;

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"cravingLevel\":7"));
        assert!(json.contains("\"didSmoke\":true"));
        assert!(json.contains("\"dayOfWeek\":1"));
        assert!(!json.contains("location"));

        let back: BehaviorEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
