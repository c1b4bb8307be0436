//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

use super::{DayOfWeek, HourOfDay};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Creates a new timestamp by subtracting the specified number of days.
    pub fn minus_days(&self, days: i64) -> Self {
        Self(self.0 - Duration::days(days))
    }

    /// Creates a timestamp from Unix seconds.
    ///
    /// Out-of-range values saturate to the Unix epoch.
    pub fn from_unix_secs(secs: i64) -> Self {
        Self(DateTime::from_timestamp(secs, 0).unwrap_or_default())
    }

    /// Returns the timestamp as Unix seconds.
    pub fn as_unix_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Wall-clock hour at the given UTC offset.
    pub fn local_hour(&self, offset: FixedOffset) -> HourOfDay {
        HourOfDay::clamped(self.0.with_timezone(&offset).hour() as i32)
    }

    /// Weekday at the given UTC offset (0 = Sunday).
    pub fn local_day_of_week(&self, offset: FixedOffset) -> DayOfWeek {
        let weekday = self.0.with_timezone(&offset).weekday();
        DayOfWeek::clamped(weekday.num_days_from_sunday() as i32)
    }

    /// Calendar date at the given UTC offset.
    pub fn local_date(&self, offset: FixedOffset) -> NaiveDate {
        self.0.with_timezone(&offset).date_naive()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-01-15T10:30:00Z, a Monday
    const MONDAY_MORNING: i64 = 1_705_314_600;

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn timestamp_serializes_to_json() {
        let ts = Timestamp::from_unix_secs(MONDAY_MORNING);
        let json = serde_json::to_string(&ts).unwrap();
        assert!(json.contains("2024-01-15"));
    }

    #[test]
    fn timestamp_deserializes_from_json() {
        let ts: Timestamp = serde_json::from_str("\"2024-01-15T10:30:00Z\"").unwrap();
        assert_eq!(ts.as_unix_secs(), MONDAY_MORNING);
    }

    #[test]
    fn minus_days_moves_backwards() {
        let ts = Timestamp::from_unix_secs(MONDAY_MORNING);
        assert_eq!(ts.minus_days(1).as_unix_secs(), MONDAY_MORNING - 86_400);
        assert!(ts.minus_days(1).is_before(&ts));
    }

    #[test]
    fn duration_since_is_signed() {
        let later = Timestamp::from_unix_secs(MONDAY_MORNING);
        let earlier = Timestamp::from_unix_secs(MONDAY_MORNING - 3 * 3600);
        assert_eq!(later.duration_since(&earlier).num_hours(), 3);
        assert_eq!(earlier.duration_since(&later).num_hours(), -3);
    }

    #[test]
    fn local_hour_applies_offset() {
        let ts = Timestamp::from_unix_secs(MONDAY_MORNING);
        let utc = FixedOffset::east_opt(0).unwrap();
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

        assert_eq!(ts.local_hour(utc).value(), 10);
        assert_eq!(ts.local_hour(plus_two).value(), 12);
    }

    #[test]
    fn local_day_of_week_counts_from_sunday() {
        let ts = Timestamp::from_unix_secs(MONDAY_MORNING);
        let utc = FixedOffset::east_opt(0).unwrap();
        let minus_eleven = FixedOffset::west_opt(11 * 3600).unwrap();

        assert_eq!(ts.local_day_of_week(utc).value(), 1);
        // 23:30 on Sunday in UTC-11
        assert_eq!(ts.local_day_of_week(minus_eleven).value(), 0);
    }
}
