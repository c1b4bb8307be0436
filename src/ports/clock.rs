//! Clock port - injectable "now" and local time zone.

use chrono::FixedOffset;

use crate::domain::foundation::{DayOfWeek, HourOfDay, Timestamp};

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> Timestamp;

    /// Offset of the user's local time from UTC.
    fn offset(&self) -> FixedOffset;

    /// Local hour of the current instant.
    fn current_hour(&self) -> HourOfDay {
        self.now().local_hour(self.offset())
    }

    /// Local weekday of the current instant.
    fn current_day(&self) -> DayOfWeek {
        self.now().local_day_of_week(self.offset())
    }
}
