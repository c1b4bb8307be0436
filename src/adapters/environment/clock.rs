//! Clock adapters.

use chrono::{FixedOffset, Offset, Utc};

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// Wall clock in a fixed local offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(Utc.fix())
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: Timestamp,
    offset: FixedOffset,
}

impl FixedClock {
    pub fn new(now: Timestamp, offset: FixedOffset) -> Self {
        Self { now, offset }
    }

    /// Frozen at `now`, in UTC.
    pub fn utc(now: Timestamp) -> Self {
        Self::new(now, Utc.fix())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.now
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DayOfWeek, HourOfDay};

    #[test]
    fn fixed_clock_reports_local_hour_and_day() {
        // 2024-01-15T23:30:00Z is Tuesday 01:30 at UTC+2
        let now = Timestamp::from_unix_secs(1_705_361_400);
        let clock = FixedClock::new(now, FixedOffset::east_opt(2 * 3600).unwrap());

        assert_eq!(clock.now(), now);
        assert_eq!(clock.current_hour(), HourOfDay::clamped(1));
        assert_eq!(clock.current_day(), DayOfWeek::clamped(2));
    }

    #[test]
    fn utc_fixed_clock() {
        let clock = FixedClock::utc(Timestamp::from_unix_secs(1_705_314_600));
        assert_eq!(clock.current_hour(), HourOfDay::clamped(10));
        assert_eq!(clock.current_day(), DayOfWeek::MONDAY);
    }

    #[test]
    fn system_clock_is_close_to_now() {
        let clock = SystemClock::default();
        let before = Timestamp::now();
        let now = clock.now();
        assert!(!now.is_before(&before));
    }
}
