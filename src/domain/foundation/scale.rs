//! Bounded integer scales: intensity (1-10), hour of day (0-23) and
//! day of week (0-6, Sunday first).
//!
//! Each scale offers a strict `try_new` and a lenient `sanitize` that clamps
//! into range and reports the adjustment instead of failing.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

fn clamp_reporting(field: &str, raw: i32, min: i32, max: i32) -> (i32, Option<ValidationError>) {
    if raw < min || raw > max {
        (
            raw.clamp(min, max),
            Some(ValidationError::out_of_range(field, min, max, raw)),
        )
    } else {
        (raw, None)
    }
}

/// Self-reported intensity on a 1-10 scale (stress, craving).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Intensity(u8);

impl Intensity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Midpoint used when nothing was reported.
    pub const NEUTRAL: Self = Self(5);

    /// Creates an Intensity, returning error if out of range.
    pub fn try_new(value: i32) -> Result<Self, ValidationError> {
        match clamp_reporting("intensity", value, Self::MIN as i32, Self::MAX as i32) {
            (v, None) => Ok(Self(v as u8)),
            (_, Some(err)) => Err(err),
        }
    }

    /// Creates an Intensity, clamping to the valid range.
    pub fn clamped(value: i32) -> Self {
        Self(value.clamp(Self::MIN as i32, Self::MAX as i32) as u8)
    }

    /// Clamps into range, reporting the adjustment against `field`.
    pub fn sanitize(field: &str, value: i32) -> (Self, Option<ValidationError>) {
        let (v, err) = clamp_reporting(field, value, Self::MIN as i32, Self::MAX as i32);
        (Self(v as u8), err)
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/10", self.0)
    }
}

/// Hour of the local day, 0-23.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct HourOfDay(u8);

impl HourOfDay {
    pub const COUNT: usize = 24;

    /// Creates an HourOfDay, returning error if out of range.
    pub fn try_new(value: i32) -> Result<Self, ValidationError> {
        match clamp_reporting("hour", value, 0, 23) {
            (v, None) => Ok(Self(v as u8)),
            (_, Some(err)) => Err(err),
        }
    }

    /// Creates an HourOfDay, clamping to the valid range.
    pub fn clamped(value: i32) -> Self {
        Self(value.clamp(0, 23) as u8)
    }

    /// Clamps into range, reporting the adjustment.
    pub fn sanitize(value: i32) -> (Self, Option<ValidationError>) {
        let (v, err) = clamp_reporting("hour", value, 0, 23);
        (Self(v as u8), err)
    }

    /// Iterates every hour from midnight to 23:00.
    pub fn all() -> impl Iterator<Item = HourOfDay> {
        (0u8..24).map(HourOfDay)
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns the value as a table index.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for HourOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

/// Day of the week, 0 = Sunday through 6 = Saturday.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct DayOfWeek(u8);

impl DayOfWeek {
    pub const SUNDAY: Self = Self(0);
    pub const MONDAY: Self = Self(1);
    pub const FRIDAY: Self = Self(5);
    pub const SATURDAY: Self = Self(6);

    const NAMES: [&'static str; 7] = [
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ];

    /// Creates a DayOfWeek, returning error if out of range.
    pub fn try_new(value: i32) -> Result<Self, ValidationError> {
        match clamp_reporting("day_of_week", value, 0, 6) {
            (v, None) => Ok(Self(v as u8)),
            (_, Some(err)) => Err(err),
        }
    }

    /// Creates a DayOfWeek, clamping to the valid range.
    pub fn clamped(value: i32) -> Self {
        Self(value.clamp(0, 6) as u8)
    }

    /// Clamps into range, reporting the adjustment.
    pub fn sanitize(value: i32) -> (Self, Option<ValidationError>) {
        let (v, err) = clamp_reporting("day_of_week", value, 0, 6);
        (Self(v as u8), err)
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns the value as a table index.
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// English day name.
    pub fn name(&self) -> &'static str {
        Self::NAMES[self.index()]
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// Stored records go through the strict constructors, so an out-of-range
// value fails to deserialize instead of reaching an index.
impl TryFrom<i32> for Intensity {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Intensity> for i32 {
    fn from(value: Intensity) -> Self {
        i32::from(value.0)
    }
}

impl TryFrom<i32> for HourOfDay {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<HourOfDay> for i32 {
    fn from(value: HourOfDay) -> Self {
        i32::from(value.0)
    }
}

impl TryFrom<i32> for DayOfWeek {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<DayOfWeek> for i32 {
    fn from(value: DayOfWeek) -> Self {
        i32::from(value.0)
    }
}
