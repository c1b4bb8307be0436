//! Self-reported mood at the moment of a craving.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Five-point mood scale, best to worst.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Great,
    Good,
    #[default]
    Neutral,
    Bad,
    Terrible,
}

impl Mood {
    /// All moods in scale order.
    pub const ALL: [Mood; 5] = [
        Mood::Great,
        Mood::Good,
        Mood::Neutral,
        Mood::Bad,
        Mood::Terrible,
    ];

    /// Returns the wire name used in persisted records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Great => "great",
            Mood::Good => "good",
            Mood::Neutral => "neutral",
            Mood::Bad => "bad",
            Mood::Terrible => "terrible",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Mood {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "great" => Ok(Mood::Great),
            "good" => Ok(Mood::Good),
            "neutral" => Ok(Mood::Neutral),
            "bad" => Ok(Mood::Bad),
            "terrible" => Ok(Mood::Terrible),
            other => Err(ValidationError::invalid_format(
                "mood",
                format!("unknown mood '{}'", other),
            )),
        }
    }
}
