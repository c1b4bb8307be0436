//! Static trigger taxonomy: which broad category a known trigger id belongs to.
//!
//! The mapping is fixed data and independent of any logged statistics.
//! Unknown ids simply have no category.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::domain::foundation::TriggerId;

/// Broad family a trigger belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerCategory {
    Emotional,
    Routine,
    Social,
    Physical,
}

impl TriggerCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerCategory::Emotional => "emotional",
            TriggerCategory::Routine => "routine",
            TriggerCategory::Social => "social",
            TriggerCategory::Physical => "physical",
        }
    }
}

impl fmt::Display for TriggerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

static TAXONOMY: Lazy<HashMap<&'static str, TriggerCategory>> = Lazy::new(|| {
    use TriggerCategory::*;
    HashMap::from([
        ("stress", Emotional),
        ("anxiety", Emotional),
        ("boredom", Emotional),
        ("sadness", Emotional),
        ("anger", Emotional),
        ("loneliness", Emotional),
        ("frustration", Emotional),
        ("morning_coffee", Routine),
        ("after_meal", Routine),
        ("driving", Routine),
        ("work_break", Routine),
        ("waking_up", Routine),
        ("before_bed", Routine),
        ("phone_call", Routine),
        ("alcohol", Social),
        ("party", Social),
        ("social_event", Social),
        ("friends_smoking", Social),
        ("peer_pressure", Social),
        ("fatigue", Physical),
        ("hunger", Physical),
        ("withdrawal", Physical),
        ("restlessness", Physical),
    ])
});

/// Looks up the category of a trigger id.
pub fn category_of(trigger: &TriggerId) -> Option<TriggerCategory> {
    TAXONOMY.get(trigger.as_str()).copied()
}

/// Human-readable label for a trigger id: `after_meal` becomes `after meal`.
pub fn display_name(trigger: &TriggerId) -> String {
    trigger.as_str().replace('_', " ")
}
