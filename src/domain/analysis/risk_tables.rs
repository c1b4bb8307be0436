//! Static configuration tables for the risk model.
//!
//! Hourly baselines, weekday multipliers, mood and stress factors, level
//! thresholds and the canned recommendation lists. All immutable.

use crate::domain::foundation::{DayOfWeek, HourOfDay, Intensity, Mood};

/// Baseline craving risk per hour of day (0-100): quiet overnight, a
/// morning spike around the first coffee, a lunch bump and an evening peak.
pub const HOURLY_BASELINE: [u8; 24] = [
    15, 10, 5, 5, 5, 10, // 00-05
    25, 55, 70, 60, 45, 40, // 06-11
    55, 50, 40, 45, 50, 65, // 12-17
    70, 65, 70, 75, 60, 35, // 18-23
];

/// Weekday multipliers, Sunday first. Friday is the riskiest day and
/// Sunday the calmest; Monday to Wednesday are neutral.
pub const DAY_MULTIPLIERS: [f64; 7] = [0.9, 1.0, 1.0, 1.0, 1.05, 1.2, 1.1];

/// Scale of the craving level (1-10) relative to the risk score (0-100).
pub const CRAVING_TO_RISK: f64 = 10.0;

/// Stress level treated as neutral by the stress factor.
pub const NEUTRAL_STRESS: i32 = 5;

/// Change in risk per stress point away from neutral.
pub const STRESS_STEP: f64 = 0.1;

/// Scores below this are low risk.
pub const MEDIUM_THRESHOLD: u8 = 25;
/// Scores below this are medium risk.
pub const HIGH_THRESHOLD: u8 = 50;
/// Scores below this are high risk; anything above is critical.
pub const CRITICAL_THRESHOLD: u8 = 75;

pub fn hourly_baseline(hour: HourOfDay) -> f64 {
    f64::from(HOURLY_BASELINE[hour.index()])
}

pub fn day_multiplier(day: DayOfWeek) -> f64 {
    DAY_MULTIPLIERS[day.index()]
}

pub fn mood_factor(mood: Mood) -> f64 {
    match mood {
        Mood::Great => 0.7,
        Mood::Good => 0.85,
        Mood::Neutral => 1.0,
        Mood::Bad => 1.3,
        Mood::Terrible => 1.5,
    }
}

pub fn stress_factor(stress: Intensity) -> f64 {
    1.0 + f64::from(i32::from(stress.value()) - NEUTRAL_STRESS) * STRESS_STEP
}

pub const LOW_RISK_TIPS: &[&str] = &[
    "Risk is low right now. A good moment to remind yourself why you quit.",
    "You're in a calm window. Keep doing what works for you.",
    "Low risk this hour. Consider a short walk to keep the momentum going.",
];

pub const MEDIUM_RISK_TIPS: &[&str] = &[
    "Moderate risk ahead. Keep a glass of water or some gum within reach.",
    "Cravings may show up soon. Plan a quick distraction for the next hour.",
    "Stay aware of your triggers this hour and have a coping strategy ready.",
];

pub const HIGH_RISK_TIPS: &[&str] = &[
    "High risk period. Try a breathing exercise before the craving builds.",
    "This is one of your tougher hours. Avoid places where you used to smoke.",
    "Reach out to a friend or support line if the urge grows.",
    "Keep your hands and mind busy. Cravings usually pass within 10 minutes.",
];

pub const CRITICAL_RISK_TIPS: &[&str] = &[
    "Critical risk right now. Delay any decision to smoke by 10 minutes and breathe deeply.",
    "Your risk is at its peak. Call someone from your support network now.",
    "Leave the situation if you can. A change of scenery breaks the craving loop.",
    "Use your strongest coping strategy now. Every craving you ride out gets easier.",
];
