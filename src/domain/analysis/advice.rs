//! Personalized advice assembled from the other analysis components.

use std::collections::BTreeMap;

use super::risk_model::RiskPrediction;
use super::trigger_analyzer::TriggerStats;
use super::trigger_taxonomy::display_name;
use crate::domain::behavior::BehaviorEvent;
use crate::domain::foundation::{DayOfWeek, Percentage};

/// Events a weekday needs before it can be flagged.
pub const MIN_DAY_SAMPLES: u32 = 2;

/// Average craving at or above which a weekday is flagged.
pub const HIGH_RISK_DAY_AVERAGE: f64 = 6.0;

/// Most weekdays named in one piece of advice.
pub const MAX_HIGH_RISK_DAYS: usize = 2;

const STRONG_SUCCESS_RATE: u8 = 70;
const FAIR_SUCCESS_RATE: u8 = 40;

pub struct AdviceBuilder;

impl AdviceBuilder {
    /// Builds the advice list. Always contains at least the current-risk line.
    pub fn build(
        events: &[BehaviorEvent],
        stats: &TriggerStats,
        current: &RiskPrediction,
    ) -> Vec<String> {
        let mut advice = Vec::new();

        if let Some(top) = stats.rank_dangerous(1).first() {
            advice.push(format!(
                "Your most intense trigger is {} (average craving {:.1}/10). Have a plan ready before it shows up.",
                display_name(&top.trigger),
                top.average_craving_level
            ));
        }

        advice.push(format!(
            "Your craving risk right now is {} ({}/100). {}",
            current.risk_level, current.risk_score, current.recommendation
        ));

        let days = high_risk_weekdays(events);
        if !days.is_empty() {
            let names: Vec<&str> = days.iter().map(|d| d.name()).collect();
            advice.push(format!(
                "{} tend to be your hardest days. Plan something engaging for them.",
                names.join(" and ")
            ));
        }

        advice.push(success_summary(events));
        advice
    }
}

/// Weekdays with the highest average craving.
///
/// A day qualifies with at least two events averaging 6 or more. Returns at
/// most two days, strongest first, ties in weekday order.
pub fn high_risk_weekdays(events: &[BehaviorEvent]) -> Vec<DayOfWeek> {
    let mut by_day: BTreeMap<DayOfWeek, (u32, u32)> = BTreeMap::new();
    for event in events {
        let entry = by_day.entry(event.day_of_week).or_default();
        entry.0 += u32::from(event.craving_level.value());
        entry.1 += 1;
    }

    let mut days: Vec<(DayOfWeek, f64)> = by_day
        .into_iter()
        .filter(|(_, (_, count))| *count >= MIN_DAY_SAMPLES)
        .map(|(day, (sum, count))| (day, f64::from(sum) / f64::from(count)))
        .filter(|(_, avg)| *avg >= HIGH_RISK_DAY_AVERAGE)
        .collect();
    days.sort_by(|a, b| b.1.total_cmp(&a.1));
    days.into_iter()
        .take(MAX_HIGH_RISK_DAYS)
        .map(|(day, _)| day)
        .collect()
}

fn success_summary(events: &[BehaviorEvent]) -> String {
    if events.is_empty() {
        return "Start logging your cravings so the advice can adapt to your patterns.".to_string();
    }

    let overcome = events.iter().filter(|e| e.was_overcome()).count();
    let rate = Percentage::from_ratio(overcome, events.len());
    if rate.value() >= STRONG_SUCCESS_RATE {
        format!("You have resisted {} of logged cravings. Keep doing what works.", rate)
    } else if rate.value() >= FAIR_SUCCESS_RATE {
        format!(
            "You have resisted {} of logged cravings. Try a coping strategy at the first sign of an urge.",
            rate
        )
    } else {
        format!(
            "You have resisted {} of logged cravings so far. Every craving you ride out makes the next one easier.",
            rate
        )
    }
}
