//! Weekly Report Generator - seven-day behavior summary with rule-based
//! insights.
//!
//! Reads raw events directly; it does not go through the risk model.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::trigger_taxonomy::display_name;
use crate::domain::behavior::{within_last_days, BehaviorEvent};
use crate::domain::foundation::{HourOfDay, Mood, Percentage, Timestamp, TriggerId};

/// Default report window in days.
pub const REPORT_WINDOW_DAYS: i64 = 7;

/// Entries kept in each ranked list.
pub const TOP_ENTRIES: usize = 5;

/// Average craving below which the week counts as calm.
const CALM_WEEK_AVERAGE: f64 = 5.0;

/// Mood average above which a mood is flagged.
const MOOD_WARNING_AVERAGE: f64 = 7.0;

/// Tips included in every report, whatever the data.
pub const WEEKLY_RECOMMENDATIONS: &[&str] = &[
    "Plan a specific coping strategy for your riskiest hour of the day.",
    "Keep healthy substitutes like gum, water or a stress ball close at hand.",
    "Log every craving, even small ones. Better data means better predictions.",
    "Tell a friend about your goal and check in with them this week.",
    "Celebrate each craving you ride out. Every one makes the next easier.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Positive,
    Warning,
    Neutral,
}

/// A derived observation about the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub message: String,
}

impl Insight {
    fn new(kind: InsightKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerFrequency {
    pub trigger: TriggerId,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodCorrelation {
    pub mood: Mood,
    pub avg_craving: f64,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyCraving {
    pub hour: HourOfDay,
    pub avg_craving: f64,
    pub count: u32,
}

/// Summary of the last seven days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyBehaviorReport {
    pub period_start: Timestamp,
    pub period_end: Timestamp,
    pub total_cravings: u32,
    pub avg_craving_level: f64,
    pub successfully_overcome: u32,
    pub failed_attempts: u32,
    pub most_common_triggers: Vec<TriggerFrequency>,
    pub mood_correlation: Vec<MoodCorrelation>,
    pub peak_craving_times: Vec<HourlyCraving>,
    pub insights: Vec<Insight>,
    pub recommendations: Vec<String>,
}

impl WeeklyBehaviorReport {
    /// Report for a window with no usable data.
    pub fn empty(period_start: Timestamp, period_end: Timestamp) -> Self {
        Self {
            period_start,
            period_end,
            total_cravings: 0,
            avg_craving_level: 0.0,
            successfully_overcome: 0,
            failed_attempts: 0,
            most_common_triggers: Vec::new(),
            mood_correlation: Vec::new(),
            peak_craving_times: Vec::new(),
            insights: Vec::new(),
            recommendations: default_recommendations(),
        }
    }
}

fn default_recommendations() -> Vec<String> {
    WEEKLY_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect()
}

#[derive(Default)]
struct Mean {
    sum: u32,
    count: u32,
}

impl Mean {
    fn add(&mut self, value: u8) {
        self.sum += u32::from(value);
        self.count += 1;
    }

    fn value(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            f64::from(self.sum) / f64::from(self.count)
        }
    }
}

/// Stateless weekly report builder.
pub struct WeeklyReportGenerator;

impl WeeklyReportGenerator {
    /// Builds the report for `[now - window_days, now]` from the full log.
    pub fn generate(events: &[BehaviorEvent], now: Timestamp, window_days: i64) -> WeeklyBehaviorReport {
        let period_start = now.minus_days(window_days);
        let window = within_last_days(events, &now, window_days);
        if window.is_empty() {
            return WeeklyBehaviorReport::empty(period_start, now);
        }

        let total_cravings = window.len() as u32;
        let successfully_overcome = window.iter().filter(|e| e.was_overcome()).count() as u32;
        let failed_attempts = total_cravings - successfully_overcome;

        let mut overall = Mean::default();
        let mut by_mood: BTreeMap<Mood, Mean> = BTreeMap::new();
        let mut by_hour: BTreeMap<HourOfDay, Mean> = BTreeMap::new();
        let mut trigger_counts: HashMap<&TriggerId, u32> = HashMap::new();

        for event in &window {
            let level = event.craving_level.value();
            overall.add(level);
            by_mood.entry(event.mood).or_default().add(level);
            by_hour.entry(event.hour).or_default().add(level);
            for trigger in &event.triggers {
                *trigger_counts.entry(trigger).or_insert(0) += 1;
            }
        }

        let mut most_common_triggers: Vec<TriggerFrequency> = trigger_counts
            .into_iter()
            .map(|(trigger, count)| TriggerFrequency {
                trigger: trigger.clone(),
                count,
            })
            .collect();
        most_common_triggers.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.trigger.cmp(&b.trigger)));
        most_common_triggers.truncate(TOP_ENTRIES);

        // BTreeMap iteration gives scale order; the stable sort keeps it for ties
        let mut mood_correlation: Vec<MoodCorrelation> = by_mood
            .iter()
            .map(|(mood, mean)| MoodCorrelation {
                mood: *mood,
                avg_craving: mean.value(),
                count: mean.count,
            })
            .collect();
        mood_correlation.sort_by(|a, b| b.avg_craving.total_cmp(&a.avg_craving));

        let mut peak_craving_times: Vec<HourlyCraving> = by_hour
            .iter()
            .map(|(hour, mean)| HourlyCraving {
                hour: *hour,
                avg_craving: mean.value(),
                count: mean.count,
            })
            .collect();
        peak_craving_times.sort_by(|a, b| b.avg_craving.total_cmp(&a.avg_craving));
        peak_craving_times.truncate(TOP_ENTRIES);

        let mut report = WeeklyBehaviorReport {
            period_start,
            period_end: now,
            total_cravings,
            avg_craving_level: overall.value(),
            successfully_overcome,
            failed_attempts,
            most_common_triggers,
            mood_correlation,
            peak_craving_times,
            insights: Vec::new(),
            recommendations: default_recommendations(),
        };
        report.insights = derive_insights(&report);
        report
    }
}

fn derive_insights(report: &WeeklyBehaviorReport) -> Vec<Insight> {
    let mut insights = Vec::new();

    if report.successfully_overcome > report.failed_attempts {
        let pct = Percentage::from_ratio(
            report.successfully_overcome as usize,
            report.total_cravings as usize,
        );
        insights.push(Insight::new(
            InsightKind::Positive,
            "Great progress",
            format!("You overcame {} of your cravings this week.", pct),
        ));
    }

    if report.total_cravings > 0 && report.avg_craving_level < CALM_WEEK_AVERAGE {
        insights.push(Insight::new(
            InsightKind::Positive,
            "Cravings under control",
            format!(
                "Your average craving intensity was {:.1}/10. Cravings are getting weaker.",
                report.avg_craving_level
            ),
        ));
    }

    if let Some(top) = report.mood_correlation.first() {
        if top.avg_craving > MOOD_WARNING_AVERAGE {
            insights.push(Insight::new(
                InsightKind::Warning,
                "Mood connection",
                format!(
                    "Cravings are strongest when you feel {} (average {:.1}/10). Plan extra support for those moments.",
                    top.mood, top.avg_craving
                ),
            ));
        }
    }

    if let Some(peak) = report.peak_craving_times.first() {
        let trigger_note = report
            .most_common_triggers
            .first()
            .map(|t| format!(" Your most frequent trigger was {}.", display_name(&t.trigger)))
            .unwrap_or_default();
        insights.push(Insight::new(
            InsightKind::Neutral,
            "Peak time",
            format!(
                "Your strongest cravings came around {}.{}",
                peak.hour, trigger_note
            ),
        ));
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::behavior::fixtures::{craving, craving_with_mood, monday_morning, utc};
    use crate::domain::behavior::BehaviorEventDraft;

    fn generate(events: &[BehaviorEvent]) -> WeeklyBehaviorReport {
        WeeklyReportGenerator::generate(events, monday_morning(), REPORT_WINDOW_DAYS)
    }

    fn kinds(report: &WeeklyBehaviorReport) -> Vec<InsightKind> {
        report.insights.iter().map(|i| i.kind).collect()
    }

    #[test]
    fn empty_window_yields_zeroed_report_with_recommendations() {
        let report = generate(&[]);

        assert_eq!(report.total_cravings, 0);
        assert_eq!(report.avg_craving_level, 0.0);
        assert_eq!(report.successfully_overcome, 0);
        assert_eq!(report.failed_attempts, 0);
        assert!(report.most_common_triggers.is_empty());
        assert!(report.mood_correlation.is_empty());
        assert!(report.peak_craving_times.is_empty());
        assert!(report.insights.is_empty());
        assert!(!report.recommendations.is_empty());
        assert_eq!(report.period_end, monday_morning());
        assert_eq!(report.period_start, monday_morning().minus_days(7));
    }

    #[test]
    fn events_outside_window_are_ignored() {
        let now = monday_morning();
        let old = BehaviorEvent::ingest(
            BehaviorEventDraft::new(Mood::Bad, 5, 9, true).at(now.minus_days(10)),
            now,
            utc(),
        )
        .event;

        let report = generate(&[old]);
        assert_eq!(report.total_cravings, 0);
        assert!(report.insights.is_empty());
    }

    #[test]
    fn totals_and_outcomes() {
        let events = vec![
            craving(8, 8, false, &[]),
            craving(9, 6, true, &[]),
            craving(10, 4, false, &[]),
        ];
        let report = generate(&events);

        assert_eq!(report.total_cravings, 3);
        assert!((report.avg_craving_level - 6.0).abs() < 1e-9);
        assert_eq!(report.successfully_overcome, 2);
        assert_eq!(report.failed_attempts, 1);
    }

    #[test]
    fn most_common_triggers_top_five_by_count() {
        let events = vec![
            craving(8, 5, false, &["stress", "a", "b"]),
            craving(8, 5, false, &["stress", "c", "d"]),
            craving(8, 5, false, &["after_meal", "e"]),
            craving(8, 5, false, &["after_meal"]),
            craving(8, 5, false, &["stress"]),
        ];
        let report = generate(&events);

        let ids: Vec<_> = report
            .most_common_triggers
            .iter()
            .map(|t| (t.trigger.as_str(), t.count))
            .collect();
        assert_eq!(
            ids,
            vec![("stress", 3), ("after_meal", 2), ("a", 1), ("b", 1), ("c", 1)]
        );
    }

    #[test]
    fn mood_correlation_sorted_descending() {
        let events = vec![
            craving_with_mood(8, 4, false, &[], Mood::Good, 3),
            craving_with_mood(9, 9, true, &[], Mood::Terrible, 9),
            craving_with_mood(9, 7, true, &[], Mood::Terrible, 8),
            craving_with_mood(10, 5, false, &[], Mood::Neutral, 5),
        ];
        let report = generate(&events);

        let moods: Vec<_> = report.mood_correlation.iter().map(|m| m.mood).collect();
        assert_eq!(moods, vec![Mood::Terrible, Mood::Neutral, Mood::Good]);
        assert!((report.mood_correlation[0].avg_craving - 8.0).abs() < 1e-9);
        assert_eq!(report.mood_correlation[0].count, 2);
    }

    #[test]
    fn peak_times_keep_five_strongest_hours() {
        let events: Vec<_> = (0..8).map(|h| craving(h, h + 2, false, &[])).collect();
        let report = generate(&events);

        let hours: Vec<_> = report.peak_craving_times.iter().map(|p| p.hour.value()).collect();
        assert_eq!(hours, vec![7, 6, 5, 4, 3]);
    }

    #[test]
    fn good_week_produces_positive_insights() {
        let events = vec![
            craving(8, 3, false, &["stress"]),
            craving(9, 4, false, &[]),
            craving(10, 6, true, &[]),
        ];
        let report = generate(&events);

        assert_eq!(
            kinds(&report),
            vec![InsightKind::Positive, InsightKind::Positive, InsightKind::Neutral]
        );
        assert!(report.insights[0].message.contains("67%"));
    }

    #[test]
    fn intense_mood_triggers_warning() {
        let events = vec![
            craving_with_mood(20, 9, true, &[], Mood::Terrible, 9),
            craving_with_mood(21, 8, true, &[], Mood::Terrible, 9),
        ];
        let report = generate(&events);

        assert_eq!(kinds(&report), vec![InsightKind::Warning, InsightKind::Neutral]);
        assert!(report.insights[0].message.contains("terrible"));
    }

    #[test]
    fn balanced_week_without_intense_mood_has_only_peak_note() {
        let events = vec![craving(8, 6, false, &[]), craving(9, 6, true, &[])];
        let report = generate(&events);

        assert_eq!(kinds(&report), vec![InsightKind::Neutral]);
    }
}
