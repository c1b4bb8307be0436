//! Risk Model - hourly craving-risk prediction.
//!
//! The score starts from the static hourly baseline (or the user's own
//! average craving at that hour once there is enough history), then is
//! scaled by weekday, mood and stress factors and clamped to 0-100.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::risk_tables::{
    self, CRAVING_TO_RISK, CRITICAL_THRESHOLD, HIGH_THRESHOLD, MEDIUM_THRESHOLD,
};
use super::trigger_analyzer::TriggerStats;
use crate::domain::behavior::BehaviorEvent;
use crate::domain::foundation::{DayOfWeek, HourOfDay, Intensity, Mood, TriggerId};
use crate::ports::{choose, RandomSource};

/// Default number of events an hour needs before history replaces the baseline.
pub const DEFAULT_MIN_HOUR_SAMPLES: usize = 3;

/// Triggers need at least this many occurrences to be called contributing.
pub const CONTRIBUTING_MIN_FREQUENCY: u32 = 2;

/// Number of contributing triggers reported per prediction.
pub const CONTRIBUTING_LIMIT: usize = 3;

/// Coarse risk bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Buckets a 0-100 score.
    pub fn from_score(score: u8) -> Self {
        if score < MEDIUM_THRESHOLD {
            RiskLevel::Low
        } else if score < HIGH_THRESHOLD {
            RiskLevel::Medium
        } else if score < CRITICAL_THRESHOLD {
            RiskLevel::High
        } else {
            RiskLevel::Critical
        }
    }

    /// True for `high` and `critical`.
    pub fn is_elevated(&self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::Critical)
    }

    /// Canned advice for this level.
    pub fn tips(&self) -> &'static [&'static str] {
        match self {
            RiskLevel::Low => risk_tables::LOW_RISK_TIPS,
            RiskLevel::Medium => risk_tables::MEDIUM_RISK_TIPS,
            RiskLevel::High => risk_tables::HIGH_RISK_TIPS,
            RiskLevel::Critical => risk_tables::CRITICAL_RISK_TIPS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Risk estimate for one hour. Computed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskPrediction {
    pub hour: HourOfDay,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub contributing_triggers: Vec<TriggerId>,
    pub recommendation: String,
}

/// Prediction inputs describing the user's current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskContext {
    pub mood: Mood,
    pub stress: Intensity,
    pub day: DayOfWeek,
}

impl RiskContext {
    pub fn new(mood: Mood, stress: Intensity, day: DayOfWeek) -> Self {
        Self { mood, stress, day }
    }
}

/// Snapshot of the history the model needs, built once per request.
#[derive(Debug, Clone)]
pub struct RiskModel {
    /// Baseline replacements from history, indexed by hour.
    hour_overrides: [Option<f64>; HourOfDay::COUNT],
    contributing: Vec<TriggerId>,
}

impl RiskModel {
    /// Model with static baselines only, used when history is unavailable.
    pub fn baseline_only() -> Self {
        Self {
            hour_overrides: [None; HourOfDay::COUNT],
            contributing: Vec::new(),
        }
    }

    /// Model informed by the user's event log and trigger statistics.
    ///
    /// An hour's baseline is replaced by `average craving * 10` once that
    /// hour has at least `min_hour_samples` events.
    pub fn from_history(
        events: &[BehaviorEvent],
        stats: &TriggerStats,
        min_hour_samples: usize,
    ) -> Self {
        let mut sums = [0u32; HourOfDay::COUNT];
        let mut counts = [0usize; HourOfDay::COUNT];
        for event in events {
            let i = event.hour.index();
            sums[i] += u32::from(event.craving_level.value());
            counts[i] += 1;
        }

        let mut hour_overrides = [None; HourOfDay::COUNT];
        for (i, slot) in hour_overrides.iter_mut().enumerate() {
            if counts[i] > 0 && counts[i] >= min_hour_samples {
                *slot = Some(f64::from(sums[i]) / counts[i] as f64 * CRAVING_TO_RISK);
            }
        }

        Self {
            hour_overrides,
            contributing: stats.contributing(CONTRIBUTING_MIN_FREQUENCY, CONTRIBUTING_LIMIT),
        }
    }

    /// Base risk for an hour before contextual factors.
    pub fn base_risk(&self, hour: HourOfDay) -> f64 {
        self.hour_overrides[hour.index()].unwrap_or_else(|| risk_tables::hourly_baseline(hour))
    }

    /// True when history replaced the static baseline for this hour.
    pub fn uses_history(&self, hour: HourOfDay) -> bool {
        self.hour_overrides[hour.index()].is_some()
    }

    /// Final 0-100 score for an hour in the given context.
    pub fn score(&self, hour: HourOfDay, ctx: &RiskContext) -> u8 {
        let raw = self.base_risk(hour)
            * risk_tables::day_multiplier(ctx.day)
            * risk_tables::mood_factor(ctx.mood)
            * risk_tables::stress_factor(ctx.stress);
        raw.clamp(0.0, 100.0).round() as u8
    }

    /// Full prediction including contributing triggers and a recommendation.
    pub fn predict(
        &self,
        hour: HourOfDay,
        ctx: &RiskContext,
        random: &dyn RandomSource,
    ) -> RiskPrediction {
        let risk_score = self.score(hour, ctx);
        let risk_level = RiskLevel::from_score(risk_score);
        let recommendation = choose(random, risk_level.tips())
            .copied()
            .unwrap_or_default()
            .to_string();

        RiskPrediction {
            hour,
            risk_score,
            risk_level,
            contributing_triggers: self.contributing.clone(),
            recommendation,
        }
    }
}
