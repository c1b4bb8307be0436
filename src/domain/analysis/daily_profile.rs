//! Daily Risk Profile - the 24-hour risk curve.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::risk_model::{RiskContext, RiskModel, RiskPrediction};
use crate::domain::foundation::HourOfDay;
use crate::ports::RandomSource;

/// Number of hours reported as peak and as safest.
pub const HIGHLIGHT_HOURS: usize = 5;

/// Risk curve for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRiskProfile {
    pub date: NaiveDate,
    /// One prediction per hour, midnight first.
    pub hourly_risks: Vec<RiskPrediction>,
    /// Rounded mean of the 24 scores.
    pub overall_risk: u8,
    /// Riskiest hours, highest first.
    pub peak_hours: Vec<HourOfDay>,
    /// Calmest hours, lowest first.
    pub safest_hours: Vec<HourOfDay>,
}

impl DailyRiskProfile {
    /// Runs the model for every hour of `date`.
    ///
    /// Ties in peak and safest ordering go to the earlier hour.
    pub fn build(
        date: NaiveDate,
        model: &RiskModel,
        ctx: &RiskContext,
        random: &dyn RandomSource,
    ) -> Self {
        let hourly_risks: Vec<RiskPrediction> = HourOfDay::all()
            .map(|hour| model.predict(hour, ctx, random))
            .collect();

        let total: u32 = hourly_risks.iter().map(|p| u32::from(p.risk_score)).sum();
        let overall_risk = (f64::from(total) / HourOfDay::COUNT as f64).round() as u8;

        let mut by_score: Vec<&RiskPrediction> = hourly_risks.iter().collect();

        by_score.sort_by(|a, b| b.risk_score.cmp(&a.risk_score).then(a.hour.cmp(&b.hour)));
        let peak_hours = by_score.iter().take(HIGHLIGHT_HOURS).map(|p| p.hour).collect();

        by_score.sort_by(|a, b| a.risk_score.cmp(&b.risk_score).then(a.hour.cmp(&b.hour)));
        let safest_hours = by_score.iter().take(HIGHLIGHT_HOURS).map(|p| p.hour).collect();

        Self {
            date,
            hourly_risks,
            overall_risk,
            peak_hours,
            safest_hours,
        }
    }

    /// Hours whose level is high or critical, in clock order.
    pub fn elevated_hours(&self) -> Vec<HourOfDay> {
        self.hourly_risks
            .iter()
            .filter(|p| p.risk_level.is_elevated())
            .map(|p| p.hour)
            .collect()
    }

    /// Prediction for a single hour.
    pub fn at(&self, hour: HourOfDay) -> Option<&RiskPrediction> {
        self.hourly_risks.get(hour.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::risk_tables::HOURLY_BASELINE;
    use crate::domain::foundation::{DayOfWeek, Intensity, Mood};
    use std::collections::HashSet;

    struct First;

    impl RandomSource for First {
        fn next_index(&self, _upper: usize) -> usize {
            0
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn neutral_monday() -> RiskContext {
        RiskContext::new(Mood::Neutral, Intensity::NEUTRAL, DayOfWeek::MONDAY)
    }

    fn hours(values: &[u8]) -> Vec<HourOfDay> {
        values.iter().map(|h| HourOfDay::clamped(i32::from(*h))).collect()
    }

    #[test]
    fn profile_covers_all_hours_in_order() {
        let profile =
            DailyRiskProfile::build(date(), &RiskModel::baseline_only(), &neutral_monday(), &First);

        assert_eq!(profile.hourly_risks.len(), 24);
        for (i, prediction) in profile.hourly_risks.iter().enumerate() {
            assert_eq!(prediction.hour.index(), i);
        }
        assert_eq!(profile.at(HourOfDay::clamped(8)).unwrap().risk_score, 70);
    }

    #[test]
    fn overall_risk_is_rounded_mean() {
        let profile =
            DailyRiskProfile::build(date(), &RiskModel::baseline_only(), &neutral_monday(), &First);

        let sum: u32 = HOURLY_BASELINE.iter().map(|v| u32::from(*v)).sum();
        let expected = (f64::from(sum) / 24.0).round() as u8;
        assert_eq!(profile.overall_risk, expected);
    }

    #[test]
    fn peak_and_safest_hours_break_ties_by_hour() {
        let profile =
            DailyRiskProfile::build(date(), &RiskModel::baseline_only(), &neutral_monday(), &First);

        // 21:75, then 70 at 08, 18, 20, then 65 at 17 and 19
        assert_eq!(profile.peak_hours, hours(&[21, 8, 18, 20, 17]));
        // 5 at 02-04, then 10 at 01 and 05
        assert_eq!(profile.safest_hours, hours(&[2, 3, 4, 1, 5]));
    }

    #[test]
    fn highlight_lists_hold_five_distinct_hours() {
        let ctx = RiskContext::new(Mood::Terrible, Intensity::clamped(10), DayOfWeek::FRIDAY);
        let profile = DailyRiskProfile::build(date(), &RiskModel::baseline_only(), &ctx, &First);

        for list in [&profile.peak_hours, &profile.safest_hours] {
            assert_eq!(list.len(), HIGHLIGHT_HOURS);
            let unique: HashSet<_> = list.iter().collect();
            assert_eq!(unique.len(), HIGHLIGHT_HOURS);
        }
    }

    #[test]
    fn elevated_hours_are_high_or_critical() {
        let profile =
            DailyRiskProfile::build(date(), &RiskModel::baseline_only(), &neutral_monday(), &First);

        let elevated = profile.elevated_hours();
        assert!(elevated.contains(&HourOfDay::clamped(8)));
        assert!(!elevated.contains(&HourOfDay::clamped(3)));
        for hour in elevated {
            assert!(profile.at(hour).unwrap().risk_score >= 50);
        }
    }
}
