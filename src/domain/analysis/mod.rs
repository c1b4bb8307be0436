//! Analysis Module - Pure computations over the craving log.
//!
//! # Components
//!
//! - `TriggerAnalyzer` - Per-trigger frequency, severity and success rate
//! - `RiskModel` - Hourly craving risk from baselines, history and context
//! - `DailyRiskProfile` - The 24-hour risk curve
//! - `WeeklyReportGenerator` - Seven-day summary with insights
//! - `StrategyRecommender` - Coping strategies scored against trigger stats
//! - `AdviceBuilder` - Short personalized advice lines
//!
//! Everything here is a function of its inputs. Storage, time and randomness
//! arrive through ports.

mod advice;
mod daily_profile;
mod risk_model;
pub mod risk_tables;
mod strategy_recommender;
mod trigger_analyzer;
mod trigger_taxonomy;
mod weekly_report;

pub use advice::{high_risk_weekdays, AdviceBuilder};
pub use daily_profile::{DailyRiskProfile, HIGHLIGHT_HOURS};
pub use risk_model::{
    RiskContext, RiskLevel, RiskModel, RiskPrediction, CONTRIBUTING_LIMIT,
    CONTRIBUTING_MIN_FREQUENCY, DEFAULT_MIN_HOUR_SAMPLES,
};
pub use strategy_recommender::{
    find_strategy, Strategy, StrategyCategory, StrategyRecommender, StrategyTemplate,
    BASE_EFFECTIVENESS, MAX_EFFECTIVENESS, STRATEGY_CATALOG,
};
pub use trigger_analyzer::{
    TriggerAnalyzer, TriggerStat, TriggerStats, MIN_FREQUENCY_FOR_SUCCESS_RANKING,
    SUCCESS_RANKING_SIZE,
};
pub use trigger_taxonomy::{category_of, display_name, TriggerCategory};
pub use weekly_report::{
    HourlyCraving, Insight, InsightKind, MoodCorrelation, TriggerFrequency, WeeklyBehaviorReport,
    WeeklyReportGenerator, REPORT_WINDOW_DAYS, TOP_ENTRIES, WEEKLY_RECOMMENDATIONS,
};
