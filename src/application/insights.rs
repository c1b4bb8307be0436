//! CravingInsights - the outward face of the craving analysis core.
//!
//! Every query degrades to a safe default when the event store fails:
//! an empty list, a baseline-only prediction or a zeroed report. Store
//! failures are logged and never returned to the caller.

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use super::event_log::EventLog;
use super::handlers::{RecordStrategyUsageCommand, RecordStrategyUsageHandler};
use super::trigger_stats_cache::TriggerStatsCache;
use crate::config::AppConfig;
use crate::domain::analysis::{
    AdviceBuilder, DailyRiskProfile, RiskContext, RiskModel, RiskPrediction, Strategy,
    StrategyRecommender, TriggerAnalyzer, TriggerStat, TriggerStats, WeeklyBehaviorReport,
    WeeklyReportGenerator, DEFAULT_MIN_HOUR_SAMPLES, REPORT_WINDOW_DAYS,
};
use crate::domain::behavior::{BehaviorEvent, BehaviorEventDraft, RETENTION_DAYS};
use crate::domain::foundation::{
    DomainError, HourOfDay, Intensity, Mood, UserId, ValidationError,
};
use crate::ports::{
    tally_usage, Clock, EventStore, RandomSource, StrategyUsageRecord, StrategyUsageStore,
};

/// Tunables for the facade.
#[derive(Debug, Clone)]
pub struct InsightsSettings {
    pub store_timeout: Duration,
    pub retention_days: i64,
    pub report_window_days: i64,
    pub min_hour_samples: usize,
}

impl InsightsSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            store_timeout: config.store.timeout(),
            retention_days: config.analysis.retention_days,
            report_window_days: config.analysis.report_window_days,
            min_hour_samples: config.analysis.min_hour_samples,
        }
    }
}

impl Default for InsightsSettings {
    fn default() -> Self {
        Self {
            store_timeout: Duration::from_secs(2),
            retention_days: RETENTION_DAYS,
            report_window_days: REPORT_WINDOW_DAYS,
            min_hour_samples: DEFAULT_MIN_HOUR_SAMPLES,
        }
    }
}

/// Result of logging a craving.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogCravingOutcome {
    /// The event as accepted after clamping.
    pub event: BehaviorEvent,
    /// Every field that was adjusted on the way in.
    #[serde(serialize_with = "serialize_adjustments")]
    pub adjustments: Vec<ValidationError>,
    /// False when the store could not be written.
    pub persisted: bool,
}

fn serialize_adjustments<S>(adjustments: &[ValidationError], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(adjustments.iter().map(|a| a.to_string()))
}

/// The user's history as read for one request.
struct Snapshot {
    events: Vec<BehaviorEvent>,
    stats: Arc<TriggerStats>,
}

impl Snapshot {
    fn empty() -> Self {
        Self {
            events: Vec::new(),
            stats: Arc::new(TriggerStats::default()),
        }
    }
}

pub struct CravingInsights {
    log: EventLog,
    usage: Arc<dyn StrategyUsageStore>,
    record_usage: RecordStrategyUsageHandler,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
    cache: TriggerStatsCache,
    settings: InsightsSettings,
}

impl CravingInsights {
    pub fn new(
        store: Arc<dyn EventStore>,
        usage: Arc<dyn StrategyUsageStore>,
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomSource>,
        settings: InsightsSettings,
    ) -> Self {
        Self {
            log: EventLog::new(
                store,
                Arc::clone(&clock),
                settings.store_timeout,
                settings.retention_days,
            ),
            record_usage: RecordStrategyUsageHandler::new(Arc::clone(&usage), Arc::clone(&clock)),
            usage,
            clock,
            random,
            cache: TriggerStatsCache::new(),
            settings,
        }
    }

    /// Sanitizes and appends a craving event.
    pub async fn log_craving(&self, user_id: &UserId, draft: BehaviorEventDraft) -> LogCravingOutcome {
        let ingested = self.log.ingest(draft);
        let result = self.log.append(user_id, ingested.event.clone()).await;
        self.cache.invalidate(user_id);

        let persisted = match result {
            Ok(stored) => {
                tracing::debug!(user_id = %user_id, stored, "Craving logged");
                true
            }
            Err(err) => {
                tracing::error!(
                    user_id = %user_id,
                    code = %err.code(),
                    error = %err,
                    "Failed to persist craving"
                );
                false
            }
        };

        LogCravingOutcome {
            event: ingested.event,
            adjustments: ingested.adjustments,
            persisted,
        }
    }

    /// Risk for `hour` today given the user's current state.
    pub async fn predict_craving_risk(
        &self,
        user_id: &UserId,
        hour: i32,
        mood: Mood,
        stress: i32,
    ) -> RiskPrediction {
        let snapshot = self.snapshot(user_id).await;
        let model = self.model(&snapshot);
        model.predict(HourOfDay::clamped(hour), &self.context(mood, stress), self.random.as_ref())
    }

    /// Risk for the current local hour.
    pub async fn get_current_risk(&self, user_id: &UserId, mood: Mood, stress: i32) -> RiskPrediction {
        let hour = self.clock.current_hour();
        self.predict_craving_risk(user_id, i32::from(hour.value()), mood, stress)
            .await
    }

    /// 24-hour risk curve for today.
    pub async fn generate_daily_risk_profile(
        &self,
        user_id: &UserId,
        mood: Mood,
        stress: i32,
    ) -> DailyRiskProfile {
        let snapshot = self.snapshot(user_id).await;
        let model = self.model(&snapshot);
        let today = self.clock.now().local_date(self.clock.offset());
        DailyRiskProfile::build(today, &model, &self.context(mood, stress), self.random.as_ref())
    }

    /// Hours of today rated high or critical for a neutral mood at medium stress.
    pub async fn get_high_risk_hours(&self, user_id: &UserId) -> Vec<HourOfDay> {
        self.generate_daily_risk_profile(user_id, Mood::Neutral, i32::from(Intensity::NEUTRAL.value()))
            .await
            .elevated_hours()
    }

    /// Every trigger's statistics, most frequent first.
    pub async fn get_trigger_analysis(&self, user_id: &UserId) -> Vec<TriggerStat> {
        self.snapshot(user_id).await.stats.by_frequency()
    }

    /// Triggers with the highest average craving.
    pub async fn get_dangerous_triggers(&self, user_id: &UserId, limit: usize) -> Vec<TriggerStat> {
        self.snapshot(user_id).await.stats.rank_dangerous(limit)
    }

    /// Triggers the user most often resists.
    pub async fn get_successful_triggers(&self, user_id: &UserId) -> Vec<TriggerStat> {
        self.snapshot(user_id).await.stats.rank_successful()
    }

    /// Summary of the configured report window ending now.
    pub async fn generate_weekly_report(&self, user_id: &UserId) -> WeeklyBehaviorReport {
        let snapshot = self.snapshot(user_id).await;
        WeeklyReportGenerator::generate(
            &snapshot.events,
            self.clock.now(),
            self.settings.report_window_days,
        )
    }

    /// Short advice lines built from triggers, current risk, weekdays and
    /// overall success.
    pub async fn get_personalized_advice(&self, user_id: &UserId) -> Vec<String> {
        let snapshot = self.snapshot(user_id).await;
        let model = self.model(&snapshot);
        let ctx = self.context(Mood::Neutral, i32::from(Intensity::NEUTRAL.value()));
        let current = model.predict(self.clock.current_hour(), &ctx, self.random.as_ref());
        AdviceBuilder::build(&snapshot.events, &snapshot.stats, &current)
    }

    /// Strategy catalog scored for this user, with their usage counters.
    pub async fn get_recommended_strategies(&self, user_id: &UserId) -> Vec<Strategy> {
        let (snapshot, records) = futures::join!(self.snapshot(user_id), self.usage.list(user_id));
        let usage = match records {
            Ok(records) => tally_usage(&records),
            Err(err) => {
                tracing::warn!(user_id = %user_id, error = %err, "Strategy usage unavailable, counters zeroed");
                Default::default()
            }
        };
        StrategyRecommender::recommend(&snapshot.stats, &usage)
    }

    /// Records that the user applied a strategy.
    pub async fn record_strategy_usage(
        &self,
        user_id: &UserId,
        strategy_id: &str,
        helped: bool,
    ) -> Result<StrategyUsageRecord, DomainError> {
        self.record_usage
            .handle(RecordStrategyUsageCommand {
                user_id: user_id.clone(),
                strategy_id: strategy_id.to_string(),
                helped,
            })
            .await
    }

    async fn snapshot(&self, user_id: &UserId) -> Snapshot {
        let generation = self.cache.generation();

        let events = match self.log.read_all(user_id).await {
            Ok(events) => events,
            Err(err) => {
                tracing::warn!(
                    user_id = %user_id,
                    code = %err.code(),
                    error = %err,
                    "Event store unavailable, using defaults"
                );
                return Snapshot::empty();
            }
        };

        let stats = match self.cache.lookup(user_id, &events) {
            Some(stats) => stats,
            None => {
                let stats = Arc::new(TriggerAnalyzer::recompute(&events));
                tracing::debug!(user_id = %user_id, triggers = stats.len(), "Trigger statistics recomputed");
                self.cache.store(user_id, generation, &events, Arc::clone(&stats));
                stats
            }
        };

        Snapshot { events, stats }
    }

    fn model(&self, snapshot: &Snapshot) -> RiskModel {
        if snapshot.events.is_empty() {
            return RiskModel::baseline_only();
        }
        RiskModel::from_history(&snapshot.events, &snapshot.stats, self.settings.min_hour_samples)
    }

    fn context(&self, mood: Mood, stress: i32) -> RiskContext {
        RiskContext::new(mood, Intensity::clamped(stress), self.clock.current_day())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FixedClock, InMemoryEventStore, InMemoryStrategyUsageStore, SeededRandom};
    use crate::domain::analysis::RiskLevel;
    use crate::domain::foundation::Timestamp;
    use crate::ports::EventStoreError;

    fn monday_morning() -> Timestamp {
        Timestamp::from_unix_secs(1_705_314_600)
    }

    fn user() -> UserId {
        UserId::new("alice").unwrap()
    }

    fn insights(store: &InMemoryEventStore) -> CravingInsights {
        CravingInsights::new(
            Arc::new(store.clone()),
            Arc::new(InMemoryStrategyUsageStore::new()),
            Arc::new(FixedClock::utc(monday_morning())),
            Arc::new(SeededRandom::new(7)),
            InsightsSettings::default(),
        )
    }

    fn at_eight(craving: i32, did_smoke: bool, mood: Mood, stress: i32) -> BehaviorEventDraft {
        BehaviorEventDraft::new(mood, stress, craving, did_smoke)
            .with_hour(8)
            .with_triggers(["morning_coffee"])
    }

    #[tokio::test]
    async fn log_then_analyze() {
        let store = InMemoryEventStore::new();
        let core = insights(&store);

        let outcome = core
            .log_craving(&user(), at_eight(8, false, Mood::Bad, 7))
            .await;
        assert!(outcome.persisted);
        assert!(outcome.adjustments.is_empty());
        core.log_craving(&user(), at_eight(6, true, Mood::Neutral, 5))
            .await;

        let stats = core.get_trigger_analysis(&user()).await;
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].frequency, 2);
        assert!((stats[0].average_craving_level - 7.0).abs() < 1e-9);
        assert!((stats[0].success_rate - 50.0).abs() < 1e-9);

        let prediction = core.predict_craving_risk(&user(), 8, Mood::Bad, 7).await;
        assert_eq!(prediction.risk_score, 100);
        assert_eq!(prediction.risk_level, RiskLevel::Critical);
        assert_eq!(prediction.contributing_triggers.len(), 1);
    }

    #[tokio::test]
    async fn cache_is_invalidated_by_append() {
        let store = InMemoryEventStore::new();
        let core = insights(&store);

        core.log_craving(&user(), at_eight(5, false, Mood::Neutral, 5)).await;
        assert_eq!(core.get_trigger_analysis(&user()).await[0].frequency, 1);

        core.log_craving(&user(), at_eight(5, false, Mood::Neutral, 5)).await;
        assert_eq!(core.get_trigger_analysis(&user()).await[0].frequency, 2);
    }

    #[tokio::test]
    async fn failing_store_degrades_to_defaults() {
        let store = InMemoryEventStore::new();
        store
            .fail_with(Some(EventStoreError::Read("offline".into())))
            .await;
        let core = insights(&store);

        let outcome = core.log_craving(&user(), at_eight(5, false, Mood::Good, 3)).await;
        assert!(!outcome.persisted);

        assert!(core.get_trigger_analysis(&user()).await.is_empty());
        let report = core.generate_weekly_report(&user()).await;
        assert_eq!(report.total_cravings, 0);
        assert!(!report.recommendations.is_empty());

        // baseline 10:00 is 45 on a Monday
        let current = core.get_current_risk(&user(), Mood::Neutral, 5).await;
        assert_eq!(current.risk_score, 45);
        assert_eq!(current.risk_level, RiskLevel::Medium);

        assert!(!core.get_personalized_advice(&user()).await.is_empty());
        assert_eq!(core.get_recommended_strategies(&user()).await.len(), 8);
    }

    #[tokio::test]
    async fn high_risk_hours_without_history_follow_baseline() {
        let core = insights(&InMemoryEventStore::new());

        let hours: Vec<u8> = core
            .get_high_risk_hours(&user())
            .await
            .iter()
            .map(|h| h.value())
            .collect();
        assert_eq!(hours, vec![7, 8, 9, 12, 13, 16, 17, 18, 19, 20, 21, 22]);
    }

    #[tokio::test]
    async fn strategy_usage_feeds_recommendations() {
        let core = insights(&InMemoryEventStore::new());

        core.record_strategy_usage(&user(), "brisk_walk", true).await.unwrap();
        core.record_strategy_usage(&user(), "brisk_walk", false).await.unwrap();
        assert!(core.record_strategy_usage(&user(), "nope", true).await.is_err());

        let strategies = core.get_recommended_strategies(&user()).await;
        let walk = strategies.iter().find(|s| s.id == "brisk_walk").unwrap();
        assert_eq!((walk.usage_count, walk.success_count), (2, 1));
    }
}
