//! Trigger Analyzer - per-trigger frequency, severity and success statistics.
//!
//! Statistics are always recomputed from the event set; nothing is kept
//! between calls. Sums are integral, so the result depends only on the
//! multiset of events and never on their order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::trigger_taxonomy::{category_of, TriggerCategory};
use crate::domain::behavior::BehaviorEvent;
use crate::domain::foundation::TriggerId;

/// Minimum frequency for a trigger to appear in the success ranking.
pub const MIN_FREQUENCY_FOR_SUCCESS_RANKING: u32 = 3;

/// Size of the success ranking.
pub const SUCCESS_RANKING_SIZE: usize = 5;

/// Derived statistics for a single trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerStat {
    pub trigger: TriggerId,
    /// Number of events carrying this trigger.
    pub frequency: u32,
    /// Mean craving level across those events.
    pub average_craving_level: f64,
    /// Share of those events that were resisted, 0-100.
    pub success_rate: f64,
    /// Taxonomy category, `None` for unknown trigger ids.
    pub category: Option<TriggerCategory>,
}

#[derive(Default)]
struct Accumulator {
    frequency: u32,
    craving_sum: u32,
    overcome: u32,
}

/// Statistics for every trigger seen in an event set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriggerStats {
    stats: BTreeMap<TriggerId, TriggerStat>,
}

/// Stateless calculator for trigger statistics.
pub struct TriggerAnalyzer;

impl TriggerAnalyzer {
    /// Recomputes statistics from scratch.
    pub fn recompute<'a, I>(events: I) -> TriggerStats
    where
        I: IntoIterator<Item = &'a BehaviorEvent>,
    {
        let mut acc: BTreeMap<TriggerId, Accumulator> = BTreeMap::new();

        for event in events {
            for trigger in &event.triggers {
                let entry = acc.entry(trigger.clone()).or_default();
                entry.frequency += 1;
                entry.craving_sum += u32::from(event.craving_level.value());
                if event.was_overcome() {
                    entry.overcome += 1;
                }
            }
        }

        let stats = acc
            .into_iter()
            .map(|(trigger, a)| {
                let frequency = f64::from(a.frequency);
                let stat = TriggerStat {
                    category: category_of(&trigger),
                    trigger: trigger.clone(),
                    frequency: a.frequency,
                    average_craving_level: f64::from(a.craving_sum) / frequency,
                    success_rate: f64::from(a.overcome) / frequency * 100.0,
                };
                (trigger, stat)
            })
            .collect();

        TriggerStats { stats }
    }
}

fn by_severity_desc(a: &&TriggerStat, b: &&TriggerStat) -> Ordering {
    b.average_craving_level
        .total_cmp(&a.average_craving_level)
        .then_with(|| a.trigger.cmp(&b.trigger))
}

impl TriggerStats {
    pub fn get(&self, trigger: &TriggerId) -> Option<&TriggerStat> {
        self.stats.get(trigger)
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Iterates statistics in trigger id order.
    pub fn iter(&self) -> impl Iterator<Item = &TriggerStat> {
        self.stats.values()
    }

    /// All statistics, most frequent first (ties by trigger id).
    pub fn by_frequency(&self) -> Vec<TriggerStat> {
        let mut sorted: Vec<_> = self.stats.values().collect();
        sorted.sort_by(|a, b| {
            b.frequency
                .cmp(&a.frequency)
                .then_with(|| a.trigger.cmp(&b.trigger))
        });
        sorted.into_iter().cloned().collect()
    }

    /// Triggers with the highest average craving level.
    pub fn rank_dangerous(&self, limit: usize) -> Vec<TriggerStat> {
        let mut sorted: Vec<_> = self.stats.values().collect();
        sorted.sort_by(by_severity_desc);
        sorted.into_iter().take(limit).cloned().collect()
    }

    /// Triggers the user most often resists, among those seen at least
    /// three times.
    pub fn rank_successful(&self) -> Vec<TriggerStat> {
        let mut sorted: Vec<_> = self
            .stats
            .values()
            .filter(|s| s.frequency >= MIN_FREQUENCY_FOR_SUCCESS_RANKING)
            .collect();
        sorted.sort_by(|a, b| {
            b.success_rate
                .total_cmp(&a.success_rate)
                .then_with(|| b.frequency.cmp(&a.frequency))
                .then_with(|| a.trigger.cmp(&b.trigger))
        });
        sorted
            .into_iter()
            .take(SUCCESS_RANKING_SIZE)
            .cloned()
            .collect()
    }

    /// Most severe recurring triggers (frequency >= `min_frequency`).
    pub fn contributing(&self, min_frequency: u32, limit: usize) -> Vec<TriggerId> {
        let mut sorted: Vec<_> = self
            .stats
            .values()
            .filter(|s| s.frequency >= min_frequency)
            .collect();
        sorted.sort_by(by_severity_desc);
        sorted
            .into_iter()
            .take(limit)
            .map(|s| s.trigger.clone())
            .collect()
    }

    /// True if any trigger of `category` has a success rate of at least
    /// `min_success_rate` percent.
    pub fn category_succeeds(&self, category: TriggerCategory, min_success_rate: f64) -> bool {
        self.stats
            .values()
            .any(|s| s.category == Some(category) && s.success_rate >= min_success_rate)
    }
}
