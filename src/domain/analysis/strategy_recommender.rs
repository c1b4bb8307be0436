//! Strategy Recommender - scores the coping strategy catalog against
//! trigger statistics.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::trigger_analyzer::TriggerStats;
use super::trigger_taxonomy::TriggerCategory;
use crate::ports::StrategyUsageCounts;

/// Score every strategy starts from.
pub const BASE_EFFECTIVENESS: u8 = 50;

/// Upper bound on a strategy score.
pub const MAX_EFFECTIVENESS: u8 = 95;

/// Success rate a trigger category needs before its bonus applies.
pub const BONUS_SUCCESS_RATE: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyCategory {
    Mindfulness,
    Physical,
    Quick,
    Distraction,
    Social,
    Cognitive,
}

impl StrategyCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyCategory::Mindfulness => "mindfulness",
            StrategyCategory::Physical => "physical",
            StrategyCategory::Quick => "quick",
            StrategyCategory::Distraction => "distraction",
            StrategyCategory::Social => "social",
            StrategyCategory::Cognitive => "cognitive",
        }
    }
}

impl fmt::Display for StrategyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyTemplate {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: StrategyCategory,
}

pub const STRATEGY_CATALOG: [StrategyTemplate; 8] = [
    StrategyTemplate {
        id: "box_breathing",
        title: "Box breathing",
        description: "Breathe in for 4 seconds, hold for 4, out for 4, hold for 4. Repeat four times.",
        category: StrategyCategory::Mindfulness,
    },
    StrategyTemplate {
        id: "urge_surfing",
        title: "Urge surfing",
        description: "Notice the craving without acting on it and watch it rise, peak and fade.",
        category: StrategyCategory::Mindfulness,
    },
    StrategyTemplate {
        id: "brisk_walk",
        title: "Brisk walk",
        description: "Take a five minute walk to break the routine and release tension.",
        category: StrategyCategory::Physical,
    },
    StrategyTemplate {
        id: "cold_water",
        title: "Cold water",
        description: "Drink a full glass of cold water slowly.",
        category: StrategyCategory::Quick,
    },
    StrategyTemplate {
        id: "chew_gum",
        title: "Chew gum",
        description: "Keep your mouth busy with sugar-free gum or a healthy snack.",
        category: StrategyCategory::Quick,
    },
    StrategyTemplate {
        id: "puzzle_game",
        title: "Puzzle game",
        description: "Play a short puzzle game until the urge passes.",
        category: StrategyCategory::Distraction,
    },
    StrategyTemplate {
        id: "call_friend",
        title: "Call a friend",
        description: "Reach out to someone who supports your decision to quit.",
        category: StrategyCategory::Social,
    },
    StrategyTemplate {
        id: "reframe_reasons",
        title: "Review your reasons",
        description: "Read your list of reasons for quitting and the progress you have made.",
        category: StrategyCategory::Cognitive,
    },
];

/// Looks up a catalog entry by id.
pub fn find_strategy(id: &str) -> Option<&'static StrategyTemplate> {
    STRATEGY_CATALOG.iter().find(|s| s.id == id)
}

/// A scored strategy ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: StrategyCategory,
    /// 0-95.
    pub effectiveness: u8,
    pub usage_count: u32,
    pub success_count: u32,
}

/// Trigger category and strategy category pairs that earn a bonus.
const CATEGORY_BONUSES: [(TriggerCategory, StrategyCategory, u8); 3] = [
    (TriggerCategory::Emotional, StrategyCategory::Mindfulness, 20),
    (TriggerCategory::Routine, StrategyCategory::Physical, 15),
    (TriggerCategory::Social, StrategyCategory::Social, 25),
];

pub struct StrategyRecommender;

impl StrategyRecommender {
    /// Effectiveness of one strategy category given the trigger statistics.
    pub fn effectiveness(category: StrategyCategory, stats: &TriggerStats) -> u8 {
        let bonus: u8 = CATEGORY_BONUSES
            .iter()
            .filter(|(trigger_category, strategy_category, _)| {
                *strategy_category == category
                    && stats.category_succeeds(*trigger_category, BONUS_SUCCESS_RATE)
            })
            .map(|(_, _, bonus)| *bonus)
            .sum();
        BASE_EFFECTIVENESS.saturating_add(bonus).min(MAX_EFFECTIVENESS)
    }

    /// Scores the whole catalog, highest effectiveness first.
    ///
    /// Equal scores keep catalog order.
    pub fn recommend(
        stats: &TriggerStats,
        usage: &HashMap<String, StrategyUsageCounts>,
    ) -> Vec<Strategy> {
        let mut strategies: Vec<Strategy> = STRATEGY_CATALOG
            .iter()
            .map(|template| {
                let counts = usage.get(template.id).copied().unwrap_or_default();
                Strategy {
                    id: template.id.to_string(),
                    title: template.title.to_string(),
                    description: template.description.to_string(),
                    category: template.category,
                    effectiveness: Self::effectiveness(template.category, stats),
                    usage_count: counts.usage_count,
                    success_count: counts.success_count,
                }
            })
            .collect();
        strategies.sort_by(|a, b| b.effectiveness.cmp(&a.effectiveness));
        strategies
    }
}
