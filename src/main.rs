use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use craving_sentinel::adapters::{
    FileEventStore, FileStrategyUsageStore, InMemoryEventStore, InMemoryStrategyUsageStore,
    SystemClock, ThreadRandom,
};
use craving_sentinel::application::{CravingInsights, InsightsSettings};
use craving_sentinel::config::{AppConfig, LoggingConfig, StoreBackend};
use craving_sentinel::domain::behavior::BehaviorEventDraft;
use craving_sentinel::domain::foundation::{Mood, UserId};
use craving_sentinel::ports::{EventStore, StrategyUsageStore};

#[derive(Parser, Debug)]
#[command(name = "craving-sentinel")]
#[command(about = "Craving risk prediction and behavior reports", long_about = None)]
#[command(version)]
struct Cli {
    /// User whose log to operate on
    #[arg(short, long, env = "CRAVING_SENTINEL_USER", default_value = "default")]
    user: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Log a craving
    Log {
        /// Craving intensity (1-10)
        #[arg(short, long)]
        craving: i32,

        /// Stress level (1-10)
        #[arg(short, long, default_value_t = 5)]
        stress: i32,

        /// great, good, neutral, bad or terrible
        #[arg(short, long, default_value = "neutral")]
        mood: Mood,

        /// Gave in and smoked
        #[arg(long)]
        smoked: bool,

        /// Comma-separated trigger ids
        #[arg(short, long, value_delimiter = ',')]
        triggers: Vec<String>,

        /// Hour of day, defaults to now
        #[arg(long)]
        hour: Option<i32>,

        #[arg(long)]
        activity: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        weather: Option<String>,
    },

    /// Predict craving risk for an hour (defaults to the current hour)
    Risk {
        #[arg(long)]
        hour: Option<i32>,

        #[arg(short, long, default_value = "neutral")]
        mood: Mood,

        #[arg(short, long, default_value_t = 5)]
        stress: i32,
    },

    /// 24-hour risk curve for today
    Profile {
        #[arg(short, long, default_value = "neutral")]
        mood: Mood,

        #[arg(short, long, default_value_t = 5)]
        stress: i32,
    },

    /// Hours of today rated high or critical
    HighRisk,

    /// Trigger statistics
    Triggers {
        #[arg(long, value_enum, default_value = "frequency")]
        rank: TriggerRanking,

        /// Entries shown for the dangerous ranking
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },

    /// Report for the last seven days
    Report,

    /// Coping strategies ranked for this user
    Strategies,

    /// Record that a coping strategy was used
    UsedStrategy {
        /// Strategy id, e.g. box_breathing
        strategy_id: String,

        /// The craving passed without smoking
        #[arg(long)]
        helped: bool,
    },

    /// Personalized advice
    Advice,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TriggerRanking {
    /// All triggers, most frequent first
    Frequency,
    /// Highest average craving first
    Dangerous,
    /// Most often resisted first
    Successful,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    init_tracing(&config.logging);

    let user_id = UserId::new(cli.user.as_str())?;
    let insights = build_insights(&config)?;

    match cli.command {
        Commands::Log {
            craving,
            stress,
            mood,
            smoked,
            triggers,
            hour,
            activity,
            location,
            weather,
        } => {
            let mut draft = BehaviorEventDraft::new(mood, stress, craving, smoked).with_triggers(triggers);
            if let Some(hour) = hour {
                draft = draft.with_hour(hour);
            }
            if let Some(activity) = activity {
                draft = draft.with_activity(activity);
            }
            if let Some(location) = location {
                draft = draft.with_location(location);
            }
            if let Some(weather) = weather {
                draft = draft.with_weather(weather);
            }
            print_json(&insights.log_craving(&user_id, draft).await)
        }
        Commands::Risk { hour, mood, stress } => {
            let prediction = match hour {
                Some(hour) => insights.predict_craving_risk(&user_id, hour, mood, stress).await,
                None => insights.get_current_risk(&user_id, mood, stress).await,
            };
            print_json(&prediction)
        }
        Commands::Profile { mood, stress } => {
            print_json(&insights.generate_daily_risk_profile(&user_id, mood, stress).await)
        }
        Commands::HighRisk => print_json(&insights.get_high_risk_hours(&user_id).await),
        Commands::Triggers { rank, limit } => {
            let stats = match rank {
                TriggerRanking::Frequency => insights.get_trigger_analysis(&user_id).await,
                TriggerRanking::Dangerous => insights.get_dangerous_triggers(&user_id, limit).await,
                TriggerRanking::Successful => insights.get_successful_triggers(&user_id).await,
            };
            print_json(&stats)
        }
        Commands::Report => print_json(&insights.generate_weekly_report(&user_id).await),
        Commands::Strategies => print_json(&insights.get_recommended_strategies(&user_id).await),
        Commands::UsedStrategy {
            strategy_id,
            helped,
        } => {
            let record = insights
                .record_strategy_usage(&user_id, &strategy_id, helped)
                .await?;
            print_json(&record)
        }
        Commands::Advice => print_json(&insights.get_personalized_advice(&user_id).await),
    }
}

fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_insights(config: &AppConfig) -> anyhow::Result<CravingInsights> {
    let (events, usage): (Arc<dyn EventStore>, Arc<dyn StrategyUsageStore>) = match config.store.backend {
        StoreBackend::File => (
            Arc::new(FileEventStore::new(&config.store.data_dir, config.store.format)),
            Arc::new(FileStrategyUsageStore::new(&config.store.data_dir, config.store.format)),
        ),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; nothing is kept after this command");
            (
                Arc::new(InMemoryEventStore::new()),
                Arc::new(InMemoryStrategyUsageStore::new()),
            )
        }
    };

    let clock = SystemClock::new(config.analysis.offset()?);
    Ok(CravingInsights::new(
        events,
        usage,
        Arc::new(clock),
        Arc::new(ThreadRandom),
        InsightsSettings::from_config(config),
    ))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
