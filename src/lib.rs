//! Craving Sentinel - craving risk insights for smoking cessation
//!
//! Logs self-reported nicotine cravings and turns the log into an hourly
//! risk prediction, trigger statistics, a 24-hour risk curve, a weekly
//! behavior report and ranked coping strategies.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
