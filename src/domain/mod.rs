//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `behavior` - Logged craving events, ingestion and retention
//! - `analysis` - Pure computations (triggers, risk, reports, strategies)

pub mod analysis;
pub mod behavior;
pub mod foundation;
