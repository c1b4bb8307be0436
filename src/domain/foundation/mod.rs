//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the craving-tracking domain.

mod errors;
mod ids;
mod mood;
mod percentage;
mod scale;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{EventId, TriggerId, UserId};
pub use mood::Mood;
pub use percentage::Percentage;
pub use scale::{DayOfWeek, HourOfDay, Intensity};
pub use timestamp::Timestamp;
