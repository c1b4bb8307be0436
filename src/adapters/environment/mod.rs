//! Environment Adapters
//!
//! Implementations of the Clock and RandomSource ports.

mod clock;
mod random;

pub use clock::{FixedClock, SystemClock};
pub use random::{SeededRandom, ThreadRandom};
