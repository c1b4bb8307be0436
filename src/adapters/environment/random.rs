//! RandomSource adapters.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

use crate::ports::RandomSource;

/// Thread-local OS-seeded randomness for production use.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_index(&self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..upper)
    }
}

/// Deterministic randomness for tests and reproducible runs.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_index(&self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        // A poisoned lock still holds a usable generator
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0..upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_random_stays_in_bounds() {
        let random = ThreadRandom;
        for _ in 0..100 {
            assert!(random.next_index(3) < 3);
        }
        assert_eq!(random.next_index(0), 0);
    }

    #[test]
    fn same_seed_gives_same_sequence() {
        let a = SeededRandom::new(42);
        let b = SeededRandom::new(42);

        let first: Vec<_> = (0..10).map(|_| a.next_index(100)).collect();
        let second: Vec<_> = (0..10).map(|_| b.next_index(100)).collect();
        assert_eq!(first, second);
    }
}
