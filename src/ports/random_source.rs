//! RandomSource port - injectable randomness.
//!
//! Message selection goes through this port so that tests can pin the
//! choice with a seeded or fixed source.

/// Source of uniformly distributed indexes.
pub trait RandomSource: Send + Sync {
    /// Returns an index in `0..upper`. `upper` is never zero.
    fn next_index(&self, upper: usize) -> usize;
}

/// Picks one element of `items`, `None` when empty.
pub fn choose<'a, T>(random: &dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    // Guard against sources that ignore the bound
    let index = random.next_index(items.len()) % items.len();
    items.get(index)
}
