use std::cmp::Ordering;

/// Describes how specific a selector is.
///
/// Ranks are totally ordered: a selector with more tags ranks higher, and among selectors with
/// the same number of tags, the one with more exact (non-wildcard) values ranks higher.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rank {
    /// Number of tags that match by an exact value.
    pub exact: usize,

    /// Number of tags that match by a wildcard (`*`).
    pub wildcard: usize,
}

// === impl Rank ===

impl Rank {
    pub const fn new(exact: usize, wildcard: usize) -> Self {
        Self { exact, wildcard }
    }

    /// Merges a source rank with a destination rank. Neither input can make the result lower.
    pub fn combined_with(self, other: Self) -> Self {
        Self {
            exact: self.exact + other.exact,
            wildcard: self.wildcard + other.wildcard,
        }
    }

    #[inline]
    fn total(&self) -> usize {
        self.exact + self.wildcard
    }
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total()
            .cmp(&other.total())
            .then_with(|| self.exact.cmp(&other.exact))
    }
}

impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
