use kuma_policy_core::{Rank, Selector, Tags};

/// Returns the rank of the first selector that matches `tags`.
///
/// This is a first-match operation: a more specific selector later in the list is never
/// considered once an earlier one matches.
pub fn match_selector(tags: &Tags, selectors: &[Selector]) -> Option<Rank> {
    selectors
        .iter()
        .find(|selector| selector.matches(tags))
        .map(Selector::rank)
}
