//! Every matcher breaks ties the same way: policies are scanned in name order, a strictly more
//! specific match wins, and among equally specific matches the most recently created policy wins.
//! A complete tie keeps the policy that was scanned first.

use kuma_policy_core::{Rank, Resource};
use std::cmp::Ordering;

/// A policy together with the rank of the selector it matched by.
#[derive(Debug)]
pub(crate) struct Ranked<'p, P> {
    pub policy: &'p P,
    pub rank: Rank,
}

/// Returns references to `policies` ordered by name (then mesh), leaving the caller's slice
/// untouched so that a snapshot may be shared between concurrent matches.
pub(crate) fn by_name<P: Resource>(policies: &[P]) -> Vec<&P> {
    let mut sorted = policies.iter().collect::<Vec<_>>();
    sorted.sort_by(|a, b| {
        let (a, b) = (a.meta(), b.meta());
        a.name.cmp(&b.name).then_with(|| a.mesh.cmp(&b.mesh))
    });
    sorted
}

/// Replaces `best` with `candidate` if the candidate supersedes it.
pub(crate) fn keep_best<'p, P: Resource>(
    best: &mut Option<Ranked<'p, P>>,
    candidate: Ranked<'p, P>,
) {
    if best.as_ref().map_or(true, |best| candidate.supersedes(best)) {
        *best = Some(candidate);
    }
}

/// Orders the most specific match first, and the newest policy first among equal ranks.
pub(crate) fn most_specific_first<P: Resource>(a: &Ranked<'_, P>, b: &Ranked<'_, P>) -> Ordering {
    b.rank.cmp(&a.rank).then_with(|| {
        b.policy
            .meta()
            .creation_time
            .cmp(&a.policy.meta().creation_time)
    })
}

// === impl Ranked ===

impl<'p, P: Resource> Ranked<'p, P> {
    pub(crate) fn new(policy: &'p P, rank: Rank) -> Self {
        Self { policy, rank }
    }

    fn supersedes(&self, other: &Self) -> bool {
        match self.rank.cmp(&other.rank) {
            Ordering::Greater => true,
            Ordering::Equal => {
                self.policy.meta().creation_time > other.policy.meta().creation_time
            }
            Ordering::Less => false,
        }
    }
}

impl<P> Clone for Ranked<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for Ranked<'_, P> {}
