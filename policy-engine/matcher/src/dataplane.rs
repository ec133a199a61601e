//! Selects the single policy that applies to a dataplane, or to each of its inbounds.

use crate::order::{self, Ranked};
use ahash::AHashMap as HashMap;
use kuma_policy_core::{Dataplane, DataplanePolicy, InboundInterface, Rank, Selector};
use tracing::trace;

pub type InboundDataplanePolicyMap<P> = HashMap<InboundInterface, P>;

/// Picks the most specific policy that selects the dataplane.
pub fn select_dataplane_policy<P>(dataplane: &Dataplane, policies: &[P]) -> Option<P>
where
    P: DataplanePolicy + Clone,
{
    select_dataplane_policy_with_matcher(|selector| dataplane.matches(selector), policies)
}

/// Picks the most specific policy with a selector accepted by `matches`.
///
/// A policy without selectors, or with an empty selector, matches everything with a zero rank:
/// any policy that matches by a non-empty selector takes precedence over it, however old. Among
/// equally specific policies the newest wins.
pub fn select_dataplane_policy_with_matcher<P, F>(matches: F, policies: &[P]) -> Option<P>
where
    P: DataplanePolicy + Clone,
    F: Fn(&Selector) -> bool,
{
    best_policy(&matches, &order::by_name(policies)).cloned()
}

/// Picks the most specific policy for each inbound of the dataplane, matching against the
/// inbound's own tags.
pub fn select_inbound_dataplane_policies<P>(
    dataplane: &Dataplane,
    policies: &[P],
) -> InboundDataplanePolicyMap<P>
where
    P: DataplanePolicy + Clone,
{
    let policies = order::by_name(policies);
    let networking = dataplane.networking();
    networking
        .inbound
        .iter()
        .filter_map(|inbound| {
            let matches = |selector: &Selector| inbound.match_tags(selector);
            let policy = best_policy(&matches, &policies)?;
            let iface = networking.to_inbound_interface(inbound);
            trace!(inbound = %iface, policy = %policy.meta(), "Selected inbound dataplane policy");
            Some((iface, policy.clone()))
        })
        .collect()
}

fn best_policy<'p, P, F>(matches: &F, policies: &[&'p P]) -> Option<&'p P>
where
    P: DataplanePolicy,
    F: Fn(&Selector) -> bool,
{
    let mut best = None;
    for &policy in policies {
        if policy.selectors().is_empty() {
            order::keep_best(&mut best, Ranked::new(policy, Rank::default()));
            continue;
        }

        for selector in policy.selectors() {
            if selector.is_empty() {
                order::keep_best(&mut best, Ranked::new(policy, Rank::default()));
            } else if matches(selector) {
                order::keep_best(&mut best, Ranked::new(policy, selector.rank()));
            }
        }
    }
    best.map(|Ranked { policy, .. }| policy)
}
