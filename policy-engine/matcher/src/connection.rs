//! Selects connection policies for a dataplane's outbound and inbound interfaces.
//!
//! Outbound matching considers both sides of a connection: a policy applies only if one of its
//! `sources` selects the dataplane, and it is then ranked against each destination service by
//! combining its most specific matching source selector with its most specific matching
//! destination selector. Inbound matching only evaluates `destinations`, since the inbound
//! already represents the dataplane as a destination; sources are enforced later, per connection.

use crate::order::{self, Ranked};
use ahash::{AHashMap as HashMap, AHashSet as HashSet};
use kuma_policy_core::{
    dataplane::{Inbound, Outbound},
    ConnectionPolicy, Dataplane, InboundInterface, Selector, Tags, PASS_THROUGH_SERVICE,
};
use std::collections::BTreeMap;
use tracing::{debug, trace};

pub type ServiceName = String;

/// Maps a destination service to the selectors of its endpoints.
pub type DestinationMap = BTreeMap<ServiceName, Vec<Selector>>;

pub type OutboundConnectionPolicyMap<P> = HashMap<ServiceName, P>;

pub type InboundConnectionPolicyMap<P> = HashMap<InboundInterface, P>;

pub type InboundConnectionPoliciesMap<P> = HashMap<InboundInterface, Vec<P>>;

/// Enumerates the services a dataplane connects to: each service of its outbounds, followed by
/// the implicit pass-through service for traffic without an explicit outbound.
pub fn to_outbound_services_of(dataplane: &Dataplane) -> impl Iterator<Item = &str> + '_ {
    dataplane
        .networking()
        .service_outbounds()
        .map(Outbound::service)
        .chain(Some(PASS_THROUGH_SERVICE))
}

pub fn to_services_of(destinations: &DestinationMap) -> impl Iterator<Item = &str> + '_ {
    destinations.keys().map(String::as_str)
}

/// Picks the most specific policy for each outbound service of the dataplane.
pub fn select_outbound_connection_policies<P>(
    dataplane: &Dataplane,
    policies: &[P],
) -> OutboundConnectionPolicyMap<P>
where
    P: ConnectionPolicy + Clone,
{
    select_connection_policies(dataplane, to_outbound_services_of(dataplane), policies)
}

/// Picks the most specific policy applicable to connections between the dataplane and each of the
/// given destination services. Repeated services are only considered once.
pub fn select_connection_policies<'d, P, D>(
    dataplane: &Dataplane,
    destinations: D,
    policies: &[P],
) -> OutboundConnectionPolicyMap<P>
where
    P: ConnectionPolicy + Clone,
    D: IntoIterator<Item = &'d str>,
{
    // A policy that matches the dataplane by several source selectors is ranked by the most
    // specific one.
    let by_source = order::by_name(policies)
        .into_iter()
        .filter_map(|policy| {
            let rank = policy
                .sources()
                .iter()
                .filter(|selector| dataplane.matches(selector))
                .map(Selector::rank)
                .max()?;
            Some(Ranked::new(policy, rank))
        })
        .collect::<Vec<_>>();

    let mut seen = HashSet::new();
    let mut selected = OutboundConnectionPolicyMap::new();
    for service in destinations {
        if !seen.insert(service) {
            debug!(dataplane = %dataplane.meta, %service, "Ignoring duplicate outbound service");
            continue;
        }

        let target = Tags::for_service(service);
        let mut best = None;
        for candidate in &by_source {
            for selector in candidate.policy.destinations() {
                if selector.matches(&target) {
                    let rank = selector.rank().combined_with(candidate.rank);
                    order::keep_best(&mut best, Ranked::new(candidate.policy, rank));
                }
            }
        }

        if let Some(Ranked { policy, rank }) = best {
            trace!(%service, policy = %policy.meta(), ?rank, "Selected outbound policy");
            selected.insert(service.to_string(), policy.clone());
        }
    }
    selected
}

/// Picks the most specific policy for each of the given inbounds of the dataplane.
pub fn select_inbound_connection_policies<P>(
    dataplane: &Dataplane,
    inbounds: &[Inbound],
    policies: &[P],
) -> InboundConnectionPolicyMap<P>
where
    P: ConnectionPolicy + Clone,
{
    let policies = order::by_name(policies);
    let networking = dataplane.networking();
    inbounds
        .iter()
        .filter_map(|inbound| {
            let policy = best_by_destination(&inbound.tags, &policies)?;
            let iface = networking.to_inbound_interface(inbound);
            trace!(inbound = %iface, policy = %policy.meta(), "Selected inbound policy");
            Some((iface, policy.clone()))
        })
        .collect()
}

/// Collects every matching policy for each of the given inbounds of the dataplane, most specific
/// first. Inbounds without a matching policy are omitted.
pub fn select_inbound_connection_matching_policies<P>(
    dataplane: &Dataplane,
    inbounds: &[Inbound],
    policies: &[P],
) -> InboundConnectionPoliciesMap<P>
where
    P: ConnectionPolicy + Clone,
{
    let policies = order::by_name(policies);
    let networking = dataplane.networking();
    inbounds
        .iter()
        .filter_map(|inbound| {
            let matching = all_by_destination(&inbound.tags, &policies);
            if matching.is_empty() {
                return None;
            }
            let iface = networking.to_inbound_interface(inbound);
            trace!(inbound = %iface, policies = matching.len(), "Selected inbound policies");
            Some((iface, matching.into_iter().cloned().collect()))
        })
        .collect()
}

/// Picks the policy with the most specific destination selector matching `tags`.
pub fn select_inbound_connection_policy<P>(tags: &Tags, policies: &[P]) -> Option<P>
where
    P: ConnectionPolicy + Clone,
{
    best_by_destination(tags, &order::by_name(policies)).cloned()
}

/// Collects every policy with a destination selector matching `tags`.
///
/// Matches are ordered by the rank of each policy's *first* source selector, highest first, with
/// newer policies ahead of older ones on equal ranks. The ordering is stable, so policies that tie
/// completely keep their name order.
pub fn select_inbound_connection_all_policies<P>(tags: &Tags, policies: &[P]) -> Vec<P>
where
    P: ConnectionPolicy + Clone,
{
    all_by_destination(tags, &order::by_name(policies))
        .into_iter()
        .cloned()
        .collect()
}

fn best_by_destination<'p, P: ConnectionPolicy>(
    tags: &Tags,
    policies: &[&'p P],
) -> Option<&'p P> {
    let mut best = None;
    for &policy in policies {
        for selector in policy.destinations() {
            if selector.matches(tags) {
                order::keep_best(&mut best, Ranked::new(policy, selector.rank()));
            }
        }
    }
    best.map(|Ranked { policy, .. }| policy)
}

fn all_by_destination<'p, P: ConnectionPolicy>(tags: &Tags, policies: &[&'p P]) -> Vec<&'p P> {
    let mut matching = policies
        .iter()
        .filter(|policy| policy.destinations().iter().any(|s| s.matches(tags)))
        .map(|&policy| {
            let rank = policy
                .sources()
                .first()
                .map(Selector::rank)
                .unwrap_or_default();
            Ranked::new(policy, rank)
        })
        .collect::<Vec<_>>();

    matching.sort_by(|a, b| order::most_specific_first(a, b));
    matching.into_iter().map(|Ranked { policy, .. }| policy).collect()
}
