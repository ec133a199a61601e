use crate::selector::match_selector;
use ahash::AHashMap as HashMap;
use kuma_policy_core::{ConnectionPolicy, Rank, ResourceMeta, ResourceType, Tags, MATCH_ALL};
use tracing::trace;

/// A connection policy paired with the rank of the source selector it matched by.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedPolicy<P> {
    pub rank: Rank,
    pub policy: P,
}

/// A route backend along with the connection policies already resolved for it, by type.
#[derive(Clone, Debug)]
pub struct RouteDestination<P> {
    pub destination: Tags,
    pub policies: HashMap<ResourceType, P>,
}

/// Returns every policy with a source selector matching `source`, ranked by the first such
/// selector, in the order the policies were given.
pub fn connection_policies_by_source<P>(source: &Tags, policies: &[P]) -> Vec<RankedPolicy<P>>
where
    P: ConnectionPolicy + Clone,
{
    policies
        .iter()
        .filter_map(|policy| {
            let rank = match_selector(source, policy.sources())?;
            Some(RankedPolicy {
                rank,
                policy: policy.clone(),
            })
        })
        .collect()
}

/// Picks a single policy of `resource_type` to apply to a route that splits traffic between
/// several destinations.
///
/// A policy resolved for more than one destination is only considered once. A policy that
/// applies to any service is preferred, since it applies to every destination of the route, and
/// otherwise the oldest policy is used.
pub fn best_connection_policy_for_destination<P>(
    destinations: &[RouteDestination<P>],
    resource_type: ResourceType,
) -> Option<P>
where
    P: ConnectionPolicy + Clone,
{
    struct Candidate<'p, P> {
        policy: &'p P,
        wildcard: bool,
    }

    let mut candidates: Vec<Candidate<'_, P>> = Vec::new();
    let mut seen: HashMap<&ResourceMeta, usize> = HashMap::new();
    for RouteDestination {
        destination,
        policies,
    } in destinations
    {
        let policy = match policies.get(&resource_type) {
            Some(policy) => policy,
            None => continue,
        };
        let wildcard = matches_any_service(policy, destination);
        match seen.get(policy.meta()) {
            Some(&i) => candidates[i].wildcard |= wildcard,
            None => {
                seen.insert(policy.meta(), candidates.len());
                candidates.push(Candidate { policy, wildcard });
            }
        }
    }

    let best = candidates.into_iter().min_by(|a, b| {
        b.wildcard.cmp(&a.wildcard).then_with(|| {
            a.policy
                .meta()
                .creation_time
                .cmp(&b.policy.meta().creation_time)
        })
    })?;
    trace!(%resource_type, policy = %best.policy.meta(), "Selected route policy");
    Some(best.policy.clone())
}

/// Returns true if the destination selector that matches `destination` selects every service.
fn matches_any_service<P: ConnectionPolicy>(policy: &P, destination: &Tags) -> bool {
    policy
        .destinations()
        .iter()
        .find(|selector| selector.matches(destination))
        .and_then(|selector| selector.service())
        == Some(MATCH_ALL)
}
