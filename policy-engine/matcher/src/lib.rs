//! Kuma policy matching
//!
//! Decides which policies apply to each interface of a dataplane. Every matcher is a pure function
//! of a dataplane and a snapshot of policies: it never mutates its inputs, and it returns the same
//! result for any ordering of the same policies.
//!
//! Policies are ranked by the specificity of the selector they match by. A more specific match
//! always wins; among equally specific matches the most recently created policy wins, and a
//! complete tie is broken by policy name. Gateway route merging is the exception, preferring the
//! oldest policy.
//!
//! `RateLimitMatcher` composes these matchers with a `ReadOnlyResourceManager` to build the rate
//! limits of a dataplane.

#![deny(rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod connection;
pub mod dataplane;
pub mod gateway;
pub mod inbounds;
mod memory;
mod order;
pub mod ratelimit;
mod selector;

#[cfg(test)]
mod tests;

pub use self::{
    connection::{
        select_connection_policies, select_inbound_connection_all_policies,
        select_inbound_connection_matching_policies, select_inbound_connection_policies,
        select_inbound_connection_policy, select_outbound_connection_policies,
        to_outbound_services_of, to_services_of, DestinationMap, InboundConnectionPoliciesMap,
        InboundConnectionPolicyMap, OutboundConnectionPolicyMap,
    },
    dataplane::{
        select_dataplane_policy, select_dataplane_policy_with_matcher,
        select_inbound_dataplane_policies, InboundDataplanePolicyMap,
    },
    inbounds::{AdditionalInbounds, NoAdditionalInbounds, PrometheusInbounds},
    memory::MemoryResourceManager,
    ratelimit::{build_rate_limit_map, Error, RateLimitMatcher, RateLimitsMap},
    selector::match_selector,
};
