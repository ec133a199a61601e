//! Builds the rate limits that apply to a dataplane's inbound and outbound interfaces.

use crate::{
    connection,
    inbounds::{AdditionalInbounds, PrometheusInbounds},
};
use ahash::AHashMap as HashMap;
use kuma_policy_core::{
    dataplane::Inbound,
    policy::{RateLimit, RateLimitSpec},
    Dataplane, InboundInterface, Mesh, OutboundInterface, ReadOnlyResourceManager,
};
use std::sync::Arc;
use tracing::debug;

/// The rate limits of a dataplane.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RateLimitsMap {
    /// Every rate limit that applies to each inbound, most specific first. Each entry has exactly
    /// one source selector.
    pub inbound: HashMap<InboundInterface, Vec<RateLimitSpec>>,

    /// The single rate limit that applies to each outbound.
    pub outbound: HashMap<OutboundInterface, Arc<RateLimit>>,
}

/// Loads the rate limits of a dataplane's mesh and matches them against its interfaces.
#[derive(Clone, Debug)]
pub struct RateLimitMatcher<M, A = PrometheusInbounds> {
    resource_manager: M,
    additional_inbounds: A,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not retrieve ratelimits for mesh {mesh}")]
    ListRateLimits {
        mesh: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("could not get additional inbounds")]
    AdditionalInbounds(#[source] anyhow::Error),
}

/// Splits each rate limit into one rate limit per source selector, so that each source is ordered
/// by its own rank when several rate limits apply to an inbound. Each part keeps the metadata of
/// the rate limit it was split from.
pub fn split_policies_by_source_match(rate_limits: &[Arc<RateLimit>]) -> Vec<RateLimit> {
    rate_limits
        .iter()
        .flat_map(|rl| {
            rl.spec.sources.iter().map(move |source| {
                RateLimit::new(
                    rl.meta.clone(),
                    RateLimitSpec {
                        sources: vec![source.clone()],
                        ..rl.spec.clone()
                    },
                )
            })
        })
        .collect()
}

/// Matches `rate_limits` against the given inbounds and against the service outbounds of the
/// dataplane.
pub fn build_rate_limit_map(
    dataplane: &Dataplane,
    inbounds: &[Inbound],
    rate_limits: &[Arc<RateLimit>],
) -> RateLimitsMap {
    let split = split_policies_by_source_match(rate_limits);
    let inbound =
        connection::select_inbound_connection_matching_policies(dataplane, inbounds, &split)
            .into_iter()
            .map(|(iface, matched)| (iface, matched.into_iter().map(|rl| rl.spec).collect()))
            .collect();

    let by_service = connection::select_outbound_connection_policies(dataplane, rate_limits);
    let networking = dataplane.networking();
    let outbound = networking
        .service_outbounds()
        .filter_map(|outbound| {
            let rl = by_service.get(outbound.service())?;
            Some((networking.to_outbound_interface(outbound), rl.clone()))
        })
        .collect();

    RateLimitsMap { inbound, outbound }
}

// === impl RateLimitMatcher ===

impl<M> RateLimitMatcher<M> {
    pub fn new(resource_manager: M) -> Self {
        Self {
            resource_manager,
            additional_inbounds: PrometheusInbounds,
        }
    }
}

impl<M, A> RateLimitMatcher<M, A> {
    pub fn with_additional_inbounds<B>(self, additional_inbounds: B) -> RateLimitMatcher<M, B> {
        RateLimitMatcher {
            resource_manager: self.resource_manager,
            additional_inbounds,
        }
    }
}

impl<M, A> RateLimitMatcher<M, A>
where
    M: ReadOnlyResourceManager + Sync,
    A: AdditionalInbounds,
{
    /// Matches the rate limits of the dataplane's mesh against its declared inbounds, the
    /// additional inbounds implied by `mesh`, and its outbounds.
    pub async fn match_rate_limits(
        &self,
        dataplane: &Dataplane,
        mesh: &Mesh,
    ) -> Result<RateLimitsMap, Error> {
        let mesh_name = &dataplane.meta.mesh;
        let rate_limits = self
            .resource_manager
            .list::<RateLimit>(mesh_name)
            .await
            .map_err(|source| Error::ListRateLimits {
                mesh: mesh_name.clone(),
                source,
            })?;

        let additional = self
            .additional_inbounds
            .additional_inbounds(dataplane, mesh)
            .map_err(Error::AdditionalInbounds)?;
        let inbounds = dataplane
            .networking()
            .inbound
            .iter()
            .cloned()
            .chain(additional)
            .collect::<Vec<_>>();

        debug!(
            dataplane = %dataplane.meta,
            rate_limits = rate_limits.len(),
            inbounds = inbounds.len(),
            "Matching rate limits"
        );
        Ok(build_rate_limit_map(dataplane, &inbounds, &rate_limits))
    }
}
