//! Kuma policy model
//!
//! Types shared by the policy matching engine: tag sets and the selectors that match them, the
//! specificity rank of a selector, a dataplane's networking description, resource metadata, and the
//! two capabilities a policy may expose:
//!
//! - A `ConnectionPolicy` is scoped by `sources` and `destinations` selectors and governs a
//!   directed connection between a calling dataplane and a destination service.
//! - A `DataplanePolicy` is scoped by a single list of `selectors` and applies to a dataplane (or
//!   one of its inbounds) as a whole.
//!
//! Nothing in this crate performs I/O. Resources are read through `ReadOnlyResourceManager`, which
//! is implemented elsewhere.

#![deny(rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod dataplane;
pub mod duration;
pub mod mesh;
pub mod policy;
mod rank;
pub mod resource;
mod tags;

pub use self::{
    dataplane::{Dataplane, InboundInterface, OutboundInterface},
    duration::PolicyDuration,
    mesh::Mesh,
    rank::Rank,
    resource::{
        ConnectionPolicy, DataplanePolicy, ReadOnlyResourceManager, Resource, ResourceMeta,
        ResourceType,
    },
    tags::{Map, Selector, Tags},
};

/// Mandatory tag naming the service a dataplane inbound belongs to.
pub const SERVICE_TAG: &str = "kuma.io/service";

/// Optional tag naming an inbound's application protocol.
pub const PROTOCOL_TAG: &str = "kuma.io/protocol";

/// Tag naming the zone a dataplane runs in. Selectors use it to scope a policy to one zone.
pub const ZONE_TAG: &str = "kuma.io/zone";

/// A selector value that matches any value of its key.
pub const MATCH_ALL: &str = "*";

/// The implicit destination for traffic that has no explicit outbound.
pub const PASS_THROUGH_SERVICE: &str = "pass_through";

/// A gateway hostname that matches every host.
pub const WILDCARD_HOSTNAME: &str = "*";
