use crate::{
    duration::PolicyDuration,
    resource::{ConnectionPolicy, Resource, ResourceMeta, ResourceType},
    tags::Selector,
};
use serde::{Deserialize, Serialize};

/// Limits the rate of requests a destination accepts from its sources.
#[derive(Clone, Debug, PartialEq)]
pub struct RateLimit {
    pub meta: ResourceMeta,
    pub spec: RateLimitSpec,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitSpec {
    #[serde(default)]
    pub sources: Vec<Selector>,

    #[serde(default)]
    pub destinations: Vec<Selector>,

    #[serde(default)]
    pub conf: Conf,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conf {
    pub http: Option<HttpConf>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpConf {
    pub requests: u32,
    pub interval: PolicyDuration,
    pub on_rate_limit: Option<OnRateLimit>,
}

/// Describes the response sent to a rate-limited request.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnRateLimit {
    pub status: Option<u32>,

    #[serde(default)]
    pub headers: Vec<HeaderValue>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderValue {
    pub key: String,
    pub value: String,

    #[serde(default)]
    pub append: bool,
}

// === impl RateLimit ===

impl RateLimit {
    pub fn new(meta: ResourceMeta, spec: RateLimitSpec) -> Self {
        Self { meta, spec }
    }
}

impl Resource for RateLimit {
    fn meta(&self) -> &ResourceMeta {
        &self.meta
    }

    fn resource_type(&self) -> ResourceType {
        ResourceType::RateLimit
    }
}

impl ConnectionPolicy for RateLimit {
    fn sources(&self) -> &[Selector] {
        &self.spec.sources
    }

    fn destinations(&self) -> &[Selector] {
        &self.spec.destinations
    }
}
