use crate::{
    duration::PolicyDuration,
    resource::{ConnectionPolicy, Resource, ResourceMeta, ResourceType},
    tags::Selector,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq)]
pub struct Timeout {
    pub meta: ResourceMeta,
    pub spec: TimeoutSpec,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeoutSpec {
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
    pub connect_timeout: Option<PolicyDuration>,
    pub tcp_idle_timeout: Option<PolicyDuration>,
    pub http_request_timeout: Option<PolicyDuration>,
    pub http_idle_timeout: Option<PolicyDuration>,
}

// === impl Timeout ===

impl Timeout {
    pub fn new(meta: ResourceMeta, spec: TimeoutSpec) -> Self {
        Self { meta, spec }
    }
}

impl Resource for Timeout {
    fn meta(&self) -> &ResourceMeta {
        &self.meta
    }

    fn resource_type(&self) -> ResourceType {
        ResourceType::Timeout
    }
}

impl ConnectionPolicy for Timeout {
    fn sources(&self) -> &[Selector] {
        &self.spec.sources
    }

    fn destinations(&self) -> &[Selector] {
        &self.spec.destinations
    }
}
