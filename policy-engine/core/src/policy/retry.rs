use crate::{
    duration::PolicyDuration,
    resource::{ConnectionPolicy, Resource, ResourceMeta, ResourceType},
    tags::Selector,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq)]
pub struct Retry {
    pub meta: ResourceMeta,
    pub spec: RetrySpec,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrySpec {
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
    pub tcp: Option<TcpConf>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpConf {
    pub num_retries: Option<u32>,
    pub per_try_timeout: Option<PolicyDuration>,

    #[serde(default)]
    pub retriable_status_codes: Vec<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TcpConf {
    pub max_connect_attempts: u32,
}

// === impl Retry ===

impl Retry {
    pub fn new(meta: ResourceMeta, spec: RetrySpec) -> Self {
        Self { meta, spec }
    }
}

impl Resource for Retry {
    fn meta(&self) -> &ResourceMeta {
        &self.meta
    }

    fn resource_type(&self) -> ResourceType {
        ResourceType::Retry
    }
}

impl ConnectionPolicy for Retry {
    fn sources(&self) -> &[Selector] {
        &self.spec.sources
    }

    fn destinations(&self) -> &[Selector] {
        &self.spec.destinations
    }
}
