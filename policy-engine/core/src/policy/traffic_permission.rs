use crate::{
    resource::{ConnectionPolicy, Resource, ResourceMeta, ResourceType},
    tags::Selector,
};
use serde::{Deserialize, Serialize};

/// Allows `sources` to connect to `destinations`.
#[derive(Clone, Debug, PartialEq)]
pub struct TrafficPermission {
    pub meta: ResourceMeta,
    pub spec: TrafficPermissionSpec,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrafficPermissionSpec {
    #[serde(default)]
    pub sources: Vec<Selector>,

    #[serde(default)]
    pub destinations: Vec<Selector>,
}

// === impl TrafficPermission ===

impl TrafficPermission {
    pub fn new(meta: ResourceMeta, spec: TrafficPermissionSpec) -> Self {
        Self { meta, spec }
    }
}

impl Resource for TrafficPermission {
    fn meta(&self) -> &ResourceMeta {
        &self.meta
    }

    fn resource_type(&self) -> ResourceType {
        ResourceType::TrafficPermission
    }
}

impl ConnectionPolicy for TrafficPermission {
    fn sources(&self) -> &[Selector] {
        &self.spec.sources
    }

    fn destinations(&self) -> &[Selector] {
        &self.spec.destinations
    }
}
