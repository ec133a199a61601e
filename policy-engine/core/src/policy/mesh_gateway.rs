use crate::{
    resource::{DataplanePolicy, Resource, ResourceMeta, ResourceType},
    tags::{Selector, Tags},
};
use serde::{Deserialize, Serialize};

/// Attaches a set of listeners to the selected builtin gateway dataplanes.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshGateway {
    pub meta: ResourceMeta,
    pub spec: MeshGatewaySpec,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshGatewaySpec {
    #[serde(default)]
    pub selectors: Vec<Selector>,

    #[serde(default)]
    pub tags: Tags,

    #[serde(default)]
    pub conf: Conf,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Conf {
    #[serde(default)]
    pub listeners: Vec<Listener>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Listener {
    pub port: u32,
    pub protocol: Protocol,

    /// An empty hostname matches every host.
    #[serde(default)]
    pub hostname: String,

    #[serde(default)]
    pub tags: Tags,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    Tcp,
    Tls,
    Http,
    Https,
}

// === impl MeshGateway ===

impl MeshGateway {
    pub fn new(meta: ResourceMeta, spec: MeshGatewaySpec) -> Self {
        Self { meta, spec }
    }
}

impl Resource for MeshGateway {
    fn meta(&self) -> &ResourceMeta {
        &self.meta
    }

    fn resource_type(&self) -> ResourceType {
        ResourceType::MeshGateway
    }
}

impl DataplanePolicy for MeshGateway {
    fn selectors(&self) -> &[Selector] {
        &self.spec.selectors
    }
}
