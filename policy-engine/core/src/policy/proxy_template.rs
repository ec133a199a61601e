use crate::{
    resource::{DataplanePolicy, Resource, ResourceMeta, ResourceType},
    tags::Selector,
};
use serde::{Deserialize, Serialize};

/// Customizes the proxy configuration generated for the selected dataplanes.
#[derive(Clone, Debug, PartialEq)]
pub struct ProxyTemplate {
    pub meta: ResourceMeta,
    pub spec: ProxyTemplateSpec,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProxyTemplateSpec {
    #[serde(default)]
    pub selectors: Vec<Selector>,

    #[serde(default)]
    pub conf: Conf,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Conf {
    /// Names of the built-in configuration profiles to apply.
    #[serde(default)]
    pub imports: Vec<String>,
}

// === impl ProxyTemplate ===

impl ProxyTemplate {
    pub fn new(meta: ResourceMeta, spec: ProxyTemplateSpec) -> Self {
        Self { meta, spec }
    }
}

impl Resource for ProxyTemplate {
    fn meta(&self) -> &ResourceMeta {
        &self.meta
    }

    fn resource_type(&self) -> ResourceType {
        ResourceType::ProxyTemplate
    }
}

impl DataplanePolicy for ProxyTemplate {
    fn selectors(&self) -> &[Selector] {
        &self.spec.selectors
    }
}
