use crate::{
    resource::{Resource, ResourceMeta, ResourceType},
    tags::{Selector, Tags},
    PROTOCOL_TAG, SERVICE_TAG,
};
use serde::{Deserialize, Serialize};
use std::fmt;

const LOCALHOST: &str = "127.0.0.1";

/// A managed proxy instance.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataplane {
    pub meta: ResourceMeta,
    pub spec: DataplaneSpec,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DataplaneSpec {
    #[serde(default)]
    pub networking: Networking,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Networking {
    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub advertised_address: String,

    #[serde(default)]
    pub inbound: Vec<Inbound>,

    #[serde(default)]
    pub outbound: Vec<Outbound>,

    pub gateway: Option<Gateway>,
}

/// A local listener that serves a service's traffic.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inbound {
    #[serde(default)]
    pub port: u32,

    #[serde(default)]
    pub service_port: u32,

    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub service_address: String,

    #[serde(default)]
    pub tags: Tags,
}

/// A local redirect target for a destination service.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outbound {
    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub port: u32,

    #[serde(default)]
    pub tags: Tags,

    /// Outbounds that reference a backend are resolved by a different mechanism and do not
    /// participate in connection policy matching.
    pub backend_ref: Option<BackendRef>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendRef {
    pub kind: String,
    pub name: String,
    pub port: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Gateway {
    #[serde(default)]
    pub tags: Tags,

    #[serde(rename = "type", default)]
    pub kind: GatewayKind,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GatewayKind {
    #[default]
    Delegated,
    Builtin,
}

/// Identifies an inbound listener of a dataplane.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InboundInterface {
    pub dataplane_advertised_ip: String,
    pub dataplane_ip: String,
    pub dataplane_port: u32,
    pub workload_ip: String,
    pub workload_port: u32,
}

/// Identifies an outbound listener of a dataplane.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OutboundInterface {
    pub dataplane_ip: String,
    pub dataplane_port: u32,
}

// === impl Dataplane ===

impl Dataplane {
    pub fn new(meta: ResourceMeta, networking: Networking) -> Self {
        Self {
            meta,
            spec: DataplaneSpec { networking },
        }
    }

    pub fn networking(&self) -> &Networking {
        &self.spec.networking
    }

    /// Returns true if any of the dataplane's inbounds, or its gateway, is selected.
    pub fn matches(&self, selector: &Selector) -> bool {
        let networking = self.networking();
        networking
            .inbound
            .iter()
            .any(|inbound| inbound.match_tags(selector))
            || networking
                .gateway
                .as_ref()
                .is_some_and(|gateway| gateway.match_tags(selector))
    }

    pub fn is_builtin_gateway(&self) -> bool {
        matches!(
            self.networking().gateway,
            Some(Gateway {
                kind: GatewayKind::Builtin,
                ..
            })
        )
    }
}

impl Resource for Dataplane {
    fn meta(&self) -> &ResourceMeta {
        &self.meta
    }

    fn resource_type(&self) -> ResourceType {
        ResourceType::Dataplane
    }
}

// === impl Networking ===

impl Networking {
    pub fn to_inbound_interface(&self, inbound: &Inbound) -> InboundInterface {
        let dataplane_ip = if inbound.address.is_empty() {
            self.address.clone()
        } else {
            inbound.address.clone()
        };
        let dataplane_advertised_ip = if self.advertised_address.is_empty() {
            dataplane_ip.clone()
        } else {
            self.advertised_address.clone()
        };
        let workload_ip = if inbound.service_address.is_empty() {
            LOCALHOST.to_string()
        } else {
            inbound.service_address.clone()
        };
        let workload_port = if inbound.service_port == 0 {
            inbound.port
        } else {
            inbound.service_port
        };
        InboundInterface {
            dataplane_advertised_ip,
            dataplane_ip,
            dataplane_port: inbound.port,
            workload_ip,
            workload_port,
        }
    }

    pub fn to_outbound_interface(&self, outbound: &Outbound) -> OutboundInterface {
        let dataplane_ip = if outbound.address.is_empty() {
            LOCALHOST.to_string()
        } else {
            outbound.address.clone()
        };
        OutboundInterface {
            dataplane_ip,
            dataplane_port: outbound.port,
        }
    }

    pub fn inbound_interfaces(&self) -> Vec<InboundInterface> {
        self.inbound
            .iter()
            .map(|inbound| self.to_inbound_interface(inbound))
            .collect()
    }

    /// Outbounds that target a service by tags rather than by a backend reference.
    pub fn service_outbounds(&self) -> impl Iterator<Item = &Outbound> + '_ {
        self.outbound.iter().filter(|o| o.backend_ref.is_none())
    }
}

// === impl Inbound ===

impl Inbound {
    pub fn service(&self) -> &str {
        self.tags.get(SERVICE_TAG).unwrap_or_default()
    }

    pub fn protocol(&self) -> &str {
        self.tags.get(PROTOCOL_TAG).unwrap_or_default()
    }

    pub fn match_tags(&self, selector: &Selector) -> bool {
        selector.matches(&self.tags)
    }
}

// === impl Outbound ===

impl Outbound {
    pub fn service(&self) -> &str {
        self.tags.get(SERVICE_TAG).unwrap_or_default()
    }

    pub fn match_tags(&self, selector: &Selector) -> bool {
        selector.matches(&self.tags)
    }
}

// === impl Gateway ===

impl Gateway {
    pub fn match_tags(&self, selector: &Selector) -> bool {
        selector.matches(&self.tags)
    }
}

// === impl InboundInterface ===

impl fmt::Display for InboundInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.dataplane_ip, self.dataplane_port, self.workload_port
        )
    }
}

// === impl OutboundInterface ===

impl fmt::Display for OutboundInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dataplane_ip.contains(':') {
            write!(f, "[{}]:{}", self.dataplane_ip, self.dataplane_port)
        } else {
            write!(f, "{}:{}", self.dataplane_ip, self.dataplane_port)
        }
    }
}
