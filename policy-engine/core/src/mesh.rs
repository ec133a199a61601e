use crate::resource::{Resource, ResourceMeta, ResourceType};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    pub meta: ResourceMeta,
    pub spec: MeshSpec,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshSpec {
    pub metrics: Option<Metrics>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// Name of the backend that dataplanes expose metrics through, if any.
    pub enabled_backend: Option<String>,

    #[serde(default)]
    pub backends: Vec<MetricsBackend>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricsBackend {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: MetricsBackendKind,

    pub conf: PrometheusConf,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricsBackendKind {
    Prometheus,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrometheusConf {
    pub port: u32,

    #[serde(default = "PrometheusConf::default_path")]
    pub path: String,
}

// === impl Mesh ===

impl Mesh {
    pub fn new(meta: ResourceMeta, spec: MeshSpec) -> Self {
        Self { meta, spec }
    }

    pub fn enabled_metrics_backend(&self) -> Option<&str> {
        self.spec.metrics.as_ref()?.enabled_backend.as_deref()
    }

    pub fn metrics_backend(&self, name: &str) -> Option<&MetricsBackend> {
        self.spec
            .metrics
            .as_ref()?
            .backends
            .iter()
            .find(|backend| backend.name == name)
    }
}

impl Resource for Mesh {
    fn meta(&self) -> &ResourceMeta {
        &self.meta
    }

    fn resource_type(&self) -> ResourceType {
        ResourceType::Mesh
    }
}

// === impl PrometheusConf ===

impl PrometheusConf {
    fn default_path() -> String {
        "/metrics".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{offset::Utc, DateTime};

    #[test]
    fn finds_enabled_prometheus_backend() {
        let spec: MeshSpec = serde_json::from_str(
            r#"{
                "metrics": {
                    "enabledBackend": "prometheus-1",
                    "backends": [
                        {"name": "prometheus-1", "type": "prometheus", "conf": {"port": 5670}}
                    ]
                }
            }"#,
        )
        .unwrap();
        let mesh = Mesh::new(
            ResourceMeta::new("", "default", DateTime::<Utc>::UNIX_EPOCH),
            spec,
        );
        assert_eq!(mesh.enabled_metrics_backend(), Some("prometheus-1"));
        assert_eq!(
            mesh.metrics_backend("prometheus-1"),
            Some(&MetricsBackend {
                name: "prometheus-1".to_string(),
                kind: MetricsBackendKind::Prometheus,
                conf: PrometheusConf {
                    port: 5670,
                    path: "/metrics".to_string(),
                },
            })
        );
        assert_eq!(mesh.metrics_backend("other"), None);
    }
}
