use anyhow::{bail, Result};
use kuma_policy_core::{dataplane::Inbound, Dataplane, Mesh, Tags, SERVICE_TAG};

/// The service and interface name of the inbound that serves a dataplane's metrics.
pub const METRICS_SERVICE: &str = "metrics";

const IFACE_TAG: &str = "kuma.io/iface";

/// Supplies inbounds that a dataplane exposes implicitly, in addition to those it declares.
pub trait AdditionalInbounds {
    fn additional_inbounds(&self, dataplane: &Dataplane, mesh: &Mesh) -> Result<Vec<Inbound>>;
}

/// Adds nothing.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoAdditionalInbounds;

/// Adds the inbound that Prometheus scrapes when the mesh enables a metrics backend.
#[derive(Copy, Clone, Debug, Default)]
pub struct PrometheusInbounds;

// === impl NoAdditionalInbounds ===

impl AdditionalInbounds for NoAdditionalInbounds {
    fn additional_inbounds(&self, _: &Dataplane, _: &Mesh) -> Result<Vec<Inbound>> {
        Ok(Vec::new())
    }
}

// === impl PrometheusInbounds ===

impl AdditionalInbounds for PrometheusInbounds {
    fn additional_inbounds(&self, dataplane: &Dataplane, mesh: &Mesh) -> Result<Vec<Inbound>> {
        let name = match mesh.enabled_metrics_backend() {
            Some(name) => name,
            None => return Ok(Vec::new()),
        };
        let backend = match mesh.metrics_backend(name) {
            Some(backend) => backend,
            None => bail!(
                "metrics backend {name} is enabled in mesh {} but not defined",
                mesh.meta.name
            ),
        };

        let port = backend.conf.port;
        Ok(vec![Inbound {
            port,
            service_port: port,
            address: dataplane.networking().address.clone(),
            service_address: "0.0.0.0".to_string(),
            tags: Tags::from_iter([(SERVICE_TAG, METRICS_SERVICE), (IFACE_TAG, METRICS_SERVICE)]),
        }])
    }
}

// === impl Fn ===

impl<F> AdditionalInbounds for F
where
    F: Fn(&Dataplane, &Mesh) -> Result<Vec<Inbound>>,
{
    fn additional_inbounds(&self, dataplane: &Dataplane, mesh: &Mesh) -> Result<Vec<Inbound>> {
        (self)(dataplane, mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{offset::Utc, DateTime};
    use kuma_policy_core::{
        dataplane::Networking,
        mesh::{MeshSpec, Metrics, MetricsBackend, MetricsBackendKind, PrometheusConf},
        ResourceMeta,
    };

    fn mk_mesh(metrics: Option<Metrics>) -> Mesh {
        Mesh::new(
            ResourceMeta::new("", "default", DateTime::<Utc>::UNIX_EPOCH),
            MeshSpec { metrics },
        )
    }

    fn mk_dataplane() -> Dataplane {
        Dataplane::new(
            ResourceMeta::new("default", "dp-1", DateTime::<Utc>::UNIX_EPOCH),
            Networking {
                address: "192.168.0.1".to_string(),
                ..Default::default()
            },
        )
    }

    fn prometheus(name: &str, port: u32) -> MetricsBackend {
        MetricsBackend {
            name: name.to_string(),
            kind: MetricsBackendKind::Prometheus,
            conf: PrometheusConf {
                port,
                path: "/metrics".to_string(),
            },
        }
    }

    #[test]
    fn prometheus_without_metrics() {
        let inbounds = PrometheusInbounds
            .additional_inbounds(&mk_dataplane(), &mk_mesh(None))
            .unwrap();
        assert!(inbounds.is_empty());

        let disabled = mk_mesh(Some(Metrics {
            enabled_backend: None,
            backends: vec![prometheus("prometheus-1", 5670)],
        }));
        let inbounds = PrometheusInbounds
            .additional_inbounds(&mk_dataplane(), &disabled)
            .unwrap();
        assert!(inbounds.is_empty());
    }

    #[test]
    fn prometheus_enabled() {
        let mesh = mk_mesh(Some(Metrics {
            enabled_backend: Some("prometheus-1".to_string()),
            backends: vec![prometheus("prometheus-1", 5670)],
        }));
        let inbounds = PrometheusInbounds
            .additional_inbounds(&mk_dataplane(), &mesh)
            .unwrap();
        assert_eq!(inbounds.len(), 1);
        let inbound = &inbounds[0];
        assert_eq!(inbound.port, 5670);
        assert_eq!(inbound.service_port, 5670);
        assert_eq!(inbound.address, "192.168.0.1");
        assert_eq!(inbound.service_address, "0.0.0.0");
        assert_eq!(inbound.service(), METRICS_SERVICE);
        assert_eq!(inbound.tags.get(IFACE_TAG), Some(METRICS_SERVICE));
    }

    #[test]
    fn prometheus_enabled_backend_must_exist() {
        let mesh = mk_mesh(Some(Metrics {
            enabled_backend: Some("prometheus-2".to_string()),
            backends: vec![prometheus("prometheus-1", 5670)],
        }));
        assert!(PrometheusInbounds
            .additional_inbounds(&mk_dataplane(), &mesh)
            .is_err());
    }

    #[test]
    fn closures_supply_inbounds() {
        let supplier = |_: &Dataplane, _: &Mesh| -> Result<Vec<Inbound>> {
            Ok(vec![Inbound {
                port: 1234,
                ..Default::default()
            }])
        };
        let inbounds = supplier
            .additional_inbounds(&mk_dataplane(), &mk_mesh(None))
            .unwrap();
        assert_eq!(inbounds[0].port, 1234);
        assert!(NoAdditionalInbounds
            .additional_inbounds(&mk_dataplane(), &mk_mesh(None))
            .unwrap()
            .is_empty());
    }
}
