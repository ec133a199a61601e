
use chrono::{offset::Utc, DateTime};
use kuma_policy_core::{
    dataplane::{Inbound, Networking, Outbound},
    policy::{
        rate_limit, retry, ProxyTemplate, ProxyTemplateSpec, RateLimit, RateLimitSpec, Retry,
        RetrySpec, Timeout, TimeoutSpec, TrafficPermission, TrafficPermissionSpec,
    },
    Dataplane, PolicyDuration, ResourceMeta, Selector, Tags,
};
use std::sync::Arc;

fn mk_meta(name: impl ToString, secs: i64) -> ResourceMeta {
    let time = DateTime::<Utc>::from_timestamp(secs, 0).expect("timestamp must be valid");
    ResourceMeta::new("default", name, time)
}

fn mk_selector(tags: impl IntoIterator<Item = (&'static str, &'static str)>) -> Selector {
    tags.into_iter().collect()
}

fn mk_tags(tags: impl IntoIterator<Item = (&'static str, &'static str)>) -> Tags {
    tags.into_iter().collect()
}

/// An inbound on the dataplane's default address, forwarding to a workload on `service_port`.
fn mk_inbound(
    service_port: u32,
    tags: impl IntoIterator<Item = (&'static str, &'static str)>,
) -> Inbound {
    Inbound {
        service_port,
        tags: mk_tags(tags),
        ..Default::default()
    }
}

fn mk_outbound(port: u32, service: &'static str) -> Outbound {
    Outbound {
        port,
        tags: mk_tags(Some(("kuma.io/service", service))),
        ..Default::default()
    }
}

fn mk_dataplane(
    inbound: impl IntoIterator<Item = Inbound>,
    outbound: impl IntoIterator<Item = Outbound>,
) -> Dataplane {
    Dataplane::new(
        mk_meta("dp-1", 0),
        Networking {
            address: "192.168.0.1".to_string(),
            inbound: inbound.into_iter().collect(),
            outbound: outbound.into_iter().collect(),
            ..Default::default()
        },
    )
}

fn mk_rate_limit(
    name: impl ToString,
    secs: i64,
    sources: impl IntoIterator<Item = Selector>,
    destinations: impl IntoIterator<Item = Selector>,
) -> Arc<RateLimit> {
    let conf = rate_limit::Conf {
        http: Some(rate_limit::HttpConf {
            requests: 100,
            interval: PolicyDuration::from_secs(3),
            on_rate_limit: None,
        }),
    };
    Arc::new(RateLimit::new(
        mk_meta(name, secs),
        RateLimitSpec {
            sources: sources.into_iter().collect(),
            destinations: destinations.into_iter().collect(),
            conf,
        },
    ))
}

fn mk_timeout(
    name: impl ToString,
    secs: i64,
    sources: impl IntoIterator<Item = Selector>,
    destinations: impl IntoIterator<Item = Selector>,
) -> Timeout {
    Timeout::new(
        mk_meta(name, secs),
        TimeoutSpec {
            sources: sources.into_iter().collect(),
            destinations: destinations.into_iter().collect(),
            ..Default::default()
        },
    )
}

fn mk_retry(
    name: impl ToString,
    secs: i64,
    sources: impl IntoIterator<Item = Selector>,
    destinations: impl IntoIterator<Item = Selector>,
) -> Retry {
    Retry::new(
        mk_meta(name, secs),
        RetrySpec {
            sources: sources.into_iter().collect(),
            destinations: destinations.into_iter().collect(),
            conf: retry::Conf {
                http: Some(retry::HttpConf {
                    num_retries: Some(5),
                    per_try_timeout: Some(PolicyDuration::from_millis(200)),
                    ..Default::default()
                }),
                tcp: None,
            },
        },
    )
}

fn mk_traffic_permission(
    name: impl ToString,
    secs: i64,
    sources: impl IntoIterator<Item = Selector>,
    destinations: impl IntoIterator<Item = Selector>,
) -> TrafficPermission {
    TrafficPermission::new(
        mk_meta(name, secs),
        TrafficPermissionSpec {
            sources: sources.into_iter().collect(),
            destinations: destinations.into_iter().collect(),
        },
    )
}

fn mk_proxy_template(
    name: impl ToString,
    secs: i64,
    selectors: impl IntoIterator<Item = Selector>,
) -> ProxyTemplate {
    ProxyTemplate::new(
        mk_meta(name, secs),
        ProxyTemplateSpec {
            selectors: selectors.into_iter().collect(),
            ..Default::default()
        },
    )
}

fn names<P: kuma_policy_core::Resource>(policies: &[P]) -> Vec<&str> {
    policies.iter().map(|p| p.meta().name.as_str()).collect()
}

fn init_tracing() -> tracing::subscriber::DefaultGuard {
    tracing::subscriber::set_default(
        tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::TRACE)
            .finish(),
    )
}
