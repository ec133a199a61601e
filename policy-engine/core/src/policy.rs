pub mod mesh_gateway;
pub mod proxy_template;
pub mod rate_limit;
pub mod retry;
pub mod timeout;
pub mod traffic_permission;

pub use self::{
    mesh_gateway::{MeshGateway, MeshGatewaySpec},
    proxy_template::{ProxyTemplate, ProxyTemplateSpec},
    rate_limit::{RateLimit, RateLimitSpec},
    retry::{Retry, RetrySpec},
    timeout::{Timeout, TimeoutSpec},
    traffic_permission::{TrafficPermission, TrafficPermissionSpec},
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        resource::{ConnectionPolicy, Resource},
        PolicyDuration, Rank, ResourceType, Tags, ZONE_TAG,
    };
    use std::time::Duration;

    #[test]
    fn deserializes_rate_limit() {
        let spec: RateLimitSpec = serde_json::from_str(
            r#"{
                "sources": [{"match": {"kuma.io/service": "*"}}],
                "destinations": [
                    {"match": {"kuma.io/service": "backend", "kuma.io/protocol": "http"}}
                ],
                "conf": {
                    "http": {
                        "requests": 100,
                        "interval": "3s",
                        "onRateLimit": {
                            "status": 429,
                            "headers": [{"key": "x-limited", "value": "true"}]
                        }
                    }
                }
            }"#,
        )
        .unwrap();
        let http = spec.conf.http.as_ref().expect("http conf must be set");
        assert_eq!(http.requests, 100);
        assert_eq!(http.interval, Duration::from_secs(3));
        assert_eq!(http.on_rate_limit.as_ref().and_then(|o| o.status), Some(429));

        let rl = RateLimit::new(
            crate::ResourceMeta::new(
                "default",
                "rl-1",
                chrono::DateTime::<chrono::Utc>::UNIX_EPOCH,
            ),
            spec,
        );
        assert_eq!(rl.sources()[0].rank(), Rank::new(0, 1));
        assert_eq!(rl.destinations()[0].rank(), Rank::new(2, 0));
    }

    #[test]
    fn deserializes_timeout() {
        let spec: TimeoutSpec = serde_json::from_str(
            r#"{
                "sources": [{"match": {"kuma.io/service": "*"}}],
                "destinations": [{"match": {"kuma.io/service": "*"}}],
                "conf": {"connectTimeout": "10s", "httpRequestTimeout": "1m30s"}
            }"#,
        )
        .unwrap();
        assert_eq!(spec.conf.connect_timeout, Some(PolicyDuration::from_secs(10)));
        assert_eq!(
            spec.conf.http_request_timeout,
            Some(PolicyDuration::from_secs(90))
        );
        assert_eq!(spec.conf.tcp_idle_timeout, None);

        let json = serde_json::to_value(&spec.conf).unwrap();
        assert_eq!(json["connectTimeout"], "10s");
        assert_eq!(json["httpRequestTimeout"], "90s");

        let numeric = r#"{"conf": {"connectTimeout": 10}}"#;
        assert!(serde_json::from_str::<TimeoutSpec>(numeric).is_err());
    }

    #[test]
    fn deserializes_retry() {
        let spec: RetrySpec = serde_json::from_str(
            r#"{
                "sources": [{"match": {"kuma.io/service": "web"}}],
                "destinations": [{"match": {"kuma.io/service": "backend", "version": "*"}}],
                "conf": {
                    "http": {
                        "numRetries": 5,
                        "perTryTimeout": "200ms",
                        "retriableStatusCodes": [500, 503]
                    },
                    "tcp": {"maxConnectAttempts": 3}
                }
            }"#,
        )
        .unwrap();
        let http = spec.conf.http.as_ref().expect("http conf must be set");
        assert_eq!(http.num_retries, Some(5));
        assert_eq!(http.per_try_timeout, Some(PolicyDuration::from_millis(200)));
        assert_eq!(http.retriable_status_codes, vec![500, 503]);
        assert_eq!(spec.conf.tcp.as_ref().map(|t| t.max_connect_attempts), Some(3));

        let retry = Retry::new(
            crate::ResourceMeta::new(
                "default",
                "retry-1",
                chrono::DateTime::<chrono::Utc>::UNIX_EPOCH,
            ),
            spec,
        );
        assert_eq!(retry.resource_type(), ResourceType::Retry);
        assert_eq!(retry.sources()[0].rank(), Rank::new(1, 0));
        assert_eq!(retry.destinations()[0].rank(), Rank::new(1, 1));
    }

    #[test]
    fn deserializes_traffic_permission() {
        let spec: TrafficPermissionSpec = serde_json::from_str(
            r#"{
                "sources": [{"match": {"kuma.io/service": "web", "kuma.io/zone": "eu"}}],
                "destinations": [{"match": {"kuma.io/service": "*"}}]
            }"#,
        )
        .unwrap();
        let permission = TrafficPermission::new(
            crate::ResourceMeta::new(
                "default",
                "allow-web",
                chrono::DateTime::<chrono::Utc>::UNIX_EPOCH,
            ),
            spec,
        );
        assert_eq!(permission.resource_type(), ResourceType::TrafficPermission);
        assert_eq!(permission.sources()[0].get(ZONE_TAG), Some("eu"));
        assert_eq!(permission.sources()[0].rank(), Rank::new(2, 0));
        assert!(permission.destinations()[0].matches(&Tags::for_service("backend")));
    }
}
