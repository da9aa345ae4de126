//! Integration tests for common eventhook workflows.
//!
//! These tests verify that the most common use cases work correctly through
//! the facade crate.

use eventhook::prelude::*;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_config_defaults() {
    let config = WebhookConfig::new("https://hooks.example.com/caddy").unwrap();

    assert_eq!(config.method().as_str(), "POST");
    assert_eq!(config.timeout(), Duration::from_secs(30));
    assert!(config.headers().is_empty());
    assert!(config.event_filter().matches("anything"));
    assert_eq!(config.header_order(), HeaderOrder::CustomLast);
    assert!(config.user_agent().is_none());
}

#[test]
fn test_config_from_json_text() {
    let config = WebhookConfig::parse(
        r#"{"url": "http://localhost/hook", "timeout": "0s", "headers": {"X-A": "1"}}"#,
        eventhook::FileFormat::Json,
    )
    .unwrap();

    // zero falls back to the default timeout
    assert_eq!(config.timeout(), Duration::from_secs(30));
    assert_eq!(config.headers().get("x-a").unwrap(), "1");
}

// =============================================================================
// Dispatch
// =============================================================================

#[tokio::test]
async fn test_dispatch_through_facade() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"event": "cert_obtained"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = WebhookConfig::builder(format!("{}/hook", server.uri()))
        .event("cert_obtained")
        .build()
        .unwrap();
    let dispatcher = Dispatcher::new(config).unwrap();

    assert_eq!(
        dispatcher.handle(&HostEvent::new("cert_renewed")),
        Admission::Filtered
    );
    assert_eq!(
        dispatcher.handle(&HostEvent::new("cert_obtained")),
        Admission::Scheduled
    );
    assert!(dispatcher.drain(Duration::from_secs(5)).await);
}

// =============================================================================
// Custom events
// =============================================================================

#[derive(serde::Serialize)]
struct Renewal {
    identifier: String,
    attempt: u32,
}

struct CertRenewed {
    at: chrono::DateTime<chrono::FixedOffset>,
    renewal: Renewal,
}

impl Event for CertRenewed {
    type Data = Renewal;

    fn name(&self) -> &str {
        "cert_renewed"
    }

    fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.at
    }

    fn data(&self) -> Option<&Renewal> {
        Some(&self.renewal)
    }
}

#[tokio::test]
async fn test_typed_event_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "event": "cert_renewed",
            "eventTimestamp": "2024-01-02T03:04:05Z",
            "data": {"identifier": "example.com", "attempt": 2}
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher =
        Dispatcher::new(WebhookConfig::new(format!("{}/hook", server.uri())).unwrap()).unwrap();

    let event = CertRenewed {
        at: "2024-01-02T03:04:05Z".parse().unwrap(),
        renewal: Renewal {
            identifier: "example.com".into(),
            attempt: 2,
        },
    };

    assert!(dispatcher.dispatch(&event).await.is_success());
}
