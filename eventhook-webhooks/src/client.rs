//! Webhook client performing single best-effort deliveries

use crate::error::describe;
use crate::{HeaderOrder, Result, WebhookConfig, WebhookError};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Request};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Result of one delivery attempt
///
/// Only the logs produced while delivering are meant for operators; this
/// value exists for callers that await a dispatch in place.
#[derive(Debug)]
pub enum DeliveryOutcome {
    /// The endpoint answered with a 2xx status
    Delivered { status: u16 },

    /// The endpoint answered with any other status
    Rejected { status: u16, body: String },

    /// No response was received, or no request could be sent
    Failed(WebhookError),

    /// The event did not pass the instance's event filter
    Filtered,
}

impl DeliveryOutcome {
    /// Check if the endpoint accepted the webhook
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }

    /// HTTP status code, if a response was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Delivered { status } | Self::Rejected { status, .. } => Some(*status),
            Self::Failed(_) | Self::Filtered => None,
        }
    }
}

/// Client for sending webhook requests to one configured endpoint
#[derive(Debug, Clone)]
pub struct WebhookClient {
    config: Arc<WebhookConfig>,
    http_client: Client,
}

impl WebhookClient {
    /// Create a client enforcing the configured timeout on every request
    pub fn new(config: Arc<WebhookConfig>) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| WebhookError::Client(describe(&e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &WebhookConfig {
        &self.config
    }

    /// Build the outbound request for a serialized payload
    pub fn build_request(&self, body: Vec<u8>) -> Result<Request> {
        let mut request = self
            .http_client
            .request(self.config.method().clone(), self.config.target_url())
            .body(body)
            .build()
            .map_err(|e| WebhookError::InvalidRequest(describe(&e)))?;

        self.apply_headers(request.headers_mut());
        Ok(request)
    }

    fn apply_headers(&self, headers: &mut HeaderMap) {
        let json = HeaderValue::from_static("application/json");

        if let Some(user_agent) = self.config.user_agent() {
            headers.insert(USER_AGENT, user_agent.clone());
        }

        match self.config.header_order() {
            HeaderOrder::CustomLast => {
                headers.insert(CONTENT_TYPE, json);
                self.apply_custom(headers);
            }
            HeaderOrder::ContentTypeLast => {
                self.apply_custom(headers);
                headers.insert(CONTENT_TYPE, json);
            }
        }
    }

    fn apply_custom(&self, headers: &mut HeaderMap) {
        for (name, value) in self.config.headers() {
            headers.insert(name.clone(), value.clone());
        }
    }

    /// Send one payload and log the outcome
    ///
    /// Never retries. The response body is read in full but only surfaced
    /// (in the warning log) for non-2xx answers.
    pub async fn deliver(&self, event: &str, body: Vec<u8>) -> DeliveryOutcome {
        let url = self.config.target_url();

        let request = match self.build_request(body) {
            Ok(request) => request,
            Err(err) => {
                error!(event, url, error = %err, "failed to build webhook request");
                return DeliveryOutcome::Failed(err);
            }
        };

        let response = match self.http_client.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                let err = if e.is_timeout() {
                    WebhookError::Timeout(self.config.timeout())
                } else {
                    WebhookError::Http(e)
                };
                error!(event, url, error = %err, "failed to send webhook");
                return DeliveryOutcome::Failed(err);
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!(event, url, error = %describe(&e), "failed to read webhook response body");
                String::new()
            }
        };

        if status.is_success() {
            debug!(event, url, status = status.as_u16(), "webhook sent successfully");
            DeliveryOutcome::Delivered {
                status: status.as_u16(),
            }
        } else {
            warn!(
                event,
                url,
                status = status.as_u16(),
                response = %body,
                "webhook returned non-2xx status"
            );
            DeliveryOutcome::Rejected {
                status: status.as_u16(),
                body,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn client(config: WebhookConfig) -> WebhookClient {
        WebhookClient::new(Arc::new(config)).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = client(
            WebhookConfig::builder("http://localhost:9999/hook")
                .timeout(Duration::from_secs(5))
                .build()
                .unwrap(),
        );
        assert_eq!(client.config().timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_request_shape() {
        let client = client(
            WebhookConfig::builder("http://localhost:9999/hook?source=caddy")
                .method("PUT")
                .header("X-Test", "abc")
                .build()
                .unwrap(),
        );

        let request = client.build_request(b"{}".to_vec()).unwrap();

        assert_eq!(request.method(), reqwest::Method::PUT);
        assert_eq!(request.url().as_str(), "http://localhost:9999/hook?source=caddy");
        assert_eq!(request.headers().get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(request.headers().get("x-test").unwrap(), "abc");
        assert!(request.headers().get(USER_AGENT).is_none());
        assert_eq!(request.body().and_then(|b| b.as_bytes()), Some(&b"{}"[..]));
    }

    #[test]
    fn test_custom_content_type_wins_when_applied_last() {
        let client = client(
            WebhookConfig::builder("http://localhost:9999/hook")
                .header("Content-Type", "application/cloudevents+json")
                .build()
                .unwrap(),
        );

        let request = client.build_request(Vec::new()).unwrap();
        let values: Vec<_> = request.headers().get_all(CONTENT_TYPE).iter().collect();
        assert_eq!(values, vec!["application/cloudevents+json"]);
    }

    #[test]
    fn test_json_content_type_forced_last() {
        let client = client(
            WebhookConfig::builder("http://localhost:9999/hook")
                .header("Content-Type", "text/plain")
                .header_order(HeaderOrder::ContentTypeLast)
                .build()
                .unwrap(),
        );

        let request = client.build_request(Vec::new()).unwrap();
        let values: Vec<_> = request.headers().get_all(CONTENT_TYPE).iter().collect();
        assert_eq!(values, vec!["application/json"]);
    }

    #[test]
    fn test_user_agent_can_be_overridden_by_custom_header() {
        let client = client(
            WebhookConfig::builder("http://localhost:9999/hook")
                .user_agent("Caddy Event Webhook")
                .build()
                .unwrap(),
        );
        let request = client.build_request(Vec::new()).unwrap();
        assert_eq!(request.headers().get(USER_AGENT).unwrap(), "Caddy Event Webhook");

        let client = self::client(
            WebhookConfig::builder("http://localhost:9999/hook")
                .identify()
                .header("User-Agent", "custom/1.0")
                .build()
                .unwrap(),
        );
        let request = client.build_request(Vec::new()).unwrap();
        assert_eq!(request.headers().get(USER_AGENT).unwrap(), "custom/1.0");
    }

    #[test]
    fn test_outcome_helpers() {
        assert!(DeliveryOutcome::Delivered { status: 204 }.is_success());
        assert_eq!(DeliveryOutcome::Delivered { status: 204 }.status(), Some(204));

        let rejected = DeliveryOutcome::Rejected {
            status: 500,
            body: "server error".into(),
        };
        assert!(!rejected.is_success());
        assert_eq!(rejected.status(), Some(500));

        let failed = DeliveryOutcome::Failed(WebhookError::Timeout(Duration::from_secs(1)));
        assert_eq!(failed.status(), None);
        assert!(!DeliveryOutcome::Filtered.is_success());
    }
}
