//! Event-to-Webhook Dispatch for eventhook
//!
//! Turns named host events ("cert_obtained", "cert_renewed", ...) into a
//! JSON document and delivers it to one configured HTTP endpoint.
//!
//! # Features
//!
//! - **Fire-and-forget**: [`Dispatcher::handle`] returns before any network I/O
//! - **Best effort**: exactly one attempt per event, no retries, no queue
//! - **Bounded**: at most `max_in_flight` deliveries run at once per instance
//! - **Event filter**: optionally bind an instance to a single event name
//! - **Structured logs**: every outcome is reported through `tracing`
//!
//! # Payload
//!
//! ```json
//! {
//!   "event": "cert_obtained",
//!   "eventTimestamp": "2024-05-01T12:30:00Z",
//!   "timestamp": "2024-05-01T12:30:01Z",
//!   "data": { "identifier": "example.com" }
//! }
//! ```
//!
//! `data` is left out entirely when the event carries none.
//!
//! # Example
//!
//! ```rust,no_run
//! use eventhook_webhooks::{Dispatcher, HostEvent, WebhookConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = WebhookConfig::builder("https://hooks.example.com/caddy")
//!         .header("Authorization", "Bearer secret")
//!         .timeout_str("10s")
//!         .event("cert_obtained")
//!         .build()?;
//!
//!     let dispatcher = Dispatcher::new(config)?;
//!
//!     let mut data = serde_json::Map::new();
//!     data.insert("identifier".into(), "example.com".into());
//!     dispatcher.handle(&HostEvent::new("cert_obtained").with_data(data));
//!
//!     dispatcher.drain(std::time::Duration::from_secs(5)).await;
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod dispatcher;
mod error;
mod event;
mod filter;
mod payload;

pub use client::{DeliveryOutcome, WebhookClient};
pub use config::{
    DEFAULT_MAX_IN_FLIGHT, DEFAULT_METHOD, DEFAULT_TIMEOUT, HeaderOrder, WebhookConfig,
    WebhookConfigBuilder, WebhookSettings,
};
pub use dispatcher::{Admission, Dispatcher};
pub use error::WebhookError;
pub use event::{Event, HostEvent};
pub use eventhook_config::{ConfigError, FileFormat};
pub use filter::EventFilter;
pub use payload::OutboundPayload;

/// Result type for webhook operations
pub type Result<T> = std::result::Result<T, WebhookError>;
