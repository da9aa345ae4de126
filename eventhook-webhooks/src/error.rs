//! Error types for webhook operations

use eventhook_config::ConfigError;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while setting up or performing a webhook dispatch
#[derive(Error, Debug)]
pub enum WebhookError {
    /// Configuration was rejected
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Payload serialization failed
    #[error("Payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The outbound request could not be constructed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// HTTP transport failed (DNS, connect, TLS, I/O)
    #[error("HTTP request failed: {}", describe(.0))]
    Http(#[from] reqwest::Error),

    /// The request did not complete within the configured timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// No tokio runtime to spawn dispatches on
    #[error("No tokio runtime available for webhook dispatch")]
    NoRuntime,

    /// The HTTP client could not be created
    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}

/// Render an error together with its source chain.
///
/// reqwest keeps the interesting part ("connection refused", "dns error")
/// in the source, not in its own message.
pub(crate) fn describe(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
