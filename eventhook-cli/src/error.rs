//! Error types for the eventhook CLI.

use eventhook_webhooks::{ConfigError, WebhookError};
use std::fmt;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug)]
pub enum CliError {
    /// Webhook configuration could not be loaded or is invalid
    Config(ConfigError),

    /// Dispatcher setup or delivery failed before a response arrived
    Webhook(WebhookError),

    /// The endpoint answered, but not with a 2xx status
    Rejected { status: u16, body: String },

    /// The event was not delivered (dropped, or still running at exit)
    Undelivered(String),

    /// Invalid argument
    InvalidArgument(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Webhook(e) => write!(f, "Webhook error: {}", e),
            CliError::Rejected { status, body } if body.is_empty() => {
                write!(f, "Webhook rejected with status {}", status)
            }
            CliError::Rejected { status, body } => {
                write!(f, "Webhook rejected with status {}: {}", status, body)
            }
            CliError::Undelivered(msg) => write!(f, "Event not delivered: {}", msg),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<WebhookError> for CliError {
    fn from(e: WebhookError) -> Self {
        match e {
            WebhookError::Config(e) => CliError::Config(e),
            other => CliError::Webhook(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_display() {
        let err = CliError::Rejected {
            status: 500,
            body: "server error".into(),
        };
        assert_eq!(err.to_string(), "Webhook rejected with status 500: server error");

        let err = CliError::Rejected {
            status: 404,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "Webhook rejected with status 404");
    }

    #[test]
    fn test_config_errors_unwrapped() {
        let err: CliError = WebhookError::Config(ConfigError::MissingField("url".into())).into();
        assert!(matches!(err, CliError::Config(ConfigError::MissingField(_))));

        let err: CliError = WebhookError::Timeout(Duration::from_secs(1)).into();
        assert!(matches!(err, CliError::Webhook(_)));
    }
}
