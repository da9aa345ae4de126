//! Configuration for a webhook instance

use crate::EventFilter;
use eventhook_config::{ConfigError, ConfigLoader, ConfigValidator, FileFormat, parse_duration};
use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Method used when none is configured
pub const DEFAULT_METHOD: &str = "POST";

/// Timeout used when none (or zero) is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default cap on concurrently running dispatches per instance
pub const DEFAULT_MAX_IN_FLIGHT: u32 = 256;

/// Order in which the default `Content-Type` and custom headers are applied
///
/// Whichever is applied last wins when a custom header is also named
/// `Content-Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderOrder {
    /// `Content-Type: application/json` first, custom headers after it
    #[default]
    CustomLast,

    /// Custom headers first, `Content-Type: application/json` forced last
    ContentTypeLast,
}

/// Immutable configuration of one webhook instance
///
/// Only obtainable through [`WebhookConfigBuilder::build`], so the target URL
/// is always present and valid.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    target_url: String,
    method: Method,
    headers: HeaderMap,
    timeout: Duration,
    event_filter: EventFilter,
    header_order: HeaderOrder,
    user_agent: Option<HeaderValue>,
    max_in_flight: u32,
}

impl WebhookConfig {
    /// Create a builder for the given target URL
    pub fn builder(target_url: impl Into<String>) -> WebhookConfigBuilder {
        WebhookConfigBuilder::new(target_url)
    }

    /// Create a configuration with all defaults
    pub fn new(target_url: impl Into<String>) -> Result<Self, ConfigError> {
        Self::builder(target_url).build()
    }

    /// Load a configuration file, detecting JSON or TOML from the extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let loader = ConfigLoader::auto(path.as_ref())?;
        let settings: WebhookSettings = loader.load_file_as(path)?;
        settings.into_builder().build()
    }

    /// Parse a configuration document in the given format
    pub fn parse(content: &str, format: FileFormat) -> Result<Self, ConfigError> {
        let settings: WebhookSettings = ConfigLoader::new(format).parse_as(content)?;
        settings.into_builder().build()
    }

    /// Target URL, used verbatim
    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    /// HTTP method
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Custom headers applied to every request
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Per-request timeout (connect + send + receive)
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Which events this instance dispatches
    pub fn event_filter(&self) -> &EventFilter {
        &self.event_filter
    }

    /// Header application order
    pub fn header_order(&self) -> HeaderOrder {
        self.header_order
    }

    /// Identifying `User-Agent`, if enabled
    pub fn user_agent(&self) -> Option<&HeaderValue> {
        self.user_agent.as_ref()
    }

    /// Maximum number of dispatches running at once
    pub fn max_in_flight(&self) -> u32 {
        self.max_in_flight
    }
}

/// Builder for WebhookConfig
///
/// Setters never fail; the first invalid value is reported by
/// [`build`](Self::build).
#[derive(Debug)]
pub struct WebhookConfigBuilder {
    target_url: String,
    method: Option<String>,
    headers: HashMap<String, String>,
    timeout: Option<Duration>,
    event: Option<String>,
    header_order: HeaderOrder,
    user_agent: Option<String>,
    max_in_flight: u32,
    deferred: Option<ConfigError>,
}

impl WebhookConfigBuilder {
    /// Create a new builder with default settings
    pub fn new(target_url: impl Into<String>) -> Self {
        Self {
            target_url: target_url.into(),
            method: None,
            headers: HashMap::new(),
            timeout: None,
            event: None,
            header_order: HeaderOrder::default(),
            user_agent: None,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            deferred: None,
        }
    }

    /// Set the HTTP method
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Add a custom header; a repeated name replaces the earlier value
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the request timeout; zero means the default
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the request timeout from a duration string such as `"1m30s"`
    pub fn timeout_str(mut self, timeout: &str) -> Self {
        match parse_duration(timeout) {
            Ok(duration) => self.timeout = Some(duration),
            Err(err) => self.defer(err),
        }
        self
    }

    /// Only dispatch events with this exact name
    pub fn event(mut self, name: impl Into<String>) -> Self {
        self.event = Some(name.into());
        self
    }

    /// Set the header application order
    pub fn header_order(mut self, order: HeaderOrder) -> Self {
        self.header_order = order;
        self
    }

    /// Send a custom `User-Agent`
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Send the crate's identifying `User-Agent`
    pub fn identify(self) -> Self {
        self.user_agent(format!("eventhook/{}", env!("CARGO_PKG_VERSION")))
    }

    /// Cap the number of dispatches running at once
    pub fn max_in_flight(mut self, max: u32) -> Self {
        self.max_in_flight = max;
        self
    }

    fn defer(&mut self, err: ConfigError) {
        if self.deferred.is_none() {
            self.deferred = Some(err);
        }
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<WebhookConfig, ConfigError> {
        if let Some(err) = self.deferred {
            return Err(err);
        }

        ConfigValidator::not_empty(&self.target_url, "url")?;
        ConfigValidator::is_url(&self.target_url, "url")?;
        ConfigValidator::at_least(self.max_in_flight, 1, "max_in_flight")?;

        let method = match self.method.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_METHOD,
            Some(method) => method,
        };
        let method = Method::from_bytes(method.as_bytes())
            .map_err(|_| ConfigError::invalid("method", format!("{:?} is not an HTTP method", method)))?;

        let mut headers = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ConfigError::invalid("header", format!("invalid header name {:?}", name)))?;
            let header_value = HeaderValue::from_str(value).map_err(|_| {
                ConfigError::invalid("header", format!("invalid value for header {:?}", name))
            })?;
            headers.insert(header_name, header_value);
        }

        let user_agent = self
            .user_agent
            .map(|ua| {
                HeaderValue::from_str(&ua)
                    .map_err(|_| ConfigError::invalid("user_agent", format!("invalid value {:?}", ua)))
            })
            .transpose()?;

        let timeout = match self.timeout {
            None => DEFAULT_TIMEOUT,
            Some(timeout) if timeout.is_zero() => DEFAULT_TIMEOUT,
            Some(timeout) => timeout,
        };

        let event_filter = match self.event {
            Some(name) if name.is_empty() => {
                return Err(ConfigError::invalid("event", "event name cannot be empty"));
            }
            other => EventFilter::from(other),
        };

        Ok(WebhookConfig {
            target_url: self.target_url,
            method,
            headers,
            timeout,
            event_filter,
            header_order: self.header_order,
            user_agent,
            max_in_flight: self.max_in_flight,
        })
    }
}

/// File representation of a webhook configuration
///
/// ```toml
/// url = "https://hooks.example.com/caddy"
/// method = "PUT"
/// timeout = "10s"
/// event = "cert_obtained"
///
/// [headers]
/// Authorization = "Bearer abc"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookSettings {
    #[serde(default)]
    pub url: String,
    pub method: Option<String>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    pub timeout: Option<String>,
    pub event: Option<String>,
    #[serde(default)]
    pub header_order: HeaderOrder,
    pub user_agent: Option<String>,
    pub max_in_flight: Option<u32>,
}

impl WebhookSettings {
    /// Turn file settings into a builder
    pub fn into_builder(self) -> WebhookConfigBuilder {
        let mut builder = WebhookConfig::builder(self.url).header_order(self.header_order);

        if let Some(method) = self.method {
            builder = builder.method(method);
        }
        for (name, value) in self.headers {
            builder = builder.header(name, value);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout_str(&timeout);
        }
        if let Some(event) = self.event {
            builder = builder.event(event);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        if let Some(max) = self.max_in_flight {
            builder = builder.max_in_flight(max);
        }

        builder
    }
}
