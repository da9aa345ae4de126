//! eventhook Logging Setup
//!
//! Installs a `tracing` subscriber for the eventhook crates, configured from
//! `EVENTHOOK_*` environment variables. The webhook dispatcher reports every
//! delivery outcome through `tracing` events only, so this is how operators
//! see failed or rejected deliveries.
//!
//! # Usage
//!
//! ```rust
//! eventhook_log::init();
//!
//! tracing::info!(url = "https://hooks.example.com", "dispatcher ready");
//! ```
//!
//! # Environment Variables
//!
//! - `EVENTHOOK_DEBUG=1` - Enable debug logging
//! - `EVENTHOOK_LOG_LEVEL=trace|debug|info|warn|error|off` - Set log level
//! - `EVENTHOOK_LOG_FORMAT=pretty|json|compact` - Set output format
//! - `EVENTHOOK_LOG_COLOR=1|0` - Enable/disable colors
//! - `RUST_LOG` - Full filter directive, overrides the level when set

use once_cell::sync::Lazy;
use std::env;
use std::str::FromStr;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{Layer, fmt};

// ============================================================================
// Log Levels
// ============================================================================

/// Log level for eventhook logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Trace level (most verbose)
    Trace,
    /// Debug level
    Debug,
    /// Info level
    Info,
    /// Warning level
    Warn,
    /// Error level (least verbose)
    Error,
    /// Off (no logging)
    Off,
}

impl Level {
    /// Get level name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Off => "OFF",
        }
    }

    /// Equivalent `tracing` level filter.
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Level::Trace => LevelFilter::TRACE,
            Level::Debug => LevelFilter::DEBUG,
            Level::Info => LevelFilter::INFO,
            Level::Warn => LevelFilter::WARN,
            Level::Error => LevelFilter::ERROR,
            Level::Off => LevelFilter::OFF,
        }
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "off" | "none" => Ok(Level::Off),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Log Format
// ============================================================================

/// Output format for log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Multi-line human readable output
    Pretty,
    /// Compact single-line format
    Compact,
    /// JSON format for structured logging
    Json,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Format::Pretty),
            "compact" => Ok(Format::Compact),
            "json" => Ok(Format::Json),
            other => Err(format!("unknown log format: {}", other)),
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level
    pub level: Level,
    /// Output format
    pub format: Format,
    /// Whether ANSI colors are enabled
    pub color: bool,
    /// Whether to include the event target (module path)
    pub target: bool,
    /// Raw `RUST_LOG` directive, takes precedence over `level`
    pub directive: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            format: Format::Json,
            color: false,
            target: true,
            directive: None,
        }
    }
}

impl LogConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str| {
            lookup(key).map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        };

        let debug = flag("EVENTHOOK_DEBUG").unwrap_or(false);

        let level = lookup("EVENTHOOK_LOG_LEVEL")
            .and_then(|s| s.parse().ok())
            .unwrap_or(if debug { Level::Debug } else { Level::Info });

        let format = lookup("EVENTHOOK_LOG_FORMAT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(Format::Json);

        let color = flag("EVENTHOOK_LOG_COLOR")
            .unwrap_or_else(|| lookup("NO_COLOR").is_none() && lookup("TERM").is_some());

        let directive = lookup("RUST_LOG").filter(|s| !s.trim().is_empty());

        Self {
            level,
            format,
            // JSON output never carries escape codes
            color: color && format != Format::Json,
            target: true,
            directive,
        }
    }

    /// Override the level (used by `--verbose` style flags).
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Override the output format.
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        if format == Format::Json {
            self.color = false;
        }
        self
    }

    /// Build the filter for this configuration.
    pub fn filter(&self) -> EnvFilter {
        let fallback = || {
            EnvFilter::builder()
                .with_default_directive(self.level.to_filter().into())
                .parse_lossy("")
        };

        match &self.directive {
            Some(directive) => EnvFilter::try_new(directive).unwrap_or_else(|_| fallback()),
            None => fallback(),
        }
    }
}

/// Configuration read from the environment on first use.
static CONFIG: Lazy<LogConfig> = Lazy::new(LogConfig::from_env);

/// Get the environment-derived configuration.
pub fn config() -> &'static LogConfig {
    &CONFIG
}

// ============================================================================
// Initialization
// ============================================================================

/// Install the global subscriber using the environment configuration.
///
/// Returns `false` when a global subscriber was already installed; calling
/// this more than once is harmless.
pub fn init() -> bool {
    init_with(config())
}

/// Install the global subscriber with an explicit configuration.
pub fn init_with(config: &LogConfig) -> bool {
    let layer = match config.format {
        Format::Json => fmt::layer()
            .json()
            .with_target(config.target)
            .with_writer(std::io::stderr)
            .boxed(),
        Format::Compact => fmt::layer()
            .compact()
            .with_target(config.target)
            .with_ansi(config.color)
            .with_writer(std::io::stderr)
            .boxed(),
        Format::Pretty => fmt::layer()
            .pretty()
            .with_target(config.target)
            .with_ansi(config.color)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(config.filter())
        .try_init()
        .is_ok()
}

// ============================================================================
// Tests
// ============================================================================
