// Configuration support for eventhook
//
// Loads webhook settings from JSON or TOML files, parses duration strings
// such as "1m30s", and provides the validation helpers used while building
// a webhook configuration.

pub mod duration;
pub mod error;
pub mod loader;
pub mod validation;

pub use duration::parse_duration;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use validation::ConfigValidator;
