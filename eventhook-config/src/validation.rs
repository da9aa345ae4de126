// Configuration validation

use crate::{ConfigError, Result};

/// Configuration validator with rules
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate that a required value is present and not blank
    pub fn not_empty(value: &str, field: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(ConfigError::MissingField(field.to_string()));
        }
        Ok(())
    }

    /// Validate that a value is an absolute http(s) URL
    pub fn is_url(value: &str, field: &str) -> Result<()> {
        let parsed = url::Url::parse(value)
            .map_err(|e| ConfigError::invalid(field, format!("{} is not a valid URL: {}", value, e)))?;

        match parsed.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ConfigError::invalid(
                field,
                format!("unsupported URL scheme {:?}, expected http or https", scheme),
            )),
        }
    }

    /// Validate that a number is at least `min`
    pub fn at_least<T: PartialOrd + std::fmt::Display>(value: T, min: T, field: &str) -> Result<()> {
        if value < min {
            return Err(ConfigError::ValidationError(format!(
                "{} must be at least {}",
                field, min
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_empty_validation() {
        assert!(ConfigValidator::not_empty("value", "field").is_ok());
        assert!(matches!(
            ConfigValidator::not_empty("", "url"),
            Err(ConfigError::MissingField(field)) if field == "url"
        ));
        assert!(ConfigValidator::not_empty("   ", "url").is_err());
    }

    #[test]
    fn test_url_validation() {
        assert!(ConfigValidator::is_url("https://example.com/hook", "url").is_ok());
        assert!(ConfigValidator::is_url("http://127.0.0.1:8080", "url").is_ok());
        assert!(ConfigValidator::is_url("example.com", "url").is_err());
        assert!(ConfigValidator::is_url("ftp://example.com", "url").is_err());
    }

    #[test]
    fn test_at_least_validation() {
        assert!(ConfigValidator::at_least(5, 1, "field").is_ok());
        assert!(ConfigValidator::at_least(0, 1, "field").is_err());
    }
}
