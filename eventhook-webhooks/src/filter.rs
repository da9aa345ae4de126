//! Per-instance event-name filter

use serde::{Deserialize, Serialize};

/// Decides which events an instance dispatches
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EventFilter {
    /// Dispatch every event
    #[default]
    Any,

    /// Dispatch only events with exactly this name
    Named(String),
}

impl EventFilter {
    /// Filter bound to a single event name
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Check whether an event with the given name should be dispatched
    pub fn matches(&self, event: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Named(name) => name == event,
        }
    }

    /// The bound event name, if any
    pub fn event_name(&self) -> Option<&str> {
        match self {
            Self::Any => None,
            Self::Named(name) => Some(name),
        }
    }
}

impl From<Option<String>> for EventFilter {
    fn from(name: Option<String>) -> Self {
        name.map(Self::Named).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_matches_everything() {
        let filter = EventFilter::Any;
        assert!(filter.matches("cert_obtained"));
        assert!(filter.matches(""));
        assert_eq!(filter.event_name(), None);
    }

    #[test]
    fn test_named_is_exact() {
        let filter = EventFilter::named("cert_obtained");
        assert!(filter.matches("cert_obtained"));
        assert!(!filter.matches("cert_renewed"));
        assert!(!filter.matches("cert_obtained_again"));
        assert!(!filter.matches("CERT_OBTAINED"));
        assert_eq!(filter.event_name(), Some("cert_obtained"));
    }

    #[test]
    fn test_no_wildcards() {
        let filter = EventFilter::named("cert_*");
        assert!(!filter.matches("cert_obtained"));
        assert!(filter.matches("cert_*"));
    }

    #[test]
    fn test_from_option() {
        assert_eq!(EventFilter::from(None), EventFilter::Any);
        assert_eq!(
            EventFilter::from(Some("tls_get_certificate".to_string())),
            EventFilter::named("tls_get_certificate")
        );
    }
}
