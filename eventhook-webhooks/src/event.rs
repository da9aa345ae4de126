//! Event definitions

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An event raised by the host application
///
/// The dispatcher only reads events; it never mutates or retains them.
pub trait Event {
    /// Structured payload carried by the event
    type Data: Serialize + ?Sized;

    /// Name identifying what happened (e.g. "cert_obtained")
    fn name(&self) -> &str;

    /// When the event occurred, in the zone the host recorded it in
    fn timestamp(&self) -> DateTime<FixedOffset>;

    /// Optional payload; `None` means the event carried no data at all
    fn data(&self) -> Option<&Self::Data>;
}

/// A general purpose event with a JSON object payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostEvent {
    /// Event name
    pub name: String,

    /// Timestamp when the event occurred
    pub timestamp: DateTime<FixedOffset>,

    /// Event payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
}

impl HostEvent {
    /// Create an event that occurred now, without data
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            timestamp: Utc::now().fixed_offset(),
            data: None,
        }
    }

    /// Attach a payload
    pub fn with_data(mut self, data: Map<String, Value>) -> Self {
        self.data = Some(data);
        self
    }

    /// Set the time the event occurred
    pub fn with_timestamp<Tz: TimeZone>(mut self, timestamp: DateTime<Tz>) -> Self {
        self.timestamp = timestamp.fixed_offset();
        self
    }
}

impl Event for HostEvent {
    type Data = Map<String, Value>;

    fn name(&self) -> &str {
        &self.name
    }

    fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    fn data(&self) -> Option<&Self::Data> {
        self.data.as_ref()
    }
}
