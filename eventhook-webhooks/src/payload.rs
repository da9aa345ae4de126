//! Webhook payload types

use crate::Event;
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use std::fmt::Display;
use serde::Serialize;

/// The JSON document sent for one event
///
/// Built per dispatch and dropped once serialized.
#[derive(Debug, Serialize)]
pub struct OutboundPayload<'a, D: Serialize + ?Sized> {
    /// Event name
    pub event: &'a str,

    /// When the event occurred (RFC 3339, in the event's own offset)
    #[serde(rename = "eventTimestamp")]
    pub event_timestamp: String,

    /// When the dispatch was attempted (RFC 3339, UTC)
    pub timestamp: String,

    /// Event data, omitted entirely when the event has none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<&'a D>,
}

impl<'a, D: Serialize + ?Sized> OutboundPayload<'a, D> {
    /// Build the payload for an event, stamped with the current time
    pub fn from_event<E>(event: &'a E) -> Self
    where
        E: Event<Data = D>,
    {
        Self::at(event, Utc::now())
    }

    /// Build the payload for an event with an explicit dispatch time
    pub fn at<E>(event: &'a E, now: DateTime<Utc>) -> Self
    where
        E: Event<Data = D>,
    {
        Self {
            event: event.name(),
            event_timestamp: rfc3339(event.timestamp()),
            timestamp: rfc3339(now),
            data: event.data(),
        }
    }

    /// Convert to JSON bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// RFC 3339 with whole seconds; a zero offset is written as `Z`
fn rfc3339<Tz: TimeZone>(timestamp: DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}
