//! Fire-and-forget dispatch of events to the configured webhook
//!
//! [`Dispatcher::handle`] is the entry point a host calls for every event.
//! It serializes the payload, takes an in-flight slot and spawns the delivery
//! on the tokio runtime, returning before any network I/O happens. Delivery
//! results are reported through `tracing` only.
//!
//! ```text
//! handle(event)
//!   ├─► filter mismatch        → Filtered
//!   ├─► serialize payload      → Dropped (error logged)
//!   ├─► try_acquire slot       → Dropped (warning logged)
//!   └─► spawn deliver()        → Scheduled
//!            └─► one request, outcome logged, slot released
//! ```

use crate::{
    DeliveryOutcome, Event, OutboundPayload, Result, WebhookClient, WebhookConfig, WebhookError,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, trace, warn};

/// What [`Dispatcher::handle`] did with an event
///
/// Says nothing about delivery, which happens later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Delivery was spawned
    Scheduled,

    /// The event name did not match the instance's filter
    Filtered,

    /// The event was dropped before sending (serialization failure or no
    /// free in-flight slot)
    Dropped,
}

/// Webhook dispatcher for one configured endpoint
///
/// Cheap to clone; clones share the HTTP client and the in-flight limit.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: WebhookClient,
    slots: Arc<Semaphore>,
    runtime: Handle,
}

impl Dispatcher {
    /// Create a dispatcher spawning onto the current tokio runtime
    pub fn new(config: WebhookConfig) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|_| WebhookError::NoRuntime)?;
        Self::with_handle(config, runtime)
    }

    /// Create a dispatcher spawning onto the given runtime
    pub fn with_handle(config: WebhookConfig, runtime: Handle) -> Result<Self> {
        let slots = Arc::new(Semaphore::new(config.max_in_flight() as usize));
        let client = WebhookClient::new(Arc::new(config))?;

        info!(
            url = client.config().target_url(),
            method = %client.config().method(),
            timeout = ?client.config().timeout(),
            event = client.config().event_filter().event_name(),
            "webhook dispatcher ready"
        );

        Ok(Self {
            client,
            slots,
            runtime,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &WebhookConfig {
        self.client.config()
    }

    /// Number of dispatches currently running
    pub fn in_flight(&self) -> usize {
        self.config().max_in_flight() as usize - self.slots.available_permits()
    }

    /// Dispatch an event without waiting for delivery
    pub fn handle<E: Event>(&self, event: &E) -> Admission {
        let name = event.name();

        if !self.admit(name) {
            return Admission::Filtered;
        }

        let Ok(body) = self.serialize(event) else {
            return Admission::Dropped;
        };

        let permit = match Arc::clone(&self.slots).try_acquire_owned() {
            Ok(permit) => permit,
            Err(_) => {
                warn!(
                    event = name,
                    url = self.config().target_url(),
                    max_in_flight = self.config().max_in_flight(),
                    "webhook dispatch capacity exhausted, dropping event"
                );
                return Admission::Dropped;
            }
        };

        let client = self.client.clone();
        let name = name.to_string();
        self.runtime.spawn(async move {
            client.deliver(&name, body).await;
            drop(permit);
        });

        Admission::Scheduled
    }

    /// Dispatch an event and wait for the delivery to finish
    ///
    /// Logs exactly what [`handle`](Self::handle) would; waits for an
    /// in-flight slot instead of dropping the event when none is free.
    pub async fn dispatch<E: Event>(&self, event: &E) -> DeliveryOutcome {
        let name = event.name();

        if !self.admit(name) {
            return DeliveryOutcome::Filtered;
        }

        let body = match self.serialize(event) {
            Ok(body) => body,
            Err(err) => return DeliveryOutcome::Failed(err.into()),
        };

        let _permit = match self.slots.acquire().await {
            Ok(permit) => permit,
            Err(_) => {
                return DeliveryOutcome::Failed(WebhookError::Client(
                    "dispatcher slots closed".to_string(),
                ));
            }
        };

        self.client.deliver(name, body).await
    }

    /// Wait for running dispatches to finish
    ///
    /// Returns `false` if some were still running after `grace`. Nothing is
    /// cancelled either way.
    pub async fn drain(&self, grace: Duration) -> bool {
        let all = self.config().max_in_flight();
        match tokio::time::timeout(grace, self.slots.acquire_many(all)).await {
            Ok(Ok(_permits)) => true,
            Ok(Err(_)) => false,
            Err(_) => {
                warn!(
                    in_flight = self.in_flight(),
                    grace = ?grace,
                    "webhook dispatches still running after grace period"
                );
                false
            }
        }
    }

    fn admit(&self, name: &str) -> bool {
        if !self.config().event_filter().matches(name) {
            trace!(event = name, "event does not match webhook filter");
            return false;
        }

        debug!(
            event_name = name,
            webhook_url = self.config().target_url(),
            "handling event"
        );
        true
    }

    fn serialize<E: Event>(&self, event: &E) -> std::result::Result<Vec<u8>, serde_json::Error> {
        OutboundPayload::from_event(event).to_bytes().inspect_err(|err| {
            error!(
                event = event.name(),
                error = %err,
                "JSON serialization failed for webhook payload"
            );
        })
    }
}
