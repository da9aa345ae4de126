// eventhook - deliver host events to a webhook endpoint
//
// Each event is turned into a small JSON document and sent with one HTTP
// request, in the background, without blocking the code that raised it.

// Re-export the dispatcher
pub use eventhook_webhooks::*;

// Re-export optional crates
#[cfg(feature = "config")]
pub use eventhook_config;

#[cfg(feature = "log")]
pub use eventhook_log;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Admission, DeliveryOutcome, Dispatcher, Event, EventFilter, HeaderOrder, HostEvent,
        WebhookConfig, WebhookError,
    };
}
