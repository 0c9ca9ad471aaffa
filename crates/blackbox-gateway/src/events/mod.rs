//! Gateway events
//!
//! The closed catalogue of event names and the hydrated payloads handlers receive.

mod event_types;
mod payloads;

pub use event_types::EventKind;
pub use payloads::{EventPayload, GatewayEvent, PayloadKind};
