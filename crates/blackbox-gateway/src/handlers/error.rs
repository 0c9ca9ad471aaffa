//! Handler error types

use crate::events::PayloadKind;
use thiserror::Error;

/// Registration misuse, returned to the caller of `bind`/`on`
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The name is not in the event catalogue
    #[error("Unknown event: {0}")]
    UnknownEvent(String),

    /// The handler's payload type does not match the event's entity
    #[error("Handler for {event} must accept {expected}, not {found}")]
    InvalidHandler {
        event: &'static str,
        expected: PayloadKind,
        found: PayloadKind,
    },
}

/// Result of a handler body; an error becomes a supervisor fault
pub type HandlerResult = anyhow::Result<()>;
