//! Gateway error types

use crate::handlers::RegistryError;
use blackbox_core::DomainError;
use blackbox_rest::RestError;
use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// A frame that could not be decoded or encoded
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Not valid JSON, or a required envelope field is missing
    #[error("Malformed frame: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The frame's payload does not have the shape its op code requires
    #[error("Invalid {op} payload: {source}")]
    InvalidPayload {
        op: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Binary frames are not part of the protocol
    #[error("Unexpected binary frame ({0} bytes)")]
    Binary(usize),
}

/// Gateway error type
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The socket could not be opened; fatal to the run attempt
    #[error("Connection failed: {0}")]
    Connection(#[source] tungstenite::Error),

    /// Malformed inbound frame
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Handler registration misuse
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Dispatch payload did not match its entity
    #[error("Event {event}: {source}")]
    Hydration {
        event: String,
        #[source]
        source: DomainError,
    },

    /// Tried to send after the socket closed
    #[error("Connection closed")]
    ConnectionClosed,

    /// A frame arrived in a state where it has no meaning
    #[error("Unexpected {op} frame while {state}")]
    UnexpectedFrame { op: &'static str, state: &'static str },

    /// REST session setup failed
    #[error(transparent)]
    Rest(#[from] RestError),
}

/// Gateway result type
pub type GatewayResult<T> = Result<T, GatewayError>;
