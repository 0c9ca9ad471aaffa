//! Gateway frame format
//!
//! Every text message on the socket is one JSON object `{op, data, event}`.

use super::{HelloPayload, OpCode};
use crate::error::ProtocolError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Gateway frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Operation code
    pub op: OpCode,

    /// Frame payload; the key is required but the value may be `null`
    #[serde(rename = "data", deserialize_with = "present_value")]
    pub payload: Value,

    /// Event name (only meaningful for op=0 Dispatch)
    #[serde(default)]
    pub event: String,
}

/// Keep an explicit `null` as `Value::Null` while still failing on a missing key
fn present_value<'de, D>(deserializer: D) -> Result<Value, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer)
}

impl Frame {
    /// Create a frame
    pub fn new(op: OpCode, payload: Value, event: impl Into<String>) -> Self {
        Self {
            op,
            payload,
            event: event.into(),
        }
    }

    // === Client Frames ===

    /// Create an Identify frame (op=1)
    #[must_use]
    pub fn identify(token: impl Into<String>) -> Self {
        let token: String = token.into();
        Self::new(OpCode::Identify, serde_json::json!({ "token": token }), "")
    }

    /// Create a Heartbeat frame (op=9)
    #[must_use]
    pub fn heartbeat() -> Self {
        Self::new(OpCode::Heartbeat, Value::Null, "")
    }

    // === Server Frames ===

    /// Create a Hello frame (op=2)
    #[must_use]
    pub fn hello(heartbeat_interval: u64) -> Self {
        Self::new(
            OpCode::Hello,
            serde_json::json!({ "heartbeatInterval": heartbeat_interval }),
            "",
        )
    }

    /// Create a Ready frame (op=3)
    #[must_use]
    pub fn ready() -> Self {
        Self::new(OpCode::Ready, Value::Null, "")
    }

    /// Create a Dispatch frame (op=0)
    #[must_use]
    pub fn dispatch(event: impl Into<String>, data: Value) -> Self {
        Self::new(OpCode::Dispatch, data, event)
    }

    /// Create an Invalid Session frame (op=8)
    #[must_use]
    pub fn invalid_session() -> Self {
        Self::new(OpCode::InvalidSession, Value::Null, "")
    }

    /// Create a Heartbeat ACK frame (op=10)
    #[must_use]
    pub fn heartbeat_ack() -> Self {
        Self::new(OpCode::HeartbeatAck, Value::Null, "")
    }

    // === Helpers ===

    /// Check if this is a dispatch frame
    pub fn is_dispatch(&self) -> bool {
        self.op == OpCode::Dispatch
    }

    /// Decode the payload as a specific type
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T, ProtocolError> {
        T::deserialize(&self.payload).map_err(|source| ProtocolError::InvalidPayload {
            op: self.op.name(),
            source,
        })
    }

    /// Decode the HELLO payload
    pub fn hello_payload(&self) -> Result<HelloPayload, ProtocolError> {
        self.payload_as()
    }

    /// Decode a frame from its text form
    pub fn decode(raw: &str) -> Result<Self, ProtocolError> {
        decode(raw)
    }

    /// Encode this frame to its text form
    pub fn encode(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(ProtocolError::Malformed)
    }
}

impl std::fmt::Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.event.is_empty() {
            write!(f, "{}", self.op)
        } else {
            write!(f, "{} {}", self.op, self.event)
        }
    }
}

/// Decode a frame from its text form
pub fn decode(raw: &str) -> Result<Frame, ProtocolError> {
    serde_json::from_str(raw).map_err(ProtocolError::Malformed)
}

/// Encode a frame from its parts
pub fn encode(op: OpCode, payload: &Value, event: &str) -> Result<String, ProtocolError> {
    serde_json::to_string(&serde_json::json!({
        "op": op,
        "data": payload,
        "event": event,
    }))
    .map_err(ProtocolError::Malformed)
}
