//! Gateway operation codes

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Gateway operation codes
///
/// Op codes define the type of frame being sent or received over the WebSocket connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    /// Server delivers an event to the client (server only)
    Dispatch = 0x0,
    /// Identify - authenticate session (client only)
    Identify = 0x1,
    /// Hello - sent on connect with the heartbeat interval (server only)
    Hello = 0x2,
    /// Ready - session established (server only)
    Ready = 0x3,
    /// Invalid Session - server is closing the session (server only)
    InvalidSession = 0x8,
    /// Heartbeat - keep connection alive (client only)
    Heartbeat = 0x9,
    /// Heartbeat ACK - heartbeat acknowledged (server only)
    HeartbeatAck = 0xA,
}

impl OpCode {
    /// Create an `OpCode` from a raw integer value
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x0 => Some(Self::Dispatch),
            0x1 => Some(Self::Identify),
            0x2 => Some(Self::Hello),
            0x3 => Some(Self::Ready),
            0x8 => Some(Self::InvalidSession),
            0x9 => Some(Self::Heartbeat),
            0xA => Some(Self::HeartbeatAck),
            _ => None,
        }
    }

    /// Get the raw integer value
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Get the name of this op code
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dispatch => "Dispatch",
            Self::Identify => "Identify",
            Self::Hello => "Hello",
            Self::Ready => "Ready",
            Self::InvalidSession => "InvalidSession",
            Self::Heartbeat => "Heartbeat",
            Self::HeartbeatAck => "HeartbeatAck",
        }
    }
}

impl Serialize for OpCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for OpCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Self::from_u8(value).ok_or_else(|| serde::de::Error::custom(format!("invalid op code: {value}")))
    }
}

impl std::fmt::Display for OpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:#x})", self.name(), self.as_u8())
    }
}
