//! Session state
//!
//! Mutable state of one gateway connection, owned by the connection manager.

use std::fmt;
use tokio::time::Instant;

/// Connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No socket
    Disconnected,
    /// Opening the socket
    Connecting,
    /// Socket open, waiting for HELLO
    AwaitingHello,
    /// IDENTIFY sent, waiting for READY
    Identifying,
    /// Handshake complete
    Ready,
    /// Shutting down
    Closing,
}

impl ConnectionState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::AwaitingHello => "awaiting hello",
            Self::Identifying => "identifying",
            Self::Ready => "ready",
            Self::Closing => "closing",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gateway session
pub struct Session {
    token: String,
    /// Negotiated heartbeat interval in milliseconds, 0 until HELLO
    heartbeat_interval_ms: u64,
    state: ConnectionState,
    heartbeats_acked: u64,
    last_heartbeat_ack: Option<Instant>,
}

impl Session {
    /// Create a new session
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            heartbeat_interval_ms: 0,
            state: ConnectionState::Disconnected,
            heartbeats_acked: 0,
            last_heartbeat_ack: None,
        }
    }

    /// Authentication token sent in IDENTIFY
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Move to a new state
    pub fn transition(&mut self, next: ConnectionState) {
        if self.state != next {
            tracing::debug!(from = %self.state, to = %next, "Connection state changed");
            self.state = next;
        }
    }

    pub fn heartbeat_interval_ms(&self) -> u64 {
        self.heartbeat_interval_ms
    }

    pub fn set_heartbeat_interval(&mut self, interval_ms: u64) {
        self.heartbeat_interval_ms = interval_ms;
    }

    /// Record a heartbeat ACK
    pub fn record_heartbeat_ack(&mut self) {
        self.heartbeats_acked += 1;
        self.last_heartbeat_ack = Some(Instant::now());
    }

    pub fn heartbeats_acked(&self) -> u64 {
        self.heartbeats_acked
    }

    pub fn last_heartbeat_ack(&self) -> Option<Instant> {
        self.last_heartbeat_ack
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("heartbeat_interval_ms", &self.heartbeat_interval_ms)
            .field("heartbeats_acked", &self.heartbeats_acked)
            .finish()
    }
}
