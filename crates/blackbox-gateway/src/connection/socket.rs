//! Outbound frame queue shared with background tasks

use crate::error::{GatewayError, GatewayResult};
use crate::protocol::Frame;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Handle for queueing outbound frames to the writer task
///
/// Carries the connection's close token: once it is cancelled the socket is
/// closed for good and every send fails.
#[derive(Debug, Clone)]
pub struct FrameSender {
    tx: mpsc::Sender<Frame>,
    closed: CancellationToken,
}

impl FrameSender {
    /// Create a sender and the receiving end the writer task drains
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Frame>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (
            Self {
                tx,
                closed: CancellationToken::new(),
            },
            rx,
        )
    }

    /// Queue a frame
    ///
    /// Fails with [`GatewayError::ConnectionClosed`] once the socket is closed.
    pub async fn send(&self, frame: Frame) -> GatewayResult<()> {
        if self.closed.is_cancelled() {
            return Err(GatewayError::ConnectionClosed);
        }
        self.tx
            .send(frame)
            .await
            .map_err(|_| GatewayError::ConnectionClosed)
    }

    /// Token cancelled when the socket closes
    pub fn token(&self) -> &CancellationToken {
        &self.closed
    }

    /// Mark the socket closed and wake everything waiting on it
    pub fn close(&self) {
        self.closed.cancel();
    }

    pub fn is_open(&self) -> bool {
        !self.closed.is_cancelled()
    }
}
