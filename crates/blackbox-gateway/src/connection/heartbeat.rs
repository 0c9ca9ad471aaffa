//! Heartbeat loop

use super::FrameSender;
use crate::error::{GatewayError, GatewayResult};
use crate::protocol::Frame;
use std::time::Duration;

/// Delay between heartbeats for a negotiated interval
///
/// A quarter of the interval in whole seconds, and never less than one second.
pub fn heartbeat_period(interval_ms: u64) -> Duration {
    Duration::from_secs((interval_ms / 1000 / 4).max(1))
}

/// Send a heartbeat every `period` until the socket closes
pub async fn heartbeat_loop(sender: FrameSender, period: Duration) -> GatewayResult<()> {
    tracing::debug!(period_secs = period.as_secs(), "Heartbeat loop started");

    loop {
        tokio::select! {
            () = tokio::time::sleep(period) => {}
            () = sender.token().cancelled() => break,
        }

        match sender.send(Frame::heartbeat()).await {
            Ok(()) => tracing::trace!("Sent heartbeat"),
            Err(GatewayError::ConnectionClosed) => break,
            Err(e) => return Err(e),
        }
    }

    tracing::debug!("Heartbeat loop stopped");
    Ok(())
}
