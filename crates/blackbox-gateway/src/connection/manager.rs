//! Connection manager
//!
//! Drives one gateway connection through the handshake, feeds inbound frames
//! to the router and tears everything down when the socket closes.

use super::{heartbeat_loop, heartbeat_period, ConnectionState, FrameSender, Session};
use crate::dispatch::EventRouter;
use crate::error::{GatewayError, GatewayResult, ProtocolError};
use crate::protocol::{Frame, OpCode};
use crate::tasks::TaskSupervisor;
use blackbox_rest::RestClient;
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_util::sync::CancellationToken;

/// How long shutdown waits for queued frames to be flushed
const WRITER_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Owner of the socket and session for one connection attempt
pub struct ConnectionManager {
    session: Session,
    router: EventRouter,
    rest: RestClient,
    sender: FrameSender,
    /// Taken by the writer task when the socket opens
    outbound: Option<mpsc::Receiver<Frame>>,
}

impl ConnectionManager {
    /// Create a manager
    pub fn new(
        token: impl Into<String>,
        router: EventRouter,
        rest: RestClient,
        outbound_buffer: usize,
    ) -> Self {
        let (sender, outbound) = FrameSender::channel(outbound_buffer);
        Self {
            session: Session::new(token),
            router,
            rest,
            sender,
            outbound: Some(outbound),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn supervisor(&self) -> &TaskSupervisor {
        self.router.supervisor()
    }

    /// Connect to `url` and serve the connection until it closes
    ///
    /// A failure to open the socket is returned as [`GatewayError::Connection`]
    /// after the REST session has been released.
    pub async fn run(mut self, url: &str) -> GatewayResult<()> {
        self.session.transition(ConnectionState::Connecting);
        tracing::info!(url = %url, "Connecting to gateway");

        match tokio_tungstenite::connect_async(url).await {
            Ok((socket, _response)) => {
                let (sink, stream) = socket.split();
                self.serve(sink, stream).await
            }
            Err(e) => {
                tracing::error!(url = %url, error = %e, "Failed to connect to gateway");
                self.shutdown().await;
                Err(GatewayError::Connection(e))
            }
        }
    }

    /// Serve an already opened socket until it closes
    pub async fn serve<Si, St>(mut self, sink: Si, mut stream: St) -> GatewayResult<()>
    where
        Si: Sink<Message, Error = tungstenite::Error> + Unpin + Send + 'static,
        St: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
    {
        let Some(outbound) = self.outbound.take() else {
            return Err(GatewayError::ConnectionClosed);
        };
        self.session.transition(ConnectionState::AwaitingHello);

        let closed = self.sender.token().clone();
        let mut writer = tokio::spawn(write_loop(sink, outbound, closed.clone()));

        loop {
            // Frames still buffered behind a close are never handled
            let message = tokio::select! {
                biased;
                () = closed.cancelled() => break,
                message = stream.next() => message,
            };

            match message {
                Some(Ok(Message::Text(text))) => {
                    if let Err(e) = self.handle_text(&text).await {
                        tracing::warn!(error = %e, "Failed to handle frame");
                    }
                }
                Some(Ok(Message::Binary(data))) => {
                    let e = ProtocolError::Binary(data.len());
                    tracing::debug!(error = %e, "Ignoring frame");
                }
                Some(Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_))) => {
                    tracing::trace!("Control frame received");
                }
                Some(Ok(Message::Close(frame))) => {
                    tracing::info!(frame = ?frame, "Gateway closed the connection");
                    closed.cancel();
                    break;
                }
                Some(Err(e)) => {
                    tracing::warn!(error = %e, "WebSocket error");
                    closed.cancel();
                    break;
                }
                None => {
                    tracing::info!("Gateway stream ended");
                    closed.cancel();
                    break;
                }
            }
        }

        self.shutdown().await;
        drop(self);

        // Every sender is gone now, so the writer flushes what is queued and closes the sink
        if tokio::time::timeout(WRITER_SHUTDOWN_TIMEOUT, &mut writer)
            .await
            .is_err()
        {
            tracing::warn!("Writer did not finish in time, aborting");
            writer.abort();
        }

        Ok(())
    }

    async fn handle_text(&mut self, text: &str) -> GatewayResult<()> {
        let frame = Frame::decode(text)?;
        self.process_frame(frame).await
    }

    /// Apply one inbound frame to the session
    pub async fn process_frame(&mut self, frame: Frame) -> GatewayResult<()> {
        tracing::trace!(frame = %frame, "Received frame");

        match frame.op {
            OpCode::Hello => self.on_hello(&frame).await,
            OpCode::Ready => self.on_ready(&frame),
            OpCode::Dispatch => self.router.route(&frame).map(|_| ()),
            OpCode::InvalidSession => {
                tracing::warn!(state = %self.session.state(), "Session invalidated by gateway");
                self.sender.close();
                Ok(())
            }
            OpCode::HeartbeatAck => {
                self.session.record_heartbeat_ack();
                tracing::trace!(acked = self.session.heartbeats_acked(), "Heartbeat acknowledged");
                Ok(())
            }
            OpCode::Identify | OpCode::Heartbeat => Err(self.unexpected(&frame)),
        }
    }

    async fn on_hello(&mut self, frame: &Frame) -> GatewayResult<()> {
        if self.session.state() != ConnectionState::AwaitingHello {
            return Err(self.unexpected(frame));
        }

        let hello = frame.hello_payload()?;
        self.session.set_heartbeat_interval(hello.heartbeat_interval);
        tracing::info!(
            heartbeat_interval_ms = hello.heartbeat_interval,
            "Received hello, identifying"
        );

        self.sender.send(Frame::identify(self.session.token())).await?;
        self.session.transition(ConnectionState::Identifying);
        Ok(())
    }

    fn on_ready(&mut self, frame: &Frame) -> GatewayResult<()> {
        if self.session.state() != ConnectionState::Identifying {
            return Err(self.unexpected(frame));
        }
        self.session.transition(ConnectionState::Ready);

        let period = heartbeat_period(self.session.heartbeat_interval_ms());
        let sender = self.sender.clone();
        self.supervisor().spawn("heartbeat", async move {
            heartbeat_loop(sender, period).await?;
            Ok(())
        });
        let ready = self.router.route_ready();

        tracing::info!(
            heartbeat_secs = period.as_secs(),
            ready_handler = ready.is_some(),
            "Gateway session ready"
        );
        Ok(())
    }

    fn unexpected(&self, frame: &Frame) -> GatewayError {
        GatewayError::UnexpectedFrame {
            op: frame.op.name(),
            state: self.session.state().as_str(),
        }
    }

    /// Cancel supervised work and release the REST session
    async fn shutdown(&mut self) {
        self.session.transition(ConnectionState::Closing);
        self.sender.close();

        let live = self.supervisor().live_count();
        self.supervisor().drain().await;
        self.rest.close();

        self.session.transition(ConnectionState::Disconnected);
        tracing::info!(
            cancelled = live,
            faults = self.supervisor().fault_count(),
            "Gateway connection shut down"
        );
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("session", &self.session)
            .field("open", &self.sender.is_open())
            .finish()
    }
}

/// Own the sink and write queued frames until every sender is dropped
async fn write_loop<Si>(mut sink: Si, mut outbound: mpsc::Receiver<Frame>, closed: CancellationToken)
where
    Si: Sink<Message, Error = tungstenite::Error> + Unpin,
{
    while let Some(frame) = outbound.recv().await {
        let text = match frame.encode() {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(frame = %frame, error = %e, "Failed to encode frame");
                continue;
            }
        };

        if let Err(e) = sink.send(Message::text(text)).await {
            tracing::warn!(error = %e, "Failed to write frame, closing connection");
            closed.cancel();
            break;
        }
        tracing::trace!(frame = %frame, "Sent frame");
    }

    let _ = sink.close().await;
}
