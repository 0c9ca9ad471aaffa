//! # blackbox-gateway
//!
//! Client side of the blackbox real-time gateway.
//!
//! A [`Client`] owns the handler bindings and the shared REST session. Calling
//! [`Client::run`] opens the WebSocket, answers HELLO with IDENTIFY, starts the
//! heartbeat on READY and then routes every dispatch frame to the bound
//! handler as a supervised task. When the socket closes, all outstanding
//! tasks are cancelled and awaited before `run` returns.
//!
//! There is no reconnect, resume or rate-limit handling: one call to `run`
//! is one connection attempt.

pub mod client;
pub mod connection;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod handlers;
pub mod protocol;
pub mod tasks;

pub use client::Client;
pub use context::Context;
pub use error::{GatewayError, GatewayResult, ProtocolError};
pub use events::{EventKind, EventPayload, GatewayEvent, PayloadKind};
pub use handlers::{EventHandler, HandlerRegistry, HandlerResult, RegistryError};
pub use tasks::{TaskFault, TaskId, TaskSupervisor};
