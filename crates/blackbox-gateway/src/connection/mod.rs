//! Connection management
//!
//! Owns the socket and the session for one connection attempt.

mod heartbeat;
mod manager;
mod session;
mod socket;

pub use heartbeat::{heartbeat_loop, heartbeat_period};
pub use manager::ConnectionManager;
pub use session::{ConnectionState, Session};
pub use socket::FrameSender;
