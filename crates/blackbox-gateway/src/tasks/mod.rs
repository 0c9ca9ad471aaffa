//! Supervised background work
//!
//! Handler invocations and the heartbeat loop run as tokio tasks owned by a
//! [`TaskSupervisor`], which reports their failures and cancels them on shutdown.

mod supervisor;

pub use supervisor::{TaskFault, TaskId, TaskSupervisor};
