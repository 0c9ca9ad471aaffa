//! Event handlers
//!
//! Binds async callbacks to event names. The registry is filled before the
//! client runs and is read-only afterwards.

mod error;
mod registry;

pub use error::{HandlerResult, RegistryError};
pub use registry::{EventHandler, HandlerRegistry};
