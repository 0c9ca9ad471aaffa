//! Event dispatch
//!
//! Turns dispatch frames into supervised handler invocations.

mod router;

pub use router::EventRouter;
