//! Gateway protocol definitions
//!
//! Defines the wire envelope, op codes and the payloads of the handshake frames.

mod frame;
mod opcodes;
mod payloads;

pub use frame::{decode, encode, Frame};
pub use opcodes::OpCode;
pub use payloads::{HelloPayload, IdentifyPayload};
