//! # blackbox-core
//!
//! Domain layer containing the entities delivered by the blackbox chat service.
//! Entities are plain data: they are deserialized from camelCase JSON payloads
//! and never mutated afterwards.

pub mod entities;
pub mod error;

// Re-export commonly used types at crate root
pub use entities::{
    hydrate, Attachment, Dm, Guild, GuildList, Invite, Member, Message, Typing, Unread, User,
};
pub use error::DomainError;
