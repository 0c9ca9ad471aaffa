//! Domain entities - payloads delivered by the gateway and the REST API

mod dm;
mod guild;
mod invite;
mod member;
mod message;
mod typing;
mod user;

pub use dm::Dm;
pub use guild::{Guild, GuildList, Unread};
pub use invite::Invite;
pub use member::Member;
pub use message::{Attachment, Message};
pub use typing::Typing;
pub use user::User;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::DomainError;

/// Build an entity from a JSON payload
///
/// `entity` names the target type in the error when a required field is
/// missing or has the wrong shape.
pub fn hydrate<T: DeserializeOwned>(entity: &'static str, payload: Value) -> Result<T, DomainError> {
    serde_json::from_value(payload).map_err(|source| DomainError::Hydration { entity, source })
}

/// Convert an epoch-milliseconds timestamp from the wire
pub(crate) fn timestamp(millis: i64) -> Result<DateTime<Utc>, DomainError> {
    DateTime::from_timestamp_millis(millis).ok_or(DomainError::InvalidTimestamp(millis))
}
