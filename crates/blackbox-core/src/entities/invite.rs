//! Invite entity - represents an invite code to a guild

use serde::{Deserialize, Serialize};

/// Invite entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invite {
    pub guild_id: String,
    pub invite: String,
}

impl Invite {
    /// Invite code as shown to users
    pub fn code(&self) -> &str {
        &self.invite
    }
}
