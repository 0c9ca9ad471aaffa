//! Member entity - a user's membership in a guild

use serde::{Deserialize, Serialize};

use super::User;

/// Guild member entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub guild_id: String,
    pub admin: bool,
    pub owner: bool,
    pub user_info: User,
}

impl Member {
    /// Owners and admins may moderate the guild
    #[inline]
    pub fn can_moderate(&self) -> bool {
        self.owner || self.admin
    }

    /// The member's user ID
    pub fn user_id(&self) -> &str {
        &self.user_info.id
    }
}
