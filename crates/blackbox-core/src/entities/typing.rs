//! Typing indicator

use serde::{Deserialize, Serialize};

/// A user started typing in a guild or DM
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typing {
    pub user_id: String,
    pub guild_id: String,
}
