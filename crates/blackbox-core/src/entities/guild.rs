//! Guild entity - represents a chat server

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{timestamp, Dm};
use crate::error::DomainError;

/// Unread summary attached to guilds and DMs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unread {
    pub msg_id: String,
    pub count: i64,
    /// Epoch milliseconds of the last read
    pub time: i64,
    pub mentions: i64,
}

impl Unread {
    /// Check if anything is unread
    #[inline]
    pub fn has_unread(&self) -> bool {
        self.count > 0
    }

    /// Time of the last read
    pub fn read_at(&self) -> Result<DateTime<Utc>, DomainError> {
        timestamp(self.time)
    }
}

/// Guild entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guild {
    pub id: String,
    /// Guild payloads never carry this flag; it is false unless set by the caller
    #[serde(default)]
    pub dm: bool,
    pub name: String,
    pub image_id: String,
    pub owner_id: String,
    pub save_chat: bool,
    pub unread: Unread,
}

impl Guild {
    /// Check if a user owns this guild
    pub fn is_owner(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }
}

/// Guilds and DMs the current user belongs to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuildList {
    #[serde(default)]
    pub guilds: Vec<Guild>,
    #[serde(default)]
    pub dms: Vec<Dm>,
}

impl GuildList {
    /// Total number of unread messages across guilds and DMs
    pub fn unread_total(&self) -> i64 {
        self.guilds.iter().map(|g| g.unread.count).sum::<i64>()
            + self.dms.iter().map(|d| d.unread.count).sum::<i64>()
    }
}
