//! Message entity - represents a chat message

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{timestamp, User};
use crate::error::DomainError;

/// Message entity
///
/// Used for both guild and direct messages; for a DM the `guild_id` is the
/// DM channel's ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub author: User,
    pub content: String,
    pub guild_id: String,
    /// Creation time in epoch milliseconds
    pub created: i64,
    /// Last edit time in epoch milliseconds
    pub modified: i64,
    pub msg_saved: bool,
    pub request_id: String,
    pub mentions_everyone: bool,
    pub mentions: Vec<User>,
    pub attachments: Option<Vec<Attachment>>,
}

impl Message {
    /// Creation time
    pub fn created_at(&self) -> Result<DateTime<Utc>, DomainError> {
        timestamp(self.created)
    }

    /// Last edit time
    pub fn modified_at(&self) -> Result<DateTime<Utc>, DomainError> {
        timestamp(self.modified)
    }

    /// Check if message has been edited
    #[inline]
    pub fn is_edited(&self) -> bool {
        self.modified > self.created
    }

    /// Check if a user is mentioned, directly or through @everyone
    pub fn mentions_user(&self, user_id: &str) -> bool {
        self.mentions_everyone || self.mentions.iter().any(|u| u.id == user_id)
    }

    /// Attachments, empty when the payload carried `null`
    pub fn attachments(&self) -> &[Attachment] {
        self.attachments.as_deref().unwrap_or_default()
    }

    /// Get a truncated preview of the message (for notifications)
    pub fn preview(&self, max_len: usize) -> &str {
        if self.content.len() <= max_len {
            &self.content
        } else {
            let mut end = max_len;
            while !self.content.is_char_boundary(end) && end > 0 {
                end -= 1;
            }
            &self.content[..end]
        }
    }
}

/// File attached to a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    pub filename: String,
    #[serde(rename = "type")]
    pub content_type: String,
}

impl Attachment {
    /// Check if attachment is an image
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    /// Check if attachment is a video
    pub fn is_video(&self) -> bool {
        self.content_type.starts_with("video/")
    }
}
