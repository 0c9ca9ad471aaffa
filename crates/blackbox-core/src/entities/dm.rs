//! DM entity - a direct-message channel

use serde::{Deserialize, Serialize};

use super::Unread;

/// Direct-message channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dm {
    pub id: String,
    pub name: String,
    pub unread: Unread,
}
