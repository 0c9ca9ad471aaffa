//! User entity - represents a chat user

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// User entity
///
/// Only `id`, `name` and `imageId` are always present. The private fields are
/// filled in when the payload describes the current user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub image_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<i64>,
}

impl User {
    /// Create a new User with the public fields
    pub fn new(id: impl Into<String>, name: impl Into<String>, image_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_id: image_id.into(),
            email: None,
            flags: None,
            options: None,
            permissions: None,
        }
    }

    /// Check whether the payload carried private account details
    #[inline]
    pub fn is_detailed(&self) -> bool {
        self.email.is_some()
    }

    /// Check a permission bit
    pub fn has_permission(&self, bit: i64) -> bool {
        self.permissions.is_some_and(|p| p & bit == bit)
    }
}
