//! Endpoint wrappers
//!
//! Thin typed helpers over [`RestClient::request`].

use crate::client::{RestClient, NO_DATA};
use crate::error::RestResult;
use blackbox_core::{GuildList, Message, User};
use reqwest::Method;
use serde::Serialize;

/// Query for message history
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MessageQuery {
    /// Only messages older than this epoch-milliseconds timestamp; 0 for the newest
    pub time: i64,
    pub limit: u32,
}

/// Body for sending a message
#[derive(Debug, Clone, Serialize)]
pub struct SendMessage<'a> {
    pub content: &'a str,
}

impl RestClient {
    /// Guilds and DMs the current user belongs to
    pub async fn get_guilds(&self) -> RestResult<GuildList> {
        self.request(Method::GET, "/users/self/guilds", NO_DATA).await
    }

    /// The current user's friends
    pub async fn get_friends(&self) -> RestResult<Vec<User>> {
        self.request(Method::GET, "/users/self/friends", NO_DATA).await
    }

    /// Message history of a guild or DM
    pub async fn get_messages(&self, guild_id: &str, time: i64, limit: u32) -> RestResult<Vec<Message>> {
        let query = MessageQuery { time, limit };
        self.request(Method::GET, &format!("/guilds/{guild_id}/msgs"), Some(&query))
            .await
    }

    /// The current user, including private fields
    pub async fn get_self(&self) -> RestResult<User> {
        self.request(Method::GET, "/users/self", NO_DATA).await
    }

    /// Another user's public profile
    pub async fn get_user(&self, user_id: &str) -> RestResult<User> {
        self.request(Method::GET, &format!("/users/{user_id}"), NO_DATA)
            .await
    }

    /// Post a message to a guild or DM
    pub async fn send_message(&self, guild_id: &str, content: &str) -> RestResult<()> {
        let body = SendMessage { content };
        self.send(Method::POST, &format!("/guilds/{guild_id}/msgs"), Some(&body))
            .await?;
        Ok(())
    }
}
