//! Handler context
//!
//! Every handler receives a [`Context`] holding the shared REST session.

use blackbox_core::{GuildList, Message, User};
use blackbox_rest::{RestClient, RestResult};

/// Shared state passed to every handler invocation
#[derive(Debug, Clone)]
pub struct Context {
    rest: RestClient,
}

impl Context {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    /// The shared REST session
    pub fn rest(&self) -> &RestClient {
        &self.rest
    }

    pub async fn get_guilds(&self) -> RestResult<GuildList> {
        self.rest.get_guilds().await
    }

    pub async fn get_friends(&self) -> RestResult<Vec<User>> {
        self.rest.get_friends().await
    }

    pub async fn get_messages(&self, guild_id: &str, time: i64, limit: u32) -> RestResult<Vec<Message>> {
        self.rest.get_messages(guild_id, time, limit).await
    }

    pub async fn get_self(&self) -> RestResult<User> {
        self.rest.get_self().await
    }

    pub async fn get_user(&self, user_id: &str) -> RestResult<User> {
        self.rest.get_user(user_id).await
    }

    /// Post a message to a guild or DM
    pub async fn send_message(&self, guild_id: &str, content: &str) -> RestResult<()> {
        self.rest.send_message(guild_id, content).await
    }

    /// Reply in the guild or DM a message was posted in
    pub async fn reply(&self, message: &Message, content: &str) -> RestResult<()> {
        self.send_message(&message.guild_id, content).await
    }
}
