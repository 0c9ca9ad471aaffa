//! Example bot
//!
//! Text commands, answered in the guild or DM they were posted in:
//! - `ping`: replies `pong`
//! - `pong`: posts `respond` to every guild the account is in
//! - `data`: replies with the author's profile
//! - `last_msg`: echoes the five newest messages
//!
//! Run with:
//! ```bash
//! BLACKBOX_TOKEN=... cargo run -p blackbox-gateway --bin blackbox-bot
//! ```
//!
//! Configuration is loaded from environment variables.

use anyhow::Context as _;
use blackbox_common::{try_init_tracing_with_config, ClientConfig, TracingConfig};
use blackbox_core::Message;
use blackbox_gateway::{Client, Context};
use std::sync::{Arc, OnceLock};
use tracing::{error, info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run(config).await {
        error!(error = %format!("{e:#}"), "Bot stopped");
        std::process::exit(1);
    }
}

async fn run(config: ClientConfig) -> anyhow::Result<()> {
    info!(env = ?config.app.env, endpoint = %config.endpoint.host, "Configuration loaded");

    let mut client = Client::new(config)?;

    let self_id = Arc::new(OnceLock::new());

    let ready_id = Arc::clone(&self_id);
    client.on::<(), _, _>("ready", move |ctx: Context, ()| {
        let ready_id = Arc::clone(&ready_id);
        async move {
            let me = ctx.get_self().await.context("Failed to fetch current user")?;
            let guilds = ctx.get_guilds().await.context("Failed to fetch guilds")?;
            info!(
                user = %me.name,
                guilds = guilds.guilds.len(),
                dms = guilds.dms.len(),
                unread = guilds.unread_total(),
                "Bot is ready"
            );
            let _ = ready_id.set(me.id);
            Ok(())
        }
    })?;

    client.on::<Message, _, _>("on_message_create", move |ctx: Context, message| {
        let self_id = Arc::clone(&self_id);
        async move {
            if self_id.get().is_some_and(|id| *id == message.author.id) {
                return Ok(());
            }
            match command(&ctx, &message).await {
                Ok(()) => Ok(()),
                Err(e) if e.status().is_some() => {
                    warn!(guild_id = %message.guild_id, error = %e, "Command rejected");
                    Ok(())
                }
                Err(e) => Err(e.into()),
            }
        }
    })?;

    if let Some(mut faults) = client.take_faults() {
        tokio::spawn(async move {
            while let Some(fault) = faults.recv().await {
                warn!(task = %fault.name, task_id = %fault.id, "{fault}");
            }
        });
    }

    client.run().await?;
    info!("Gateway connection closed");
    Ok(())
}

async fn command(ctx: &Context, message: &Message) -> blackbox_rest::RestResult<()> {
    match message.content.trim() {
        "ping" => {
            ctx.reply(message, "pong").await?;
            info!(guild_id = %message.guild_id, "Answered ping");
        }
        "pong" => {
            let list = ctx.get_guilds().await?;
            for guild in &list.guilds {
                ctx.send_message(&guild.id, "respond").await?;
            }
        }
        "data" => {
            let user = ctx.get_user(&message.author.id).await?;
            let text = format!(
                "username: {}, id: {}, image_id: {}",
                user.name, user.id, user.image_id
            );
            ctx.reply(message, &text).await?;
        }
        "last_msg" => {
            let recent = ctx.get_messages(&message.guild_id, 0, 5).await?;
            for msg in &recent {
                let text = format!("last msg: {} by {}", msg.preview(200), msg.author.name);
                ctx.reply(message, &text).await?;
            }
        }
        _ => {}
    }
    Ok(())
}
