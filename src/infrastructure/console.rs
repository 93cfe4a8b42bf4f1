//! # Console Platform Adapter
//!
//! Implements the `Platform` trait over stdio for local runs: every outbound call is
//! written to stdout as one JSON line. Inbound interactions are read by the host loop.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;
use tokio::io::{AsyncWriteExt, Stdout};
use tokio::sync::Mutex;

use crate::domain::traits::Platform;
use crate::domain::types::{CommandData, Guild, Interaction, Member, Reply};

pub struct ConsolePlatform {
    bot: Member,
    out: Mutex<Stdout>,
}

impl ConsolePlatform {
    /// `bot` is the membership reported for every fetched guild.
    pub fn new(bot: Member) -> Self {
        Self {
            bot,
            out: Mutex::new(tokio::io::stdout()),
        }
    }

    async fn emit(&self, value: serde_json::Value) -> Result<()> {
        let mut line = serde_json::to_vec(&value)?;
        line.push(b'\n');
        let mut out = self.out.lock().await;
        out.write_all(&line).await?;
        out.flush().await?;
        Ok(())
    }

    fn now() -> String {
        chrono::Local::now().format("%H:%M:%S").to_string()
    }
}

#[async_trait]
impl Platform for ConsolePlatform {
    async fn set_global_commands(&self, commands: &[CommandData]) -> Result<()> {
        tracing::info!("Setting {} global commands", commands.len());
        self.emit(json!({
            "event": "set_global_commands",
            "at": Self::now(),
            "commands": commands,
        }))
        .await
    }

    async fn fetch_guild(&self, guild_id: &str) -> Result<Guild> {
        Ok(Guild {
            id: guild_id.to_string(),
            name: String::new(),
            me: self.bot.clone(),
        })
    }

    async fn set_guild_commands(&self, guild: &Guild, commands: &[CommandData]) -> Result<()> {
        tracing::info!("Setting {} commands in guild {}", commands.len(), guild.id);
        self.emit(json!({
            "event": "set_guild_commands",
            "at": Self::now(),
            "guild": guild.id,
            "commands": commands,
        }))
        .await
    }

    async fn reply(&self, interaction: &Interaction, reply: &Reply) -> Result<()> {
        tracing::info!("Bot replying to {}: {}", interaction.id, reply.content);
        self.emit(json!({
            "event": "reply",
            "at": Self::now(),
            "interaction": interaction.id,
            "content": reply.content,
            "ephemeral": reply.ephemeral,
        }))
        .await
    }
}
