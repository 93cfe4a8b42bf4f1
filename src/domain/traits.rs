//! # Domain Traits
//!
//! Abstract interfaces for the external collaborators: the chat platform and the
//! document database. Concrete adapters live in the Infrastructure layer.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::config::DatabaseOptions;
use crate::domain::types::{CommandData, Guild, Interaction, Reply};

/// Abstract interface for the hosted chat platform (application commands + interactions).
#[async_trait]
pub trait Platform: Send + Sync {
    /// Replace the application's global command set.
    async fn set_global_commands(&self, commands: &[CommandData]) -> Result<()>;

    /// Fetch a guild by id.
    async fn fetch_guild(&self, guild_id: &str) -> Result<Guild>;

    /// Replace one guild's command set.
    async fn set_guild_commands(&self, guild: &Guild, commands: &[CommandData]) -> Result<()>;

    /// Reply to an interaction.
    async fn reply(&self, interaction: &Interaction, reply: &Reply) -> Result<()>;
}

/// Abstract interface for a document-database session.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn connect(&self, uri: &str, options: &DatabaseOptions) -> Result<()>;

    /// Driver ready state: 0 disconnected, 1 connected, 2 connecting, 3 disconnecting.
    fn ready_state(&self) -> u8;
}
