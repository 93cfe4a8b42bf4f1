//! # Registrar
//!
//! Pushes the loaded top-level commands to the platform once the client is ready:
//! non-test commands replace the global set, test commands replace each test guild's set.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::application::loader::CommandIndex;
use crate::domain::traits::Platform;
use crate::domain::types::CommandData;
use crate::strings::logs;

/// Commands split by their `test_only` flag.
#[derive(Debug, Default, PartialEq)]
pub struct Partition {
    pub global: Vec<CommandData>,
    pub test: Vec<CommandData>,
}

pub fn partition(index: &CommandIndex) -> Partition {
    let mut out = Partition::default();
    for command in index.commands() {
        let Some(data) = command.to_command_data() else {
            continue;
        };
        if command.is_test_only() {
            out.test.push(data);
        } else {
            out.global.push(data);
        }
    }
    out
}

/// Runs registration at most once.
#[derive(Debug, Default)]
pub struct Registrar {
    done: AtomicBool,
}

impl Registrar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_run(&self) -> bool {
        self.done.load(Ordering::SeqCst)
    }

    /// Returns false without doing anything if registration already ran.
    pub async fn register(
        &self,
        platform: &dyn Platform,
        index: &CommandIndex,
        test_servers: &[String],
        show_warns: bool,
    ) -> bool {
        if self.done.swap(true, Ordering::SeqCst) {
            return false;
        }

        let Partition { global, test } = partition(index);

        if show_warns && !test.is_empty() && test_servers.is_empty() {
            tracing::warn!(
                tag = logs::TAG_COMMANDS,
                "{}",
                logs::test_commands_without_guilds(test.len())
            );
        }

        if let Err(e) = platform.set_global_commands(&global).await {
            tracing::error!(
                tag = logs::TAG_COMMANDS,
                error = ?e,
                "Failed to register global commands"
            );
        }

        let mut registered_guilds = 0;
        for guild_id in test_servers {
            let guild = match platform.fetch_guild(guild_id).await {
                Ok(guild) => guild,
                Err(e) => {
                    tracing::warn!(
                        tag = logs::TAG_COMMANDS,
                        error = ?e,
                        "{}",
                        logs::guild_fetch_failed(guild_id)
                    );
                    continue;
                }
            };
            match platform.set_guild_commands(&guild, &test).await {
                Ok(()) => registered_guilds += 1,
                Err(e) => {
                    tracing::warn!(
                        tag = logs::TAG_COMMANDS,
                        error = ?e,
                        "{}",
                        logs::guild_register_failed(guild_id)
                    );
                }
            }
        }

        tracing::info!(
            tag = logs::TAG_COMMANDS,
            "{}",
            logs::commands_registered(global.len(), test.len(), registered_guilds)
        );
        true
    }
}
