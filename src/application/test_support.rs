//! Shared fixtures for unit tests: a recording platform, an in-memory store, and
//! interaction builders.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex};

use crate::application::handler::Handler;
use crate::domain::command::CommandDescriptor;
use crate::domain::config::{DatabaseOptions, HandlerConfig};
use crate::domain::permissions::{Permission, Permissions};
use crate::domain::traits::{DocumentStore, Platform};
use crate::domain::types::{
    CommandData, Guild, Interaction, InteractionKind, InteractionOption, Member, Message,
    OptionKind, OptionValue, Reply, User,
};

#[derive(Debug, Clone, PartialEq)]
pub enum PlatformCall {
    SetGlobal(Vec<CommandData>),
    FetchGuild(String),
    SetGuild(String, Vec<CommandData>),
    Reply(String, Reply),
}

#[derive(Default)]
pub struct MockPlatform {
    calls: Mutex<Vec<PlatformCall>>,
    missing_guilds: HashSet<String>,
}

impl MockPlatform {
    pub fn with_missing_guild(mut self, id: &str) -> Self {
        self.missing_guilds.insert(id.to_string());
        self
    }

    pub fn calls(&self) -> Vec<PlatformCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn replies(&self) -> Vec<Reply> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                PlatformCall::Reply(_, reply) => Some(reply),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: PlatformCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Platform for MockPlatform {
    async fn set_global_commands(&self, commands: &[CommandData]) -> Result<()> {
        self.record(PlatformCall::SetGlobal(commands.to_vec()));
        Ok(())
    }

    async fn fetch_guild(&self, guild_id: &str) -> Result<Guild> {
        self.record(PlatformCall::FetchGuild(guild_id.to_string()));
        if self.missing_guilds.contains(guild_id) {
            return Err(anyhow!("Unknown Guild"));
        }
        Ok(guild(guild_id))
    }

    async fn set_guild_commands(&self, guild: &Guild, commands: &[CommandData]) -> Result<()> {
        self.record(PlatformCall::SetGuild(guild.id.clone(), commands.to_vec()));
        Ok(())
    }

    async fn reply(&self, interaction: &Interaction, reply: &Reply) -> Result<()> {
        self.record(PlatformCall::Reply(interaction.id.clone(), reply.clone()));
        Ok(())
    }
}

/// Reports a fixed ready state once connected.
pub struct MemoryStore {
    state_after_connect: u8,
    fail: bool,
    state: AtomicU8,
    options: Mutex<Option<DatabaseOptions>>,
}

impl MemoryStore {
    pub fn new(state_after_connect: u8) -> Self {
        Self {
            state_after_connect,
            fail: false,
            state: AtomicU8::new(0),
            options: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(0)
        }
    }

    pub fn last_options(&self) -> Option<DatabaseOptions> {
        self.options.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn connect(&self, _uri: &str, options: &DatabaseOptions) -> Result<()> {
        if self.fail {
            return Err(anyhow!("connection refused"));
        }
        *self.options.lock().unwrap() = Some(options.clone());
        self.state.store(self.state_after_connect, Ordering::SeqCst);
        Ok(())
    }

    fn ready_state(&self) -> u8 {
        self.state.load(Ordering::SeqCst)
    }
}

pub fn build_handler(
    platform: Arc<MockPlatform>,
    commands: Vec<CommandDescriptor>,
) -> Arc<Handler> {
    let mut builder = Handler::builder(platform, HandlerConfig::default());
    for command in commands {
        builder = builder.command(command);
    }
    builder.build()
}

pub fn member(id: &str, granted: &[Permission]) -> Member {
    Member {
        id: id.to_string(),
        display_name: None,
        permissions: Permissions::new(granted.iter().copied()),
    }
}

pub fn guild(id: &str) -> Guild {
    Guild {
        id: id.to_string(),
        name: String::new(),
        me: Member {
            id: "bot".to_string(),
            display_name: None,
            permissions: Permissions::administrator(),
        },
    }
}

pub fn option(name: &str, kind: OptionKind, value: Option<OptionValue>) -> InteractionOption {
    InteractionOption {
        name: name.to_string(),
        kind,
        value,
        options: Vec::new(),
    }
}

pub fn sub_option(name: &str, options: Vec<InteractionOption>) -> InteractionOption {
    InteractionOption {
        name: name.to_string(),
        kind: OptionKind::SubCommand,
        value: None,
        options,
    }
}

pub fn chat_input(command: &str, member: Member, options: Vec<InteractionOption>) -> Interaction {
    Interaction {
        id: format!("i-{command}"),
        command_name: command.to_string(),
        kind: InteractionKind::ChatInput { options },
        member,
        guild: guild("guild"),
    }
}

pub fn message_interaction(command: &str, content: &str) -> Interaction {
    Interaction {
        id: format!("i-{command}"),
        command_name: command.to_string(),
        kind: InteractionKind::Message {
            target: Message {
                id: "m1".to_string(),
                channel_id: "c1".to_string(),
                author: User {
                    id: "7".to_string(),
                    username: "ana".to_string(),
                    bot: false,
                },
                content: content.to_string(),
            },
        },
        member: member("1", &[]),
        guild: guild("guild"),
    }
}
