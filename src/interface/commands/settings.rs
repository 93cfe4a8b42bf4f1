//! `config set <key> <value>` and `config get <key>`, stored per guild in memory.

use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::sync::{LazyLock, Mutex};

use crate::domain::command::{ChatInputArgs, CommandDescriptor, SubcommandArgs};
use crate::domain::permissions::Permission;
use crate::domain::types::{OptionKind, OptionSpec, Reply};

const COMMAND: &str = "config";

static SETTINGS: LazyLock<Mutex<HashMap<(String, String), String>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

fn store(guild: &str, key: &str, value: &str) -> Result<()> {
    let mut settings = SETTINGS.lock().map_err(|_| anyhow!("settings store poisoned"))?;
    settings.insert((guild.to_string(), key.to_string()), value.to_string());
    Ok(())
}

fn lookup(guild: &str, key: &str) -> Result<Option<String>> {
    let settings = SETTINGS.lock().map_err(|_| anyhow!("settings store poisoned"))?;
    Ok(settings.get(&(guild.to_string(), key.to_string())).cloned())
}

fn key_option() -> OptionSpec {
    OptionSpec::new("key", "Setting name", OptionKind::String).required()
}

pub fn definition() -> Option<CommandDescriptor> {
    let command = CommandDescriptor::chat_input(
        COMMAND,
        "Reads or changes server settings.",
        // Reached only when no subcommand was chosen.
        |args: ChatInputArgs| async move {
            args.handler
                .reply(&args.interaction, Reply::ephemeral("Use `/config set` or `/config get`."))
                .await
        },
    )
    .with_permissions([Permission::ManageGuild])
    .with_option(
        OptionSpec::new("set", "Changes a setting", OptionKind::SubCommand)
            .with_option(key_option())
            .with_option(OptionSpec::new("value", "New value", OptionKind::String).required()),
    )
    .with_option(
        OptionSpec::new("get", "Shows a setting", OptionKind::SubCommand)
            .with_option(key_option()),
    )
    .with_subcommands();
    Some(command)
}

pub fn set_definition() -> Option<CommandDescriptor> {
    Some(CommandDescriptor::subcommand(COMMAND, "set", |args: SubcommandArgs| async move {
        let key = args.options.string("key").ok_or_else(|| anyhow!("missing key"))?;
        let value = args.options.string("value").ok_or_else(|| anyhow!("missing value"))?;
        store(&args.interaction.guild.id, key, value)?;

        let reply = Reply::ephemeral(format!("✅ `{key}` is now `{value}`."));
        args.handler.reply(&args.interaction, reply).await
    }))
}

pub fn get_definition() -> Option<CommandDescriptor> {
    Some(CommandDescriptor::subcommand(COMMAND, "get", |args: SubcommandArgs| async move {
        let key = args.options.string("key").ok_or_else(|| anyhow!("missing key"))?;
        let content = match lookup(&args.interaction.guild.id, key)? {
            Some(value) => format!("`{key}` = `{value}`"),
            None => format!("`{key}` is not set."),
        };
        args.handler.reply(&args.interaction, Reply::ephemeral(content)).await
    }))
}
