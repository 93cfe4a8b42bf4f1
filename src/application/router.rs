//! # Interaction Router
//!
//! Routes incoming interactions to the matching command callback.
//! Verification always runs first, against the top-level descriptor; a chosen
//! subcommand is then dispatched to its own callback when the command declares one.

use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use crate::application::handler::Handler;
use crate::application::loader::CommandIndex;
use crate::application::verifier::{Verification, verify};
use crate::domain::command::{
    CallbackFuture, ChatInputArgs, CommandDescriptor, CommandKind, MessageArgs, SubcommandArgs,
    UserArgs,
};
use crate::domain::events::CommandException;
use crate::domain::options::OptionResolver;
use crate::domain::types::{
    Interaction, InteractionKind, InteractionOption, OptionKind, OptionValue, Reply,
};
use crate::strings::logs;
use crate::strings::messages::{MessageKey, get_message};

/// Name reported for a failing command that has none.
pub const UNKNOWN_COMMAND: &str = "unknown";

/// What the router did with one interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Not a routable interaction, unknown command, or a kind mismatch.
    Ignored,
    Denied,
    SubcommandMissing,
    /// The callback ran to completion.
    Completed { command: String },
    /// The callback failed; a `CommandException` was emitted.
    Failed { command: String },
}

pub struct InteractionRouter {
    index: Arc<CommandIndex>,
}

impl InteractionRouter {
    pub fn new(index: Arc<CommandIndex>) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &CommandIndex {
        &self.index
    }

    pub async fn route(&self, handler: &Arc<Handler>, interaction: Interaction) -> RouteOutcome {
        if !interaction.is_command() && !interaction.is_context_menu() {
            return RouteOutcome::Ignored;
        }

        let Some(command) = self.index.get(&interaction.command_name) else {
            tracing::debug!(
                tag = logs::TAG_ROUTER,
                "No command named '{}'",
                interaction.command_name
            );
            return RouteOutcome::Ignored;
        };

        let verification = verify(
            &command.permissions,
            handler.bot_owners(),
            command.devs_only,
            handler.language(),
            &interaction.member,
            &interaction.guild,
        );
        if let Verification::Denied(reply) = verification {
            send_reply(handler, &interaction, &reply).await;
            return RouteOutcome::Denied;
        }

        tracing::info!(
            tag = logs::TAG_ROUTER,
            "Router dispatching cmd='{}' type={} member='{}'",
            command.name,
            command.type_label(),
            interaction.member.id
        );

        match (&command.kind, &interaction.kind) {
            (
                CommandKind::ChatInput {
                    has_sub, callback, ..
                },
                InteractionKind::ChatInput { options },
            ) => {
                let resolver = OptionResolver::new(options.clone());

                if *has_sub && let Some(sub_name) = resolver.subcommand() {
                    let sub_name = sub_name.to_string();
                    return self
                        .route_subcommand(handler, interaction.clone(), resolver, &sub_name)
                        .await;
                }

                let args = ChatInputArgs {
                    options_array: flatten_options(options),
                    options: resolver,
                    interaction: interaction.clone(),
                    handler: handler.clone(),
                };
                run_callback(handler, command, move || callback(args)).await
            }
            (CommandKind::Message { callback }, InteractionKind::Message { target }) => {
                let args = MessageArgs {
                    target: target.clone(),
                    interaction: interaction.clone(),
                    handler: handler.clone(),
                };
                run_callback(handler, command, move || callback(args)).await
            }
            (CommandKind::User { callback }, InteractionKind::User { target }) => {
                let args = UserArgs {
                    target: target.clone(),
                    interaction: interaction.clone(),
                    handler: handler.clone(),
                };
                run_callback(handler, command, move || callback(args)).await
            }
            _ => {
                tracing::debug!(
                    tag = logs::TAG_ROUTER,
                    "Interaction kind does not match {} command '{}'",
                    command.type_label(),
                    command.name
                );
                RouteOutcome::Ignored
            }
        }
    }

    async fn route_subcommand(
        &self,
        handler: &Arc<Handler>,
        interaction: Interaction,
        options: OptionResolver,
        sub_name: &str,
    ) -> RouteOutcome {
        let found = self.index.subcommand(&interaction.command_name, sub_name);
        let Some((sub, CommandKind::Subcommand { callback, .. })) = found.map(|s| (s, &s.kind))
        else {
            tracing::warn!(
                tag = logs::TAG_ROUTER,
                "{}",
                logs::subcommand_missing(&interaction.command_name, sub_name)
            );
            let reply = Reply::ephemeral(get_message(
                MessageKey::SubcommandMissing,
                handler.language(),
                &[],
            ));
            send_reply(handler, &interaction, &reply).await;
            return RouteOutcome::SubcommandMissing;
        };

        let args = SubcommandArgs {
            options,
            interaction,
            handler: handler.clone(),
        };
        run_callback(handler, sub, move || callback(args)).await
    }
}

/// Positional values in supplied order. A subcommand group or subcommand contributes
/// its name followed by its own values. Options without a value are skipped; `0` and
/// `false` are kept.
pub fn flatten_options(options: &[InteractionOption]) -> Vec<OptionValue> {
    let mut values = Vec::new();
    for option in options {
        match option.kind {
            OptionKind::SubCommand | OptionKind::SubCommandGroup => {
                values.push(OptionValue::String(option.name.clone()));
                values.extend(flatten_options(&option.options));
            }
            _ => values.extend(option.value.clone()),
        }
    }
    values
}

/// Invokes and awaits a callback, turning an error or panic into a `CommandException`.
/// The invocation itself runs inside the unwind guard, so a callback that panics
/// before returning its future is contained too.
async fn run_callback<F>(
    handler: &Arc<Handler>,
    command: &CommandDescriptor,
    call: F,
) -> RouteOutcome
where
    F: FnOnce() -> CallbackFuture,
{
    let name = if command.name.is_empty() {
        UNKNOWN_COMMAND.to_string()
    } else {
        command.name.clone()
    };

    let error = match AssertUnwindSafe(async move { call().await }).catch_unwind().await {
        Ok(Ok(())) => return RouteOutcome::Completed { command: name },
        Ok(Err(e)) => e,
        Err(panic) => {
            let msg = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".to_string());
            anyhow::anyhow!("command panicked: {msg}")
        }
    };

    tracing::debug!(tag = logs::TAG_ROUTER, "Command '{}' failed: {:#}", name, error);
    handler.events().emit_command_exception(&CommandException {
        command: name.clone(),
        error,
    });
    RouteOutcome::Failed { command: name }
}

async fn send_reply(handler: &Arc<Handler>, interaction: &Interaction, reply: &Reply) {
    if let Err(e) = handler.platform().reply(interaction, reply).await {
        tracing::warn!(
            tag = logs::TAG_ROUTER,
            error = ?e,
            "Failed to reply to interaction {}",
            interaction.id
        );
    }
}
