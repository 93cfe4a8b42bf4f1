//! # Command Descriptors
//!
//! A descriptor defines one invocable command, subcommand, or context-menu action
//! together with its callback. The callback's argument bundle depends on the variant.

use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::application::handler::Handler;
use crate::domain::options::OptionResolver;
use crate::domain::permissions::Permission;
use crate::domain::types::{
    CommandData, CommandType, Interaction, Message, OptionSpec, OptionValue, User,
};

/// Separator between `reference` and `name` in subcommand index keys.
pub const SUBCOMMAND_SEPARATOR: &str = " ";

pub type CallbackFuture = BoxFuture<'static, anyhow::Result<()>>;

pub type ChatInputCallback = Arc<dyn Fn(ChatInputArgs) -> CallbackFuture + Send + Sync>;
pub type MessageCallback = Arc<dyn Fn(MessageArgs) -> CallbackFuture + Send + Sync>;
pub type UserCallback = Arc<dyn Fn(UserArgs) -> CallbackFuture + Send + Sync>;
pub type SubcommandCallback = Arc<dyn Fn(SubcommandArgs) -> CallbackFuture + Send + Sync>;

pub struct ChatInputArgs {
    pub options: OptionResolver,
    /// Positional values, with the chosen subcommand's name in front of its own values.
    pub options_array: Vec<OptionValue>,
    pub interaction: Interaction,
    pub handler: Arc<Handler>,
}

pub struct MessageArgs {
    pub target: Message,
    pub interaction: Interaction,
    pub handler: Arc<Handler>,
}

pub struct UserArgs {
    pub target: User,
    pub interaction: Interaction,
    pub handler: Arc<Handler>,
}

pub struct SubcommandArgs {
    pub options: OptionResolver,
    pub interaction: Interaction,
    pub handler: Arc<Handler>,
}

/// A callback of any shape, as stored in a `CallbackRegistry`.
#[derive(Clone)]
pub enum CommandCallback {
    ChatInput(ChatInputCallback),
    Message(MessageCallback),
    User(UserCallback),
    Subcommand(SubcommandCallback),
}

impl CommandCallback {
    pub fn chat_input<F, Fut>(f: F) -> Self
    where
        F: Fn(ChatInputArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self::ChatInput(Arc::new(move |args: ChatInputArgs| -> CallbackFuture {
            Box::pin(f(args))
        }))
    }

    pub fn message<F, Fut>(f: F) -> Self
    where
        F: Fn(MessageArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self::Message(Arc::new(move |args: MessageArgs| -> CallbackFuture {
            Box::pin(f(args))
        }))
    }

    pub fn user<F, Fut>(f: F) -> Self
    where
        F: Fn(UserArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self::User(Arc::new(move |args: UserArgs| -> CallbackFuture {
            Box::pin(f(args))
        }))
    }

    pub fn subcommand<F, Fut>(f: F) -> Self
    where
        F: Fn(SubcommandArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self::Subcommand(Arc::new(move |args: SubcommandArgs| -> CallbackFuture {
            Box::pin(f(args))
        }))
    }

    pub fn shape(&self) -> &'static str {
        match self {
            CommandCallback::ChatInput(_) => "CHAT_INPUT",
            CommandCallback::Message(_) => "MESSAGE",
            CommandCallback::User(_) => "USER",
            CommandCallback::Subcommand(_) => "SUBCOMMAND",
        }
    }
}

#[derive(Clone)]
pub enum CommandKind {
    ChatInput {
        options: Vec<OptionSpec>,
        has_sub: bool,
        callback: ChatInputCallback,
    },
    Message {
        callback: MessageCallback,
    },
    User {
        callback: UserCallback,
    },
    Subcommand {
        reference: String,
        callback: SubcommandCallback,
    },
}

#[derive(Clone)]
pub struct CommandDescriptor {
    pub name: String,
    pub description: String,
    pub permissions: Vec<Permission>,
    pub devs_only: bool,
    /// Unset means "use the handler-wide default"; the loader fills it in.
    pub test_only: Option<bool>,
    pub kind: CommandKind,
}

impl CommandDescriptor {
    fn with_kind(
        name: impl Into<String>,
        description: impl Into<String>,
        kind: CommandKind,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            permissions: Vec::new(),
            devs_only: false,
            test_only: None,
            kind,
        }
    }

    pub fn from_callback(
        name: impl Into<String>,
        description: impl Into<String>,
        reference: Option<String>,
        callback: CommandCallback,
    ) -> Self {
        let kind = match callback {
            CommandCallback::ChatInput(callback) => CommandKind::ChatInput {
                options: Vec::new(),
                has_sub: false,
                callback,
            },
            CommandCallback::Message(callback) => CommandKind::Message { callback },
            CommandCallback::User(callback) => CommandKind::User { callback },
            CommandCallback::Subcommand(callback) => CommandKind::Subcommand {
                reference: reference.unwrap_or_default(),
                callback,
            },
        };
        Self::with_kind(name, description, kind)
    }

    pub fn chat_input<F, Fut>(name: impl Into<String>, description: impl Into<String>, f: F) -> Self
    where
        F: Fn(ChatInputArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self::from_callback(name, description, None, CommandCallback::chat_input(f))
    }

    pub fn message<F, Fut>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(MessageArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self::from_callback(name, "", None, CommandCallback::message(f))
    }

    pub fn user<F, Fut>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(UserArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self::from_callback(name, "", None, CommandCallback::user(f))
    }

    pub fn subcommand<F, Fut>(reference: impl Into<String>, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(SubcommandArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self::from_callback(name, "", Some(reference.into()), CommandCallback::subcommand(f))
    }

    pub fn with_permissions(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.permissions.extend(permissions);
        self
    }

    pub fn devs_only(mut self) -> Self {
        self.devs_only = true;
        self
    }

    pub fn test_only(mut self, test_only: bool) -> Self {
        self.test_only = Some(test_only);
        self
    }

    /// Adds a declared option; only meaningful for chat-input commands.
    pub fn with_option(mut self, option: OptionSpec) -> Self {
        if let CommandKind::ChatInput { options, .. } = &mut self.kind {
            options.push(option);
        }
        self
    }

    /// Marks a chat-input command as owning a subcommand tree.
    pub fn with_subcommands(mut self) -> Self {
        if let CommandKind::ChatInput { has_sub, .. } = &mut self.kind {
            *has_sub = true;
        }
        self
    }

    pub fn is_subcommand(&self) -> bool {
        matches!(self.kind, CommandKind::Subcommand { .. })
    }

    pub fn reference(&self) -> Option<&str> {
        match &self.kind {
            CommandKind::Subcommand { reference, .. } => Some(reference),
            _ => None,
        }
    }

    /// Effective test-only flag; unset counts as global.
    pub fn is_test_only(&self) -> bool {
        self.test_only.unwrap_or(false)
    }

    pub fn type_label(&self) -> &'static str {
        match self.kind {
            CommandKind::ChatInput { .. } => "CHAT_INPUT",
            CommandKind::Message { .. } => "MESSAGE",
            CommandKind::User { .. } => "USER",
            CommandKind::Subcommand { .. } => "SUBCOMMAND",
        }
    }

    /// Registration payload. Subcommands are registered through their parent's options.
    pub fn to_command_data(&self) -> Option<CommandData> {
        let (kind, options) = match &self.kind {
            CommandKind::ChatInput { options, .. } => (CommandType::ChatInput, options.clone()),
            CommandKind::Message { .. } => (CommandType::Message, Vec::new()),
            CommandKind::User { .. } => (CommandType::User, Vec::new()),
            CommandKind::Subcommand { .. } => return None,
        };
        Some(CommandData {
            name: self.name.clone(),
            description: self.description.clone(),
            kind,
            options,
        })
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("type", &self.type_label())
            .field("reference", &self.reference())
            .field("permissions", &self.permissions)
            .field("devs_only", &self.devs_only)
            .field("test_only", &self.test_only)
            .finish()
    }
}

/// Composite key used by the subcommand index.
pub fn subcommand_key(reference: &str, name: &str) -> String {
    format!("{reference}{SUBCOMMAND_SEPARATOR}{name}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::OptionKind;

    #[test]
    fn test_builders() {
        let cmd = CommandDescriptor::chat_input("ban", "Bans a member", |_| async { Ok(()) })
            .with_permissions([Permission::BanMembers])
            .with_option(OptionSpec::new("user", "Who to ban", OptionKind::User).required())
            .devs_only()
            .test_only(true);

        assert_eq!(cmd.permissions, vec![Permission::BanMembers]);
        assert!(cmd.devs_only);
        assert!(cmd.is_test_only());
        let data = cmd.to_command_data().unwrap();
        assert_eq!(data.kind, CommandType::ChatInput);
        assert_eq!(data.options.len(), 1);
    }

    #[test]
    fn test_subcommand_has_no_registration_payload() {
        let sub = CommandDescriptor::subcommand("config", "set", |_| async { Ok(()) });
        assert!(sub.is_subcommand());
        assert_eq!(sub.reference(), Some("config"));
        assert!(sub.to_command_data().is_none());
        assert_eq!(subcommand_key("config", "set"), "config set");
    }
}
