//! Right-click commands on messages and users.

use crate::domain::command::{CommandDescriptor, MessageArgs, UserArgs};
use crate::domain::types::Reply;

const PREVIEW_CHARS: usize = 80;

pub fn inspect_definition() -> Option<CommandDescriptor> {
    Some(CommandDescriptor::message("Inspect Message", |args: MessageArgs| async move {
        let target = &args.target;
        let mut preview: String = target.content.chars().take(PREVIEW_CHARS).collect();
        if target.content.chars().count() > PREVIEW_CHARS {
            preview.push('…');
        }
        let content = format!(
            "Message `{}` by **{}** in <#{}>\n> {}",
            target.id, target.author.username, target.channel_id, preview
        );
        args.handler.reply(&args.interaction, Reply::ephemeral(content)).await
    }))
}

pub fn whois_definition() -> Option<CommandDescriptor> {
    Some(CommandDescriptor::user("Whois", |args: UserArgs| async move {
        let kind = if args.target.bot { "bot" } else { "user" };
        let content = format!("**{}** (`{}`) is a {kind}.", args.target.username, args.target.id);
        args.handler.reply(&args.interaction, Reply::ephemeral(content)).await
    }))
}
