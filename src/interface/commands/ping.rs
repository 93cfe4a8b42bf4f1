use crate::domain::command::{ChatInputArgs, CommandDescriptor};
use crate::domain::types::Reply;

pub fn definition() -> Option<CommandDescriptor> {
    Some(CommandDescriptor::chat_input(
        "ping",
        "Checks that the bot is responding.",
        |args: ChatInputArgs| async move {
            args.handler
                .reply(&args.interaction, Reply::public("🏓 Pong!"))
                .await
        },
    ))
}
