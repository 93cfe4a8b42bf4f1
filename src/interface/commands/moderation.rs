//! Callbacks for moderation manifests. The command shapes and permission
//! requirements live in the YAML files; these only do the work.

use anyhow::anyhow;

use crate::domain::command::{ChatInputArgs, CommandCallback};
use crate::domain::types::Reply;

pub const BAN_HANDLER: &str = "ban";

pub fn ban_callback() -> CommandCallback {
    CommandCallback::chat_input(|args: ChatInputArgs| async move {
        let target = args.options.string("user").ok_or_else(|| anyhow!("missing user option"))?;
        let reason = args.options.string("reason").unwrap_or("No reason given");
        tracing::info!(
            guild = %args.interaction.guild.id,
            user = target,
            "Ban requested by {}",
            args.interaction.member.id
        );

        let reply = Reply::public(format!("🔨 <@{target}> was banned. Reason: {reason}"));
        args.handler.reply(&args.interaction, reply).await
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::router::RouteOutcome;
    use crate::application::test_support::{MockPlatform, build_handler, chat_input, member, option};
    use crate::domain::command::CommandDescriptor;
    use crate::domain::permissions::Permission;
    use crate::domain::types::{OptionKind, OptionValue};
    use std::sync::Arc;

    fn ban_command() -> CommandDescriptor {
        CommandDescriptor::from_callback("ban", "Bans a member", None, ban_callback())
            .with_permissions([Permission::BanMembers])
    }

    #[tokio::test]
    async fn test_ban_reply_and_missing_option() {
        let platform = Arc::new(MockPlatform::default());
        let handler = build_handler(platform.clone(), vec![ban_command()]);
        let moderator = member("1", &[Permission::BanMembers]);

        let user = option("user", OptionKind::User, Some(OptionValue::String("55".into())));
        handler.dispatch(chat_input("ban", moderator.clone(), vec![user])).await;
        assert_eq!(platform.replies()[0].content, "🔨 <@55> was banned. Reason: No reason given");

        let outcome = handler.dispatch(chat_input("ban", moderator, vec![])).await;
        assert_eq!(outcome, RouteOutcome::Failed { command: "ban".into() });
    }
}
