//! # Permission Verifier
//!
//! Decides whether an invocation is blocked and which message the caller sees.
//! Checks run in a fixed order: developer-only gate, caller permissions, bot permissions.

use crate::domain::permissions::Permission;
use crate::domain::types::{Guild, Member, Reply};
use crate::strings::Language;
use crate::strings::messages::{MessageKey, Plural, get_message, quoted_list};
use crate::strings::permissions::permission_name;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    Allowed,
    Denied(Reply),
}

impl Verification {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Verification::Allowed)
    }
}

pub fn verify(
    required: &[Permission],
    owners: &[String],
    devs_only: bool,
    language: Language,
    member: &Member,
    guild: &Guild,
) -> Verification {
    if devs_only && !owners.iter().any(|id| *id == member.id) {
        return Verification::Denied(Reply::ephemeral(get_message(
            MessageKey::DevOnly,
            language,
            &[],
        )));
    }

    if required.is_empty() {
        return Verification::Allowed;
    }

    let bot_missing = missing_names(&guild.me, required, language);
    let caller_missing = missing_names(member, required, language);

    if !caller_missing.is_empty() {
        return Verification::Denied(permissions_reply(
            MessageKey::PermsUser,
            &caller_missing,
            language,
        ));
    }

    if !bot_missing.is_empty() {
        return Verification::Denied(permissions_reply(
            MessageKey::PermsBot,
            &bot_missing,
            language,
        ));
    }

    Verification::Allowed
}

/// Localized names of the permissions `target` lacks.
/// A missing Administrator collapses the list to just that name.
fn missing_names(
    target: &Member,
    required: &[Permission],
    language: Language,
) -> Vec<&'static str> {
    let names: Vec<&'static str> = target
        .permissions
        .missing(required)
        .into_iter()
        .map(|p| permission_name(p, language))
        .collect();

    let admin = permission_name(Permission::Administrator, language);
    if names.contains(&admin) {
        return vec![admin];
    }
    names
}

fn permissions_reply(key: MessageKey, names: &[&str], language: Language) -> Reply {
    let plural = Plural::of(names.len());
    let list = quoted_list(names);
    Reply::ephemeral(get_message(
        key,
        language,
        &[("S", plural.s), ("A", plural.a), ("PERMISSIONS", &list)],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::permissions::Permissions;

    fn member(id: &str, granted: &[Permission]) -> Member {
        Member {
            id: id.to_string(),
            display_name: None,
            permissions: Permissions::new(granted.iter().copied()),
        }
    }

    fn guild(bot: &[Permission]) -> Guild {
        Guild {
            id: "guild".to_string(),
            name: String::new(),
            me: member("bot", bot),
        }
    }

    fn denied(v: Verification) -> Reply {
        match v {
            Verification::Denied(reply) => reply,
            Verification::Allowed => panic!("expected a denial"),
        }
    }

    #[test]
    fn test_devs_only_rejects_non_owner_even_with_admin() {
        let owners = vec!["1".to_string()];
        let caller = member("2", &[Permission::Administrator]);
        let reply = denied(verify(
            &[],
            &owners,
            true,
            Language::English,
            &caller,
            &guild(&[Permission::Administrator]),
        ));
        assert!(reply.ephemeral);
        assert_eq!(reply.content, get_message(MessageKey::DevOnly, Language::English, &[]));
    }

    #[test]
    fn test_devs_only_short_circuits_permission_checks() {
        let caller = member("2", &[]);
        let reply = denied(verify(
            &[Permission::BanMembers],
            &[],
            true,
            Language::Portuguese,
            &caller,
            &guild(&[]),
        ));
        assert!(reply.content.contains("desenvolvedores"));
    }

    #[test]
    fn test_owner_passes_devs_only() {
        let owners = vec!["1".to_string()];
        let caller = member("1", &[]);
        assert!(verify(&[], &owners, true, Language::English, &caller, &guild(&[])).is_allowed());
    }

    #[test]
    fn test_ban_members_example() {
        let caller = member("2", &[Permission::SendMessages]);
        let reply = denied(verify(
            &[Permission::BanMembers],
            &[],
            false,
            Language::English,
            &caller,
            &guild(&[Permission::Administrator]),
        ));
        assert!(reply.ephemeral);
        assert_eq!(
            reply.content,
            "🚫 You need the `Ban Members` permission to use this command."
        );
    }

    #[test]
    fn test_caller_check_precedes_bot_check() {
        let caller = member("2", &[]);
        let reply = denied(verify(
            &[Permission::KickMembers],
            &[],
            false,
            Language::English,
            &caller,
            &guild(&[]),
        ));
        assert!(reply.content.starts_with("🚫 You need"));
    }

    #[test]
    fn test_bot_missing_permissions() {
        let caller = member("2", &[Permission::KickMembers, Permission::BanMembers]);
        let reply = denied(verify(
            &[Permission::KickMembers, Permission::BanMembers],
            &[],
            false,
            Language::English,
            &caller,
            &guild(&[]),
        ));
        assert_eq!(
            reply.content,
            "⚠️ I need the `Kick Members, Ban Members` permissions to run this command."
        );
    }

    #[test]
    fn test_administrator_collapses_list() {
        let caller = member("2", &[]);
        for language in Language::ALL {
            let reply = denied(verify(
                &[Permission::BanMembers, Permission::Administrator, Permission::KickMembers],
                &[],
                false,
                language,
                &caller,
                &guild(&[Permission::Administrator]),
            ));
            let admin = permission_name(Permission::Administrator, language);
            assert!(reply.content.contains(&format!("`{admin}`")), "{}", reply.content);
            assert!(!reply.content.contains(','));
        }
    }

    #[test]
    fn test_administrator_collapses_bot_list() {
        let caller = member("2", &[Permission::Administrator]);
        let bot = guild(&[Permission::KickMembers]);
        for language in Language::ALL {
            let reply = denied(verify(
                &[Permission::BanMembers, Permission::Administrator, Permission::ManageGuild],
                &[],
                false,
                language,
                &caller,
                &bot,
            ));
            let admin = format!("`{}`", permission_name(Permission::Administrator, language));
            let one = Plural::of(1);
            let expected = get_message(
                MessageKey::PermsBot,
                language,
                &[("S", one.s), ("A", one.a), ("PERMISSIONS", &admin)],
            );
            assert!(reply.ephemeral);
            assert_eq!(reply.content, expected);
        }
        assert_eq!(
            denied(verify(
                &[Permission::Administrator, Permission::BanMembers],
                &[],
                false,
                Language::English,
                &caller,
                &bot,
            ))
            .content,
            "⚠️ I need the `Administrator` permission to run this command."
        );
    }

    #[test]
    fn test_pluralization_per_language() {
        let caller = member("2", &[]);
        let one = [Permission::BanMembers];
        let two = [Permission::BanMembers, Permission::KickMembers];
        let g = guild(&[Permission::Administrator]);

        let en_one = denied(verify(&one, &[], false, Language::English, &caller, &g)).content;
        let en_two = denied(verify(&two, &[], false, Language::English, &caller, &g)).content;
        assert!(en_one.contains("permission to"));
        assert!(en_two.contains("permissions to"));

        let pt_one = denied(verify(&one, &[], false, Language::Portuguese, &caller, &g)).content;
        let pt_two = denied(verify(&two, &[], false, Language::Portuguese, &caller, &g)).content;
        assert!(pt_one.contains("da permissão `Banir Membros`"));
        assert!(pt_two.contains("das permissões `Banir Membros, Expulsar Membros`"));
    }

    #[test]
    fn test_no_requirements_allows() {
        let caller = member("2", &[]);
        assert!(verify(&[], &[], false, Language::English, &caller, &guild(&[])).is_allowed());
    }
}
