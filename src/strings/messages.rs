//! # Messages
//!
//! Localized user-facing replies. Templates use `{NAME}` placeholders:
//! `{PERMISSIONS}` for the rendered list, `{S}` and `{A}` for the plural suffixes.

use crate::strings::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    DevOnly,
    PermsUser,
    PermsBot,
    SubcommandMissing,
}

fn template(key: MessageKey, language: Language) -> &'static str {
    match (language, key) {
        (Language::English, MessageKey::DevOnly) => {
            "🚫 This command is restricted to the bot developers."
        }
        (Language::English, MessageKey::PermsUser) => {
            "🚫 You need the {PERMISSIONS} permission{S} to use this command."
        }
        (Language::English, MessageKey::PermsBot) => {
            "⚠️ I need the {PERMISSIONS} permission{S} to run this command."
        }
        (Language::English, MessageKey::SubcommandMissing) => {
            "❓ This subcommand is not available."
        }
        (Language::Portuguese, MessageKey::DevOnly) => {
            "🚫 Este comando é restrito aos desenvolvedores do bot."
        }
        (Language::Portuguese, MessageKey::PermsUser) => {
            "🚫 Você precisa da{S} permiss{A} {PERMISSIONS} para usar este comando."
        }
        (Language::Portuguese, MessageKey::PermsBot) => {
            "⚠️ Eu preciso da{S} permiss{A} {PERMISSIONS} para executar este comando."
        }
        (Language::Portuguese, MessageKey::SubcommandMissing) => {
            "❓ Este subcomando não está disponível."
        }
    }
}

/// Renders a message, substituting each `(NAME, value)` pair.
pub fn get_message(key: MessageKey, language: Language, vars: &[(&str, &str)]) -> String {
    let mut out = template(key, language).to_string();
    for (name, value) in vars {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}

/// Plural suffixes for a list of `count` items.
pub struct Plural {
    pub s: &'static str,
    pub a: &'static str,
}

impl Plural {
    pub fn of(count: usize) -> Self {
        if count > 1 {
            Self { s: "s", a: "ões" }
        } else {
            Self { s: "", a: "ão" }
        }
    }
}

/// Renders a name list the way replies quote it: `` `A, B` ``.
pub fn quoted_list(names: &[&str]) -> String {
    format!("`{}`", names.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitution() {
        let msg = get_message(
            MessageKey::PermsUser,
            Language::English,
            &[("PERMISSIONS", "`Ban Members`"), ("S", ""), ("A", "ão")],
        );
        assert_eq!(msg, "🚫 You need the `Ban Members` permission to use this command.");
    }

    #[test]
    fn test_every_template_is_fully_substituted() {
        let plural = Plural::of(2);
        for language in Language::ALL {
            for key in [
                MessageKey::DevOnly,
                MessageKey::PermsUser,
                MessageKey::PermsBot,
                MessageKey::SubcommandMissing,
            ] {
                let msg = get_message(
                    key,
                    language,
                    &[("PERMISSIONS", "`x`"), ("S", plural.s), ("A", plural.a)],
                );
                assert!(!msg.contains('{'), "{language:?} {key:?}: {msg}");
            }
        }
    }

    #[test]
    fn test_quoted_list() {
        assert_eq!(quoted_list(&["A", "B"]), "`A, B`");
    }
}
