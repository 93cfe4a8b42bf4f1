//! # Command Handlers
//!
//! Built-in command definitions and the callbacks that directory manifests bind to.
//! - `ping`: liveness check.
//! - `config`: per-guild settings, routed through `config set` / `config get`.
//! - `Inspect Message`, `Whois`: context-menu commands.
//! - `ban`: declared in `data/commands/moderation/ban.yaml`, bound here by key.

pub mod context;
pub mod moderation;
pub mod ping;
pub mod settings;

use crate::application::loader::{CallbackRegistry, Definition};

/// Code-defined commands, in load order.
pub const DEFINITIONS: &[Definition] = &[
    ping::definition,
    settings::definition,
    settings::set_definition,
    settings::get_definition,
    context::inspect_definition,
    context::whois_definition,
];

/// Callbacks available to manifests, keyed by handler name.
pub fn callbacks() -> CallbackRegistry {
    CallbackRegistry::new().register(moderation::BAN_HANDLER, moderation::ban_callback())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_definition_builds() {
        let names: Vec<String> = DEFINITIONS.iter().filter_map(|d| d()).map(|c| c.name).collect();
        assert_eq!(names, vec!["ping", "config", "set", "get", "Inspect Message", "Whois"]);
        assert_eq!(callbacks().len(), 1);
    }

    #[test]
    fn test_shipped_manifests_bind_to_callbacks() {
        use crate::application::loader::CommandLoader;
        use crate::domain::permissions::Permission;

        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/commands");
        let mut loader = CommandLoader::new(false);
        loader.load_definitions(DEFINITIONS);
        loader.load_dir(&dir, &callbacks()).unwrap();
        let index = loader.finish();

        let ban = index.get("ban").unwrap();
        assert_eq!(ban.permissions, vec![Permission::BanMembers]);
        assert_eq!(ban.to_command_data().unwrap().options.len(), 2);
        assert!(index.subcommand("config", "set").is_some());
    }
}
