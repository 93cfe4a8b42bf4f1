//! # Log Lines
//!
//! Log message templates shared by the loader, registrar, and session bootstrap.

pub const TAG_COMMANDS: &str = "COMMANDS";
pub const TAG_FEATURES: &str = "FEATURES";
pub const TAG_DATABASE: &str = "DATABASE";
pub const TAG_ROUTER: &str = "ROUTER";

pub fn commands_loaded(count: usize) -> String {
    format!("Loaded {count} commands.")
}

pub fn features_loaded(count: usize) -> String {
    format!("Loaded {count} features.")
}

pub fn directory_missing(dir: &str) -> String {
    format!("The directory '{dir}' does not exist.")
}

pub const COMMANDS_LOAD_FAILED: &str = "An error occurred while loading commands.";
pub const FEATURES_LOAD_FAILED: &str = "An error occurred while loading features.";

pub fn database_state(state: &str) -> String {
    format!("Database session is {state}.")
}

pub fn guild_fetch_failed(guild_id: &str) -> String {
    format!("Could not fetch test guild {guild_id}; skipping its command registration.")
}

pub fn guild_register_failed(guild_id: &str) -> String {
    format!("Could not register test commands in guild {guild_id}.")
}

pub fn commands_registered(global: usize, test: usize, guilds: usize) -> String {
    format!("Registered {global} global commands and {test} test commands in {guilds} guilds.")
}

pub fn test_commands_without_guilds(count: usize) -> String {
    format!("{count} test-only commands were loaded but no test servers are configured.")
}

pub fn subcommand_missing(command: &str, sub: &str) -> String {
    format!("Command '{command}' has no subcommand named '{sub}'.")
}
