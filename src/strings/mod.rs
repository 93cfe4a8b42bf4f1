//! # Strings Module
//!
//! Centralizes user-facing strings and log lines.
//! Each supported language carries its own message table and permission-name table.

pub mod logs;
pub mod messages;
pub mod permissions;

use serde::Deserialize;

/// Languages with a message and permission-name table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en-US")]
    English,
    #[serde(rename = "pt-BR")]
    Portuguese,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Portuguese];

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en-US",
            Language::Portuguese => "pt-BR",
        }
    }
}
