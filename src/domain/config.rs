//! # Configuration
//!
//! Manages the loading and parsing of the handler's configuration file (`config.yaml`).
//! Defines the structs for handler settings, database options, and logging.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::strings::Language;

/// Main handler configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Deserialize, Clone)]
pub struct HandlerConfig {
    /// Passed through to the platform adapter; the handler never reads it.
    #[serde(default)]
    pub bot_token: Option<String>,
    #[serde(default)]
    pub commands_dir: Option<PathBuf>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub test_servers: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub bot_owners: Vec<String>,
    /// Default for commands that leave `test_only` unset.
    #[serde(default)]
    pub test_only: bool,
    #[serde(default = "default_true")]
    pub show_warns: bool,
    /// Log the feature summary line.
    #[serde(default = "default_true")]
    pub log: bool,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            commands_dir: None,
            test_servers: Vec::new(),
            bot_owners: Vec::new(),
            test_only: false,
            show_warns: true,
            log: true,
            language: Language::default(),
            database: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl HandlerConfig {
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse handler config")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub uri: String,
    #[serde(default)]
    pub options: DatabaseOptions,
}

/// Session options handed to the document store.
///
/// Every field has a default; values present in the config override them one by one.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DatabaseOptions {
    #[serde(default = "default_true")]
    pub keep_alive: bool,
    #[serde(default)]
    pub connect_timeout_ms: Option<u64>,
    #[serde(default)]
    pub app_name: Option<String>,
    /// Driver-specific settings passed through untouched.
    #[serde(default)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for DatabaseOptions {
    fn default() -> Self {
        Self {
            keep_alive: true,
            connect_timeout_ms: None,
            app_name: None,
            extra: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_dir")]
    pub directory: String,
    #[serde(default = "default_log_file")]
    pub file: String,
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: default_log_dir(),
            file: default_log_file(),
            filter: default_filter(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_dir() -> String {
    "data".to_string()
}

fn default_log_file() -> String {
    "session.log".to_string()
}

fn default_filter() -> String {
    "info".to_string()
}

/// Accepts `key: "id"` as well as `key: ["id", ...]`.
fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    })
}
