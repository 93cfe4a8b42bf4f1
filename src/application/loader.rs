//! # Definition Loader
//!
//! Builds the `CommandIndex` from two static sources: code definitions
//! (`fn() -> Option<CommandDescriptor>`) and YAML manifests found under the
//! commands directory. Manifests carry metadata only; each one names a callback
//! registered in a `CallbackRegistry`.

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::domain::command::{CommandCallback, CommandDescriptor, CommandKind, subcommand_key};
use crate::domain::config::HandlerConfig;
use crate::domain::permissions::{Permission, one_or_many};
use crate::domain::types::OptionSpec;
use crate::strings::logs;

/// Extensions the directory scan accepts.
pub const MANIFEST_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// A code-level definition. `None` means the definition exports nothing usable.
pub type Definition = fn() -> Option<CommandDescriptor>;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to walk {}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid manifest {}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("{}: subcommand '{name}' declares no reference", path.display())]
    MissingReference { path: PathBuf, name: String },
    #[error("{}: no callback registered for handler '{handler}'", path.display())]
    MissingCallback { path: PathBuf, handler: String },
    #[error(
        "{}: handler '{handler}' is a {found} callback but the manifest declares {expected}",
        path.display()
    )]
    CallbackKind {
        path: PathBuf,
        handler: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Callbacks that manifests can bind to, keyed by handler name.
#[derive(Clone, Default)]
pub struct CallbackRegistry {
    callbacks: HashMap<String, CommandCallback>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, handler: impl Into<String>, callback: CommandCallback) -> Self {
        self.callbacks.insert(handler.into(), callback);
        self
    }

    pub fn get(&self, handler: &str) -> Option<&CommandCallback> {
        self.callbacks.get(handler)
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

/// Top-level commands keyed by name, subcommands keyed by `reference name`.
#[derive(Debug, Clone, Default)]
pub struct CommandIndex {
    commands: BTreeMap<String, CommandDescriptor>,
    subcommands: BTreeMap<String, CommandDescriptor>,
}

impl CommandIndex {
    pub fn get(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.get(name)
    }

    pub fn subcommand(&self, reference: &str, name: &str) -> Option<&CommandDescriptor> {
        self.subcommands.get(&subcommand_key(reference, name))
    }

    pub fn commands(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.commands.values()
    }

    pub fn subcommands(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.subcommands.values()
    }

    /// Top-level commands plus subcommands.
    pub fn len(&self) -> usize {
        self.commands.len() + self.subcommands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum ManifestType {
    ChatInput,
    Message,
    User,
    Subcommand,
}

impl ManifestType {
    fn label(&self) -> &'static str {
        match self {
            ManifestType::ChatInput => "CHAT_INPUT",
            ManifestType::Message => "MESSAGE",
            ManifestType::User => "USER",
            ManifestType::Subcommand => "SUBCOMMAND",
        }
    }
}

#[derive(Debug, Deserialize)]
struct Manifest {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(rename = "type")]
    kind: ManifestType,
    /// Callback key; defaults to `name`, or `reference/name` for subcommands.
    #[serde(default)]
    handler: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    permissions: Vec<Permission>,
    #[serde(default)]
    devs_only: bool,
    #[serde(default)]
    test_only: Option<bool>,
    #[serde(default)]
    has_sub: bool,
    #[serde(default)]
    reference: Option<String>,
    #[serde(default)]
    options: Vec<OptionSpec>,
}

impl Manifest {
    fn into_descriptor(
        self,
        path: &Path,
        callbacks: &CallbackRegistry,
    ) -> Result<CommandDescriptor, LoadError> {
        if self.kind == ManifestType::Subcommand && self.reference.is_none() {
            return Err(LoadError::MissingReference {
                path: path.to_path_buf(),
                name: self.name,
            });
        }

        let handler = match (&self.handler, &self.reference) {
            (Some(h), _) => h.clone(),
            (None, Some(r)) if self.kind == ManifestType::Subcommand => {
                format!("{r}/{}", self.name)
            }
            (None, _) => self.name.clone(),
        };

        let callback = callbacks
            .get(&handler)
            .cloned()
            .ok_or_else(|| LoadError::MissingCallback {
                path: path.to_path_buf(),
                handler: handler.clone(),
            })?;

        let matches = matches!(
            (self.kind, &callback),
            (ManifestType::ChatInput, CommandCallback::ChatInput(_))
                | (ManifestType::Message, CommandCallback::Message(_))
                | (ManifestType::User, CommandCallback::User(_))
                | (ManifestType::Subcommand, CommandCallback::Subcommand(_))
        );
        if !matches {
            return Err(LoadError::CallbackKind {
                path: path.to_path_buf(),
                handler,
                expected: self.kind.label(),
                found: callback.shape(),
            });
        }

        let mut descriptor =
            CommandDescriptor::from_callback(self.name, self.description, self.reference, callback);
        descriptor.permissions = self.permissions;
        descriptor.devs_only = self.devs_only;
        descriptor.test_only = self.test_only;
        if let CommandKind::ChatInput { options, has_sub, .. } = &mut descriptor.kind {
            *options = self.options;
            *has_sub = self.has_sub;
        }
        Ok(descriptor)
    }
}

/// A document is usable when it is a mapping declaring at least `name` and `type`.
fn is_usable(value: &serde_yaml::Value) -> bool {
    match value {
        serde_yaml::Value::Mapping(m) => m.get("name").is_some() && m.get("type").is_some(),
        _ => false,
    }
}

pub struct CommandLoader {
    default_test_only: bool,
    index: CommandIndex,
}

impl CommandLoader {
    pub fn new(default_test_only: bool) -> Self {
        Self {
            default_test_only,
            index: CommandIndex::default(),
        }
    }

    /// Indexes one descriptor. A colliding key replaces the earlier entry.
    pub fn insert(&mut self, mut descriptor: CommandDescriptor) {
        if let Some(reference) = descriptor.reference() {
            let key = subcommand_key(reference, &descriptor.name);
            self.index.subcommands.insert(key, descriptor);
        } else {
            if descriptor.test_only.is_none() {
                descriptor.test_only = Some(self.default_test_only);
            }
            self.index.commands.insert(descriptor.name.clone(), descriptor);
        }
    }

    /// Returns how many definitions produced a descriptor.
    pub fn load_definitions(&mut self, definitions: &[Definition]) -> usize {
        let mut loaded = 0;
        for definition in definitions {
            if let Some(descriptor) = definition() {
                self.insert(descriptor);
                loaded += 1;
            }
        }
        loaded
    }

    /// Scans `dir` recursively in file-name order. The first failing file aborts the scan.
    pub fn load_dir(
        &mut self,
        dir: &Path,
        callbacks: &CallbackRegistry,
    ) -> Result<usize, LoadError> {
        let mut loaded = 0;
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|source| LoadError::Walk {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() || !has_manifest_extension(path) {
                continue;
            }

            let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            if content.trim().is_empty() {
                continue;
            }

            let manifest_err = |source| LoadError::Manifest {
                path: path.to_path_buf(),
                source,
            };
            let value: serde_yaml::Value = serde_yaml::from_str(&content).map_err(manifest_err)?;
            if !is_usable(&value) {
                tracing::debug!(
                    tag = logs::TAG_COMMANDS,
                    "Skipping {}: no command definition",
                    path.display()
                );
                continue;
            }
            let manifest: Manifest = serde_yaml::from_value(value).map_err(manifest_err)?;

            let descriptor = manifest.into_descriptor(path, callbacks)?;
            self.insert(descriptor);
            loaded += 1;
        }
        Ok(loaded)
    }

    /// Finishes loading and logs the summary line.
    pub fn finish(self) -> CommandIndex {
        tracing::info!(tag = logs::TAG_COMMANDS, "{}", logs::commands_loaded(self.index.len()));
        self.index
    }
}

fn has_manifest_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| MANIFEST_EXTENSIONS.contains(&e))
}

/// Loads commands for a handler: code definitions, then prebuilt descriptors, then
/// the directory.
///
/// Returns `None` when there is nothing to load, the directory is missing, or any
/// file fails; the failure is logged and the host keeps running.
pub fn load_commands(
    config: &HandlerConfig,
    definitions: &[Definition],
    descriptors: Vec<CommandDescriptor>,
    callbacks: &CallbackRegistry,
) -> Option<CommandIndex> {
    if config.commands_dir.is_none() && definitions.is_empty() && descriptors.is_empty() {
        return None;
    }

    if let Some(dir) = &config.commands_dir
        && !dir.exists()
    {
        tracing::error!(
            tag = logs::TAG_COMMANDS,
            "{}",
            logs::directory_missing(&dir.display().to_string())
        );
        return None;
    }

    let mut loader = CommandLoader::new(config.test_only);
    loader.load_definitions(definitions);
    for descriptor in descriptors {
        loader.insert(descriptor);
    }

    if let Some(dir) = &config.commands_dir
        && let Err(e) = loader.load_dir(dir, callbacks)
    {
        tracing::error!(
            tag = logs::TAG_COMMANDS,
            error = ?e,
            "{} {}",
            logs::COMMANDS_LOAD_FAILED,
            e
        );
        return None;
    }

    Some(loader.finish())
}
