//! # Handler
//!
//! The host-facing facade. Owns the configuration, the loaded command index, the
//! event registry, and the optional database session; the platform client is shared
//! with the host.

use anyhow::Result;
use std::sync::{Arc, PoisonError, RwLock};

use crate::application::features::{Feature, load_features};
use crate::application::loader::{CallbackRegistry, CommandIndex, Definition, load_commands};
use crate::application::registrar::Registrar;
use crate::application::router::{InteractionRouter, RouteOutcome};
use crate::application::session;
use crate::domain::command::CommandDescriptor;
use crate::domain::config::HandlerConfig;
use crate::domain::events::{ConnectionState, HandlerEvents};
use crate::domain::traits::{DocumentStore, Platform};
use crate::domain::types::{Interaction, Reply};
use crate::strings::Language;
use crate::strings::logs;

pub struct HandlerBuilder {
    platform: Arc<dyn Platform>,
    config: HandlerConfig,
    definitions: Vec<Definition>,
    commands: Vec<CommandDescriptor>,
    callbacks: CallbackRegistry,
    features: Vec<Feature>,
    store: Option<Arc<dyn DocumentStore>>,
}

impl HandlerBuilder {
    pub fn new(platform: Arc<dyn Platform>, config: HandlerConfig) -> Self {
        Self {
            platform,
            config,
            definitions: Vec::new(),
            commands: Vec::new(),
            callbacks: CallbackRegistry::new(),
            features: Vec::new(),
            store: None,
        }
    }

    pub fn definitions(mut self, definitions: &[Definition]) -> Self {
        self.definitions.extend_from_slice(definitions);
        self
    }

    /// Adds an already-built descriptor; indexed after the definitions.
    pub fn command(mut self, descriptor: CommandDescriptor) -> Self {
        self.commands.push(descriptor);
        self
    }

    /// Callbacks that directory manifests bind to.
    pub fn callbacks(mut self, callbacks: CallbackRegistry) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn feature(mut self, feature: Feature) -> Self {
        self.features.push(feature);
        self
    }

    pub fn store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn add_test_servers<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_unique(&mut self.config.test_servers, ids);
        self
    }

    pub fn add_bot_owners<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_unique(&mut self.config.bot_owners, ids);
        self
    }

    /// Loads commands, then runs features against the finished handler.
    pub fn build(self) -> Arc<Handler> {
        let index = load_commands(&self.config, &self.definitions, self.commands, &self.callbacks);

        let handler = Arc::new(Handler {
            platform: self.platform,
            config: self.config,
            events: HandlerEvents::new(),
            router: index.map(|i| InteractionRouter::new(Arc::new(i))),
            registrar: Registrar::new(),
            store: self.store,
            connection: RwLock::new(None),
        });

        if !self.features.is_empty() {
            load_features(&handler, &self.features);
        }
        handler
    }
}

fn extend_unique<I, S>(target: &mut Vec<String>, ids: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    for id in ids {
        let id = id.into();
        if !target.contains(&id) {
            target.push(id);
        }
    }
}

pub struct Handler {
    platform: Arc<dyn Platform>,
    config: HandlerConfig,
    events: HandlerEvents,
    /// `None` when command loading was skipped or failed.
    router: Option<InteractionRouter>,
    registrar: Registrar,
    store: Option<Arc<dyn DocumentStore>>,
    connection: RwLock<Option<Arc<dyn DocumentStore>>>,
}

impl Handler {
    pub fn builder(platform: Arc<dyn Platform>, config: HandlerConfig) -> HandlerBuilder {
        HandlerBuilder::new(platform, config)
    }

    pub fn platform(&self) -> &Arc<dyn Platform> {
        &self.platform
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    pub fn events(&self) -> &HandlerEvents {
        &self.events
    }

    pub fn commands(&self) -> Option<&CommandIndex> {
        self.router.as_ref().map(|r| r.index())
    }

    pub fn test_servers(&self) -> &[String] {
        &self.config.test_servers
    }

    pub fn bot_owners(&self) -> &[String] {
        &self.config.bot_owners
    }

    pub fn test_only(&self) -> bool {
        self.config.test_only
    }

    pub fn show_warns(&self) -> bool {
        self.config.show_warns
    }

    pub fn language(&self) -> Language {
        self.config.language
    }

    /// Replies to an interaction through the platform.
    pub async fn reply(&self, interaction: &Interaction, reply: Reply) -> Result<()> {
        self.platform.reply(interaction, &reply).await
    }

    /// Opens the configured database session with the configured store.
    ///
    /// Returns `Ok(None)` when no database is configured. Listeners registered on
    /// `events()` beforehand receive the `DatabaseConnected` event.
    pub async fn connect_database(&self) -> Result<Option<ConnectionState>> {
        let Some(db) = &self.config.database else {
            return Ok(None);
        };
        let Some(store) = self.store.clone() else {
            if self.config.show_warns {
                tracing::warn!(
                    tag = logs::TAG_DATABASE,
                    "A database URI is configured but no store was provided"
                );
            }
            return Ok(None);
        };

        match session::connect_database(&self.events, store.clone(), &db.uri, &db.options).await {
            Ok(state) => {
                *self.connection.write().unwrap_or_else(PoisonError::into_inner) = Some(store);
                Ok(Some(state))
            }
            Err(e) => {
                tracing::error!(tag = logs::TAG_DATABASE, error = ?e, "Database connection failed");
                Err(e)
            }
        }
    }

    /// The connected database session, if any.
    pub fn connection(&self) -> Option<Arc<dyn DocumentStore>> {
        self.connection.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn is_db_connected(&self) -> bool {
        self.connection()
            .is_some_and(|c| {
                ConnectionState::from_code(c.ready_state()) == ConnectionState::Connected
            })
    }

    /// Call when the platform reports ready. Registration happens at most once;
    /// returns whether this call performed it.
    pub async fn on_ready(&self) -> bool {
        let Some(router) = &self.router else {
            return false;
        };
        self.registrar
            .register(
                self.platform.as_ref(),
                router.index(),
                &self.config.test_servers,
                self.config.show_warns,
            )
            .await
    }

    /// The interaction listener. Attach it once to the platform's inbound stream.
    pub async fn dispatch(self: &Arc<Self>, interaction: Interaction) -> RouteOutcome {
        match &self.router {
            Some(router) => router.route(self, interaction).await,
            None => RouteOutcome::Ignored,
        }
    }
}
