//! # slcommands
//!
//! A slash-command and context-menu handler for chat platforms:
//! - Domain: descriptors, payloads, permissions, configuration and platform traits
//! - Application: loading, verification, routing, registration, session bootstrap
//! - Infrastructure: console platform, optional Redis store, logging
//! - Interface: the built-in commands
//!
//! Hosts build a [`Handler`] with [`Handler::builder`], call [`Handler::on_ready`]
//! once the platform is ready, and feed every inbound interaction to
//! [`Handler::dispatch`].

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;
pub mod strings;

pub use application::handler::{Handler, HandlerBuilder};
pub use application::loader::{CallbackRegistry, CommandIndex, Definition};
pub use application::router::RouteOutcome;
pub use domain::command::{CommandCallback, CommandDescriptor};
pub use domain::config::HandlerConfig;
pub use domain::traits::{DocumentStore, Platform};
