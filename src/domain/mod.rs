//! # Domain Layer
//!
//! Core definitions, types, and traits that define the command-handling domain.
//! Independent of any specific platform SDK, serving as the contract for other layers.

pub mod command;
pub mod config;
pub mod events;
pub mod options;
pub mod permissions;
pub mod traits;
pub mod types;
