//! # Infrastructure Layer
//!
//! Handles interactions with external systems and services.
//! Implements the traits defined in the Domain layer (`Platform`, `DocumentStore`)
//! and installs process-wide logging.

pub mod console;
pub mod logging;
#[cfg(feature = "redis")]
pub mod redis_store;
