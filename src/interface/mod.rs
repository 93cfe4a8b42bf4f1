//! # Interface Layer
//!
//! The commands shipped with the console host. Each one is a plain definition
//! function or a manifest-bound callback; nothing here talks to a platform directly.

pub mod commands;
