//! # Application Layer
//!
//! Contains the command-handling logic and its orchestration:
//! loading, verification, routing, registration, and session bootstrap.

pub mod features;
pub mod handler;
pub mod loader;
pub mod registrar;
pub mod router;
pub mod session;
pub mod verifier;

#[cfg(test)]
pub(crate) mod test_support;
