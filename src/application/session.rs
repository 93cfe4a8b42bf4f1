//! # Session Bootstrap
//!
//! Opens the document-database session and announces its state to listeners.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::domain::config::DatabaseOptions;
use crate::domain::events::{ConnectionState, DatabaseConnected, HandlerEvents};
use crate::domain::traits::DocumentStore;
use crate::strings::logs;

pub async fn connect_database(
    events: &HandlerEvents,
    store: Arc<dyn DocumentStore>,
    uri: &str,
    options: &DatabaseOptions,
) -> Result<ConnectionState> {
    store
        .connect(uri, options)
        .await
        .context("Failed to open database session")?;

    let state = ConnectionState::from_code(store.ready_state());
    tracing::info!(tag = logs::TAG_DATABASE, "{}", logs::database_state(state.label()));

    events.emit_database_connected(&DatabaseConnected {
        connection: store,
        state,
    });
    Ok(state)
}
