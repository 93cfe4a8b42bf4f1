//! # Redis Store Adapter
//!
//! Implements `DocumentStore` over a `redis` connection manager.
//! Enabled with the `redis` feature.

use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use std::sync::atomic::{AtomicU8, Ordering};
use tokio::sync::RwLock;

use crate::domain::config::DatabaseOptions;
use crate::domain::traits::DocumentStore;

const DISCONNECTED: u8 = 0;
const CONNECTED: u8 = 1;
const CONNECTING: u8 = 2;

#[derive(Default)]
pub struct RedisStore {
    manager: RwLock<Option<ConnectionManager>>,
    state: AtomicU8,
}

impl RedisStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle to the live connection; cheap to clone.
    pub async fn connection(&self) -> Option<ConnectionManager> {
        self.manager.read().await.clone()
    }
}

#[async_trait]
impl DocumentStore for RedisStore {
    async fn connect(&self, uri: &str, options: &DatabaseOptions) -> Result<()> {
        self.state.store(CONNECTING, Ordering::SeqCst);
        // The connection manager reconnects on its own, which covers keep_alive.
        tracing::debug!(keep_alive = options.keep_alive, "Opening redis connection manager");

        let result = async {
            let client = redis::Client::open(uri).context("Invalid redis URI")?;
            client
                .get_connection_manager()
                .await
                .context("Failed to connect to redis")
        }
        .await;

        match result {
            Ok(manager) => {
                *self.manager.write().await = Some(manager);
                self.state.store(CONNECTED, Ordering::SeqCst);
                Ok(())
            }
            Err(e) => {
                self.state.store(DISCONNECTED, Ordering::SeqCst);
                Err(e)
            }
        }
    }

    fn ready_state(&self) -> u8 {
        self.state.load(Ordering::SeqCst)
    }
}
