//! # Handler Events
//!
//! Typed extension points for host code: database connectivity and command failures.
//! Listeners subscribe with `on_*`/`once_*` and can be removed with `off`.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::traits::DocumentStore;

/// Connectivity of a database session, derived from the driver's numeric ready state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
    Connecting,
    Disconnecting,
    Unknown,
}

impl ConnectionState {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => ConnectionState::Disconnected,
            1 => ConnectionState::Connected,
            2 => ConnectionState::Connecting,
            3 => ConnectionState::Disconnecting,
            _ => ConnectionState::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "Disconnected",
            ConnectionState::Connected => "Connected",
            ConnectionState::Connecting => "Connecting",
            ConnectionState::Disconnecting => "Disconnecting",
            ConnectionState::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone)]
pub struct DatabaseConnected {
    pub connection: Arc<dyn DocumentStore>,
    pub state: ConnectionState,
}

#[derive(Debug)]
pub struct CommandException {
    pub command: String,
    pub error: anyhow::Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Entry<T> {
    id: ListenerId,
    once: bool,
    listener: Listener<T>,
}

struct Listeners<T> {
    entries: Mutex<Vec<Entry<T>>>,
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }
}

impl<T> Listeners<T> {
    fn add(&self, id: ListenerId, once: bool, listener: Listener<T>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(Entry { id, once, listener });
        }
    }

    fn remove(&self, id: ListenerId) -> bool {
        let Ok(mut entries) = self.entries.lock() else {
            return false;
        };
        let before = entries.len();
        entries.retain(|e| e.id != id);
        entries.len() != before
    }

    fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    /// Calls listeners in registration order. The lock is released before any listener runs.
    fn emit(&self, payload: &T) -> usize {
        let snapshot: Vec<Listener<T>> = match self.entries.lock() {
            Ok(mut entries) => {
                let listeners = entries.iter().map(|e| e.listener.clone()).collect();
                entries.retain(|e| !e.once);
                listeners
            }
            Err(_) => return 0,
        };
        for listener in &snapshot {
            listener(payload);
        }
        snapshot.len()
    }
}

#[derive(Default)]
pub struct HandlerEvents {
    next_id: AtomicU64,
    database_connected: Listeners<DatabaseConnected>,
    command_exception: Listeners<CommandException>,
}

impl HandlerEvents {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> ListenerId {
        ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    pub fn on_database_connected(
        &self,
        listener: impl Fn(&DatabaseConnected) + Send + Sync + 'static,
    ) -> ListenerId {
        let id = self.next_id();
        self.database_connected.add(id, false, Arc::new(listener));
        id
    }

    pub fn once_database_connected(
        &self,
        listener: impl Fn(&DatabaseConnected) + Send + Sync + 'static,
    ) -> ListenerId {
        let id = self.next_id();
        self.database_connected.add(id, true, Arc::new(listener));
        id
    }

    pub fn on_command_exception(
        &self,
        listener: impl Fn(&CommandException) + Send + Sync + 'static,
    ) -> ListenerId {
        let id = self.next_id();
        self.command_exception.add(id, false, Arc::new(listener));
        id
    }

    pub fn once_command_exception(
        &self,
        listener: impl Fn(&CommandException) + Send + Sync + 'static,
    ) -> ListenerId {
        let id = self.next_id();
        self.command_exception.add(id, true, Arc::new(listener));
        id
    }

    /// Removes a listener. Returns false if it was already gone.
    pub fn off(&self, id: ListenerId) -> bool {
        self.database_connected.remove(id) || self.command_exception.remove(id)
    }

    /// Removes every listener of every event.
    pub fn clear(&self) {
        self.clear_database_connected();
        self.clear_command_exception();
    }

    pub fn clear_database_connected(&self) {
        self.database_connected.clear();
    }

    pub fn clear_command_exception(&self) {
        self.command_exception.clear();
    }

    /// Returns how many listeners were invoked.
    pub fn emit_database_connected(&self, payload: &DatabaseConnected) -> usize {
        self.database_connected.emit(payload)
    }

    pub fn emit_command_exception(&self, payload: &CommandException) -> usize {
        self.command_exception.emit(payload)
    }
}
