//! Application state.

use std::sync::Arc;

use record_store::RecordStore;

use crate::config::Config;

/// Shared application state.
pub struct AppState<S: RecordStore> {
    /// Server configuration.
    pub config: Config,
    /// Record store, selected at startup.
    pub store: S,
}

impl<S: RecordStore> AppState<S> {
    /// Creates new application state.
    pub fn new(config: Config, store: S) -> Self {
        Self { config, store }
    }
}

/// Type alias for shared state.
pub type SharedState<S> = Arc<AppState<S>>;

/// Creates shared state from config and store.
pub fn create_shared_state<S: RecordStore>(config: Config, store: S) -> SharedState<S> {
    Arc::new(AppState::new(config, store))
}
