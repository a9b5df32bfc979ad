use std::sync::Arc;

use bizdesk_core::lifecycle::{EntityStore, LifecycleEngine};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState<S>>`.
///
/// Generic over the entity store so the same router runs on PostgreSQL in
/// production and on [`MemoryStore`](bizdesk_core::lifecycle::MemoryStore)
/// in tests. Cloning only bumps reference counts.
pub struct AppState<S: EntityStore> {
    /// Lifecycle engine over the entity store.
    pub engine: Arc<LifecycleEngine<S>>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl<S: EntityStore> AppState<S> {
    pub fn new(store: S, config: ServerConfig) -> Self {
        Self {
            engine: Arc::new(LifecycleEngine::new(store)),
            config: Arc::new(config),
        }
    }
}

impl<S: EntityStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            config: Arc::clone(&self.config),
        }
    }
}
