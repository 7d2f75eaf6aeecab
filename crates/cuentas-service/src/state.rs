//! Application state.

use std::sync::Arc;

use cuentas_store::RocksStore;

use crate::config::ServiceConfig;

/// Application state shared across handlers.
///
/// The store is constructed once at startup and injected into every
/// handler through this state.
#[derive(Clone)]
pub struct AppState {
    /// The storage backend.
    pub store: Arc<RocksStore>,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: Arc<RocksStore>, config: ServiceConfig) -> Self {
        Self { store, config }
    }
}
