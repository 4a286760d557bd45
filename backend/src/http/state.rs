//! Application state for the HTTP server.

use std::sync::Arc;

use crate::fetch::HistorySource;
use crate::store::GraphStore;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Latest graph produced by the poller
    pub store: GraphStore,
    /// Source used for on-demand bounded ranges
    pub source: Arc<dyn HistorySource>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(store: GraphStore, source: Arc<dyn HistorySource>) -> Self {
        Self { store, source }
    }
}
