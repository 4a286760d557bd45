//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // The dashboard is served from another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        .route("/queries-graph", get(handlers::get_queries_graph))
        .route("/queries-graph/points", get(handlers::get_points))
        .route(
            "/queries-graph/points/{index}/labels",
            get(handlers::get_point_labels),
        )
        .route("/queries-graph/tooltip", get(handlers::get_tooltip))
        .route("/queries-graph/range", get(handlers::get_range));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::StaticHistorySource;
    use crate::store::GraphStore;
    use std::sync::Arc;

    #[test]
    fn test_router_creation() {
        let state = AppState::new(GraphStore::new(), Arc::new(StaticHistorySource::empty()));
        let _router = create_router(state);
    }
}
