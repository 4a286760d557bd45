//! query-graph HTTP Server Binary
//!
//! Loads the configuration, starts the background poller against the
//! statistics endpoint and serves the graph API until Ctrl+C.
//!
//! # Usage
//!
//! ```bash
//! UPSTREAM_URL=http://pi.hole:4747 cargo run --bin query-graph-server
//! ```
//!
//! # Environment Variables
//!
//! - `QUERY_GRAPH_CONFIG`: Path to a TOML config file (optional)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `UPSTREAM_URL`, `UPSTREAM_PATH`, `UPSTREAM_TIMEOUT_SECS`: statistics endpoint
//! - `POLL_INTERVAL_SECS`: Refresh interval (default: 600)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use query_graph::config::GraphConfig;
use query_graph::fetch::{HistorySource, HttpHistorySource};
use query_graph::http::{create_router, AppState};
use query_graph::poller::spawn_poller;
use query_graph::store::GraphStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting query-graph server");

    let config = GraphConfig::load()?;
    let upstream = HttpHistorySource::new(&config.upstream)?;
    info!("Statistics endpoint: {}", upstream.url());
    let source: Arc<dyn HistorySource> = Arc::new(upstream);

    let store = GraphStore::new();
    let cancel = CancellationToken::new();
    let poller = spawn_poller(
        Arc::clone(&source),
        store.clone(),
        config.poll.interval(),
        cancel.clone(),
    );

    let app = create_router(AppState::new(store, source));

    let addr: SocketAddr = config.bind_address().parse()?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel.clone()))
        .await?;

    cancel.cancel();
    poller.await?;
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal(cancel: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for Ctrl+C: {}", e);
        // Keep serving; only an explicit cancel stops the server now.
        cancel.cancelled().await;
    }
    info!("Shutdown signal received, stopping");
    cancel.cancel();
}
