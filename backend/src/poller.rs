//! Background refresh of the queries graph.
//!
//! One task per process fetches the rolling window on a fixed interval,
//! transforms it and publishes the result to the [`GraphStore`]. Ticks missed
//! while a slow fetch is running are skipped rather than queued, so the next
//! fetch always reflects the newest data.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::error::GraphError;
use crate::fetch::HistorySource;
use crate::models::GraphResult;
use crate::services::build_graph;
use crate::store::GraphStore;

/// Fetch once, transform, publish. Returns the new store generation.
///
/// A failed fetch is published as well, so readers drop back to the loading
/// view instead of showing stale or partial data.
pub async fn refresh_once(source: &dyn HistorySource, store: &GraphStore) -> GraphResult<u64> {
    match source.fetch(None).await {
        Ok(payload) => {
            let graph = build_graph(&payload, None);
            let points = graph.series.len();
            let generation = store.publish_ready(graph);
            debug!("graph refreshed: {} points (generation {})", points, generation);
            Ok(generation)
        }
        Err(e) => {
            warn!("refresh from {} failed: {}", source.describe(), e);
            store.publish_failure(e.to_string());
            Err(GraphError::Fetch(e))
        }
    }
}

/// Spawn the refresh loop. It runs immediately, then every `interval`, until
/// `cancel` fires; an in-flight fetch is abandoned on cancellation.
pub fn spawn_poller(
    source: Arc<dyn HistorySource>,
    store: GraphStore,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "polling {} every {}s",
            source.describe(),
            interval.as_secs_f64()
        );
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }
            tokio::select! {
                _ = cancel.cancelled() => break,
                // Failures are already logged and published.
                _ = refresh_once(source.as_ref(), &store) => {}
            }
        }

        info!("poller for {} stopped", source.describe());
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::StaticHistorySource;
    use crate::models::{HistoryItem, HistoryPayload};
    use crate::store::GraphState;

    fn payload() -> HistoryPayload {
        HistoryPayload::Items(vec![
            HistoryItem { timestamp: 1000, total_queries: 5, blocked_queries: 1 },
            HistoryItem { timestamp: 2000, total_queries: 8, blocked_queries: 2 },
        ])
    }

    #[tokio::test]
    async fn test_refresh_once_publishes_ready() {
        let source = StaticHistorySource::new(payload());
        let store = GraphStore::new();
        assert_eq!(refresh_once(&source, &store).await.unwrap(), 1);

        let view = store.view();
        assert!(!view.loading);
        // rolling window: newest bucket dropped
        assert_eq!(view.series.total, vec![5]);
    }

    #[tokio::test]
    async fn test_refresh_once_publishes_failure() {
        let source = StaticHistorySource::empty();
        let store = GraphStore::new();
        let err = refresh_once(&source, &store).await.unwrap_err();
        assert!(matches!(err, GraphError::Fetch(_)));
        assert!(matches!(store.snapshot().state, GraphState::Failed { .. }));
        assert!(store.view().loading);
    }
}
