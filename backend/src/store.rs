//! Latest graph view shared between the poller and HTTP handlers.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::models::QueriesGraph;

/// What the store currently holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GraphState {
    /// Nothing fetched yet.
    Loading,
    Ready { graph: QueriesGraph },
    Failed { message: String },
}

impl GraphState {
    pub fn status(&self) -> &'static str {
        match self {
            GraphState::Loading => "loading",
            GraphState::Ready { .. } => "ready",
            GraphState::Failed { .. } => "failed",
        }
    }
}

/// State plus bookkeeping about when it was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub state: GraphState,
    /// Incremented on every publish.
    pub generation: u64,
    pub refreshed_at: Option<DateTime<Utc>>,
}

/// Cloneable handle to the shared graph state.
#[derive(Clone)]
pub struct GraphStore {
    inner: Arc<RwLock<GraphSnapshot>>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(GraphSnapshot {
                state: GraphState::Loading,
                generation: 0,
                refreshed_at: None,
            })),
        }
    }

    /// Replace the state with a freshly built graph.
    pub fn publish_ready(&self, graph: QueriesGraph) -> u64 {
        self.publish(GraphState::Ready { graph })
    }

    /// Record a failed refresh. Readers fall back to the loading view.
    pub fn publish_failure(&self, message: impl Into<String>) -> u64 {
        self.publish(GraphState::Failed {
            message: message.into(),
        })
    }

    fn publish(&self, state: GraphState) -> u64 {
        let mut snapshot = self.inner.write();
        snapshot.state = state;
        snapshot.generation += 1;
        snapshot.refreshed_at = Some(Utc::now());
        snapshot.generation
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        self.inner.read().clone()
    }

    /// The graph to render: the latest one when ready, the loading view otherwise.
    pub fn view(&self) -> QueriesGraph {
        match &self.inner.read().state {
            GraphState::Ready { graph } => graph.clone(),
            GraphState::Loading | GraphState::Failed { .. } => QueriesGraph::loading(),
        }
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}
