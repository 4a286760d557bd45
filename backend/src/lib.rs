//! # query-graph
//!
//! Queries-over-time graph backend for a DNS filtering dashboard.
//!
//! The resolver's statistics endpoint reports query counts in sparse maps
//! keyed by 10-minute bucket timestamps. This crate turns them into an
//! ordered, gap-free chart series (total vs. blocked queries), computes the
//! per-bucket blocked share and the tooltip window titles, and serves the
//! result to the dashboard over a small REST API that refreshes itself on a
//! fixed interval.
//!
//! ## Architecture
//!
//! - [`models`]: payload, series and view types
//! - [`services`]: pure transformations (normalizer, merger, tooltip, graph builder)
//! - [`fetch`]: upstream statistics sources
//! - [`store`]: latest graph shared between poller and handlers
//! - [`poller`]: periodic refresh task
//! - [`config`]: TOML + environment configuration
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Example
//!
//! ```
//! use query_graph::models::HistoryPayload;
//! use query_graph::services::build_graph;
//!
//! let payload = HistoryPayload::from_json(
//!     r#"{"domains_over_time": {"1000": 5, "2000": 8, "3000": 3},
//!         "ads_over_time": {"1000": 1, "2000": 2, "3000": 9}}"#,
//! ).unwrap();
//!
//! let graph = build_graph(&payload, None);
//! assert_eq!(graph.series.total, vec![5, 8]);
//! assert_eq!(graph.series.blocked, vec![1, 2]);
//! ```

pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod poller;
pub mod services;
pub mod store;

#[cfg(feature = "http-server")]
pub mod http;

pub use error::{FetchError, GraphError};
