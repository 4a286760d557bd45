//! HTTP server module.
//!
//! Exposes the latest queries graph, per-point tooltip lines and on-demand
//! bounded ranges to the dashboard.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                              │
//! │  - Query parsing and validation                          │
//! │  - JSON serialization, CORS, compression, error mapping  │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  GraphStore (latest view)  /  HistorySource (ranges)     │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (normalizer, merger, tooltip)             │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
