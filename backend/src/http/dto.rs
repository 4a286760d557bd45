//! Data Transfer Objects for the HTTP API.
//!
//! The graph itself is served as [`QueriesGraph`]; the types here cover the
//! per-point and tooltip endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use crate::models::{ChartSeries, QueriesGraph, TimeUnit};
use crate::models::MergedPoint;
use crate::services::LabelAnchor;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// `loading`, `ready` or `failed`
    pub graph: String,
    /// Number of refreshes published so far
    pub generation: u64,
    /// When the graph was last refreshed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refreshed_at: Option<DateTime<Utc>>,
    /// Message of the last failed refresh
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

/// One plotted bucket with its blocked share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointDto {
    /// Bucket start, milliseconds since the UNIX epoch
    pub timestamp: i64,
    pub total: u64,
    pub blocked: u64,
    /// One decimal place, e.g. `"25.0"`
    pub blocked_percentage: String,
}

impl From<MergedPoint> for PointDto {
    fn from(point: MergedPoint) -> Self {
        Self {
            timestamp: point.timestamp.timestamp_millis(),
            total: point.total,
            blocked: point.blocked,
            blocked_percentage: point.blocked_percentage_label(),
        }
    }
}

/// Response for the points endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointsResponse {
    pub loading: bool,
    pub points: Vec<PointDto>,
    /// Number of points
    pub total: usize,
    /// Sum of the total dataset over all points
    pub total_queries: u64,
    /// Sum of the blocked dataset over all points
    pub blocked_queries: u64,
}

/// Tooltip body lines for a single point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointLabelsResponse {
    pub index: usize,
    pub lines: Vec<String>,
}

/// Query parameters for the tooltip endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TooltipQuery {
    /// `H:MM` or `HH:MM`
    pub label: String,
    /// Whether the label marks the start (default) or the middle of the bucket
    #[serde(default)]
    pub anchor: LabelAnchor,
}

/// Tooltip title response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TooltipResponse {
    pub title: String,
}

/// Query parameters for the bounded range endpoint (UNIX seconds).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeQuery {
    pub from: i64,
    pub until: i64,
    /// Display name of the range, e.g. "Last 7 Days"
    #[serde(default)]
    pub name: Option<String>,
}
