//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for the actual transformation.

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use chrono::DateTime;

use super::dto::{
    HealthResponse, PointDto, PointLabelsResponse, PointsResponse, QueriesGraph, RangeQuery,
    TooltipQuery, TooltipResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::error::GraphError;
use crate::models::{Dataset, TimeRange};
use crate::services::{build_graph, label_line, title_for};
use crate::store::GraphState;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Reports whether the poller has produced a graph yet.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let snapshot = state.store.snapshot();
    let last_error = match &snapshot.state {
        GraphState::Failed { message } => Some(message.clone()),
        _ => None,
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        graph: snapshot.state.status().to_string(),
        generation: snapshot.generation,
        refreshed_at: snapshot.refreshed_at,
        last_error,
    }))
}

// =============================================================================
// Graph Endpoints
// =============================================================================

/// GET /v1/queries-graph
///
/// Current graph, or the loading view until a refresh has succeeded.
pub async fn get_queries_graph(State(state): State<AppState>) -> HandlerResult<QueriesGraph> {
    Ok(Json(state.store.view()))
}

/// GET /v1/queries-graph/points
///
/// Merged points with the blocked share of each bucket, plus the window sums.
pub async fn get_points(State(state): State<AppState>) -> HandlerResult<PointsResponse> {
    let view = state.store.view();
    let points: Vec<PointDto> = view.series.points().map(Into::into).collect();
    let total = points.len();

    Ok(Json(PointsResponse {
        loading: view.loading,
        total_queries: view.series.values(Dataset::Total).iter().sum(),
        blocked_queries: view.series.values(Dataset::Blocked).iter().sum(),
        points,
        total,
    }))
}

/// GET /v1/queries-graph/points/{index}/labels
///
/// Tooltip body lines (total and blocked) for one point.
pub async fn get_point_labels(
    State(state): State<AppState>,
    index: Result<Path<usize>, PathRejection>,
) -> HandlerResult<PointLabelsResponse> {
    let Path(index) = index?;
    let view = state.store.view();
    let lines: Option<Vec<String>> = [Dataset::Total, Dataset::Blocked]
        .iter()
        .map(|dataset| label_line(&view.series, *dataset, index))
        .collect();

    let lines = lines.ok_or_else(|| {
        AppError::NotFound(format!(
            "point {} out of range (graph has {} points)",
            index,
            view.series.len()
        ))
    })?;

    Ok(Json(PointLabelsResponse { index, lines }))
}

/// GET /v1/queries-graph/tooltip?label=H:MM[&anchor=start|center]
///
/// Title of the aggregation window a hovered label stands for.
pub async fn get_tooltip(
    query: Result<Query<TooltipQuery>, QueryRejection>,
) -> HandlerResult<TooltipResponse> {
    let Query(query) = query?;
    let title = title_for(&query.label, query.anchor)?;
    Ok(Json(TooltipResponse { title }))
}

/// GET /v1/queries-graph/range?from=&until=&name=
///
/// Fetch and transform an explicitly bounded window on demand. Every bucket
/// of a bounded window is complete, so none is trimmed.
pub async fn get_range(
    State(state): State<AppState>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> HandlerResult<QueriesGraph> {
    let Query(query) = query?;
    let from = DateTime::from_timestamp(query.from, 0)
        .ok_or_else(|| AppError::BadRequest(format!("from out of range: {}", query.from)))?;
    let until = DateTime::from_timestamp(query.until, 0)
        .ok_or_else(|| AppError::BadRequest(format!("until out of range: {}", query.until)))?;
    let name = query.name.unwrap_or_else(|| "Custom Range".to_string());
    let range = TimeRange::new(name, from, until)?;

    let payload = state
        .source
        .fetch(Some(&range))
        .await
        .map_err(GraphError::from)?;

    Ok(Json(build_graph(&payload, Some(&range))))
}
