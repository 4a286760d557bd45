//! Builds the render-facing queries graph from a statistics payload.

use crate::models::{
    BucketWindow, ChartSeries, HistoryItem, HistoryPayload, OverTimeGraphs, QueriesGraph,
    TimeRange, TimeUnit,
};
use crate::services::merger::merge;
use crate::services::normalizer::{normalize, normalize_pairs};

/// Transform a payload into a graph view.
///
/// Without a `range` the window is rolling and its newest bucket is still
/// filling up, so it is left out. With a range every bucket is complete.
pub fn build_graph(payload: &HistoryPayload, range: Option<&TimeRange>) -> QueriesGraph {
    let window = BucketWindow::for_range(range);
    let series = match payload {
        HistoryPayload::OverTime(graphs) => over_time_series(graphs, window),
        HistoryPayload::Items(items) => history_series(items, window),
    };

    QueriesGraph {
        loading: false,
        time_unit: range.map(TimeRange::time_unit).unwrap_or(TimeUnit::Hour),
        range_name: range.map(|r| r.name.clone()),
        series,
    }
}

/// Normalize both maps of the over-time payload and merge them.
pub fn over_time_series(graphs: &OverTimeGraphs, window: BucketWindow) -> ChartSeries {
    let total = normalize(&graphs.domains_over_time, window);
    let blocked = normalize(&graphs.ads_over_time, window);
    merge(&total, &blocked)
}

/// Split history items into total and blocked series and merge them.
pub fn history_series(items: &[HistoryItem], window: BucketWindow) -> ChartSeries {
    let total = normalize_pairs(items.iter().map(|i| (i.timestamp, i.total_queries)), window);
    let blocked = normalize_pairs(items.iter().map(|i| (i.timestamp, i.blocked_queries)), window);
    merge(&total, &blocked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration};

    fn graphs() -> OverTimeGraphs {
        OverTimeGraphs {
            domains_over_time: [("1000", 5), ("2000", 8), ("3000", 3)]
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            ads_over_time: [("1000", 1), ("2000", 2), ("3000", 9)]
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
        }
    }

    fn range(days: i64) -> TimeRange {
        let from = DateTime::from_timestamp(0, 0).unwrap();
        TimeRange::new("Last week", from, from + Duration::days(days)).unwrap()
    }

    #[test]
    fn test_rolling_window_drops_last_bucket() {
        let view = build_graph(&HistoryPayload::OverTime(graphs()), None);
        assert!(!view.loading);
        assert_eq!(view.time_unit, TimeUnit::Hour);
        assert_eq!(view.range_name, None);
        assert_eq!(view.series.total, vec![5, 8]);
        assert_eq!(view.series.blocked, vec![1, 2]);
    }

    #[test]
    fn test_bounded_window_keeps_last_bucket() {
        let view = build_graph(&HistoryPayload::OverTime(graphs()), Some(&range(7)));
        assert_eq!(view.series.len(), 3);
        assert_eq!(view.time_unit, TimeUnit::Day);
        assert_eq!(view.range_name.as_deref(), Some("Last week"));
    }

    #[test]
    fn test_history_items_out_of_order() {
        let items = vec![
            HistoryItem { timestamp: 2000, total_queries: 8, blocked_queries: 2 },
            HistoryItem { timestamp: 1000, total_queries: 5, blocked_queries: 1 },
            HistoryItem { timestamp: 3000, total_queries: 3, blocked_queries: 9 },
        ];
        let view = build_graph(&HistoryPayload::Items(items), Some(&range(1)));
        assert_eq!(view.time_unit, TimeUnit::Hour);
        assert_eq!(
            view.series.labels.iter().map(|t| t.timestamp()).collect::<Vec<_>>(),
            vec![1000, 2000, 3000]
        );
        assert_eq!(view.series.total, vec![5, 8, 3]);
        assert_eq!(view.series.blocked, vec![1, 2, 9]);
    }

    #[test]
    fn test_empty_payload() {
        let view = build_graph(&HistoryPayload::Items(vec![]), None);
        assert!(!view.loading);
        assert!(view.series.is_empty());
    }
}
