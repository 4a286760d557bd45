//! Zips the total and blocked series into one chart series.

use chrono::DateTime;
use log::{debug, warn};

use crate::models::chart::format_percentage;
use crate::models::{ChartSeries, Dataset, MergedPoint, NormalizedSeries};

/// Align `total` and `blocked` index by index.
///
/// Only the first `min(total.len(), blocked.len())` buckets are kept; there
/// is no sensible value to pad a missing bucket with. Labels come from the
/// total series.
pub fn merge(total: &NormalizedSeries, blocked: &NormalizedSeries) -> ChartSeries {
    if total.len() != blocked.len() {
        debug!(
            "series length mismatch (total={}, blocked={}), truncating",
            total.len(),
            blocked.len()
        );
    }

    total
        .iter()
        .zip(blocked.iter())
        .filter_map(|((ts, total_count), (blocked_ts, blocked_count))| {
            if ts != blocked_ts {
                debug!("bucket misaligned: total at {}, blocked at {}", ts, blocked_ts);
            }
            let Some(timestamp) = ts.checked_mul(1000).and_then(DateTime::from_timestamp_millis)
            else {
                warn!("skipping bucket with unrepresentable timestamp {}", ts);
                return None;
            };
            Some(MergedPoint {
                timestamp,
                total: total_count,
                blocked: blocked_count,
            })
        })
        .collect()
}

/// Tooltip body line for one dataset at `index`.
///
/// The blocked line carries the blocked share, e.g.
/// `"Blocked Queries: 50 (25.0%)"`.
pub fn label_line(series: &ChartSeries, dataset: Dataset, index: usize) -> Option<String> {
    let point = series.point(index)?;
    let line = match dataset {
        Dataset::Total => format!("{}: {}", dataset.label(), point.total),
        Dataset::Blocked => format!(
            "{}: {} ({}%)",
            dataset.label(),
            point.blocked,
            format_percentage(point.blocked_percentage())
        ),
    };
    Some(line)
}
