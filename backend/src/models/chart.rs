//! Chart-facing series and views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One plotted bucket.
///
/// `blocked <= total` is expected but not enforced; upstream counters can be
/// momentarily inconsistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedPoint {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub total: u64,
    pub blocked: u64,
}

impl MergedPoint {
    /// Share of blocked queries in percent; 0.0 for an empty bucket.
    pub fn blocked_percentage(&self) -> f64 {
        blocked_percentage(self.total, self.blocked)
    }

    /// Blocked share rendered with one decimal, e.g. `"25.0"`.
    pub fn blocked_percentage_label(&self) -> String {
        format_percentage(self.blocked_percentage())
    }
}

/// `100 * blocked / total`, or 0.0 when `total` is zero.
pub fn blocked_percentage(total: u64, blocked: u64) -> f64 {
    if total > 0 {
        100.0 * blocked as f64 / total as f64
    } else {
        0.0
    }
}

/// One decimal place, rounding the exact binary value with halves away from
/// zero, so `0.25` gives `"0.3"` but `0.35` (stored as `0.3499…`) gives `"0.3"`.
pub fn format_percentage(value: f64) -> String {
    // `{:.1}` rounds the exact value correctly but breaks exact ties to even.
    // An exact tie at one decimal is always a multiple of 0.25, where both
    // scalings below are exact.
    let scaled = value * 10.0;
    if (value * 4.0).fract() == 0.0 && scaled.fract().abs() == 0.5 {
        format!("{:.1}", scaled.round() / 10.0)
    } else {
        format!("{:.1}", value)
    }
}

/// Which of the two datasets a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    Total,
    Blocked,
}

impl Dataset {
    pub fn label(&self) -> &'static str {
        match self {
            Dataset::Total => "Total Queries",
            Dataset::Blocked => "Blocked Queries",
        }
    }
}

/// Labels plus the two index-aligned datasets handed to the render layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSeries {
    #[serde(with = "millis_vec")]
    pub labels: Vec<DateTime<Utc>>,
    pub total: Vec<u64>,
    pub blocked: Vec<u64>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn push(&mut self, point: MergedPoint) {
        self.labels.push(point.timestamp);
        self.total.push(point.total);
        self.blocked.push(point.blocked);
    }

    pub fn point(&self, index: usize) -> Option<MergedPoint> {
        Some(MergedPoint {
            timestamp: *self.labels.get(index)?,
            total: *self.total.get(index)?,
            blocked: *self.blocked.get(index)?,
        })
    }

    pub fn points(&self) -> impl Iterator<Item = MergedPoint> + '_ {
        (0..self.len()).filter_map(move |i| self.point(i))
    }

    pub fn values(&self, dataset: Dataset) -> &[u64] {
        match dataset {
            Dataset::Total => &self.total,
            Dataset::Blocked => &self.blocked,
        }
    }
}

impl FromIterator<MergedPoint> for ChartSeries {
    fn from_iter<I: IntoIterator<Item = MergedPoint>>(iter: I) -> Self {
        let mut series = ChartSeries::default();
        for point in iter {
            series.push(point);
        }
        series
    }
}

/// Granularity of the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    #[default]
    Hour,
    Day,
}

/// Everything the render layer needs to draw the queries graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueriesGraph {
    pub loading: bool,
    pub time_unit: TimeUnit,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_name: Option<String>,
    pub series: ChartSeries,
}

impl QueriesGraph {
    /// Placeholder shown before the first refresh and after a failed one.
    pub fn loading() -> Self {
        Self {
            loading: true,
            time_unit: TimeUnit::Hour,
            range_name: Some("---".to_string()),
            series: ChartSeries::default(),
        }
    }
}

mod millis_vec {
    use chrono::{DateTime, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(labels: &[DateTime<Utc>], s: S) -> Result<S::Ok, S::Error> {
        s.collect_seq(labels.iter().map(|t| t.timestamp_millis()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<DateTime<Utc>>, D::Error> {
        Vec::<i64>::deserialize(d)?
            .into_iter()
            .map(|ms| {
                DateTime::from_timestamp_millis(ms)
                    .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {ms}")))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_percentage_zero_total() {
        assert_eq!(blocked_percentage(0, 0), 0.0);
        assert_eq!(format_percentage(blocked_percentage(0, 0)), "0.0");
    }

    #[test]
    fn test_percentage_quarter() {
        let p = MergedPoint { timestamp: at(0), total: 200, blocked: 50 };
        assert_eq!(p.blocked_percentage_label(), "25.0");
    }

    #[test]
    fn test_percentage_blocked_exceeds_total() {
        let p = MergedPoint { timestamp: at(0), total: 10, blocked: 15 };
        assert_eq!(p.blocked_percentage_label(), "150.0");
    }

    #[test]
    fn test_percentage_half_rounds_up() {
        // 1 / 400 = 0.25%
        assert_eq!(format_percentage(blocked_percentage(400, 1)), "0.3");
        assert_eq!(format_percentage(blocked_percentage(3, 1)), "33.3");
        assert_eq!(format_percentage(blocked_percentage(400, 3)), "0.8");
        assert_eq!(format_percentage(12.5), "12.5");
    }

    #[test]
    fn test_percentage_inexact_halves_round_by_stored_value() {
        // 0.35 and 0.15 are stored just below the half
        assert_eq!(format_percentage(blocked_percentage(2000, 7)), "0.3");
        assert_eq!(format_percentage(blocked_percentage(2000, 3)), "0.1");
        // 2.45 is stored just above it
        assert_eq!(format_percentage(2.45), "2.5");
        assert_eq!(format_percentage(1.45), "1.4");
        assert_eq!(format_percentage(blocked_percentage(400, 1)), "0.3");
    }

    #[test]
    fn test_blocked_line_uses_stored_value_rounding() {
        let p = MergedPoint { timestamp: at(0), total: 2000, blocked: 7 };
        assert_eq!(p.blocked_percentage_label(), "0.3");
    }

    #[test]
    fn test_series_serializes_labels_as_millis() {
        let series: ChartSeries = vec![MergedPoint { timestamp: at(1000), total: 5, blocked: 1 }]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(json["labels"][0], 1_000_000);
        assert_eq!(json["total"][0], 5);

        let back: ChartSeries = serde_json::from_value(json).unwrap();
        assert_eq!(back, series);
    }

    #[test]
    fn test_point_out_of_range() {
        let series = ChartSeries::default();
        assert!(series.point(0).is_none());
        assert_eq!(series.points().count(), 0);
    }

    #[test]
    fn test_loading_view() {
        let view = QueriesGraph::loading();
        assert!(view.loading);
        assert_eq!(view.range_name.as_deref(), Some("---"));
        assert!(view.series.is_empty());
    }
}
