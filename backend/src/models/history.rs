//! Payloads returned by the statistics endpoint and the ranges they cover.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::bucket::RawBucketMap;
use super::chart::TimeUnit;
use crate::error::GraphError;

/// Legacy over-time payload: two sparse maps keyed by bucket timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverTimeGraphs {
    /// All queries observed per bucket.
    pub domains_over_time: RawBucketMap,
    /// Blocked queries per bucket.
    pub ads_over_time: RawBucketMap,
}

/// One bucket of the history-graph payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub timestamp: i64,
    pub total_queries: u64,
    pub blocked_queries: u64,
}

/// Either shape the statistics endpoint may answer with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HistoryPayload {
    OverTime(OverTimeGraphs),
    Items(Vec<HistoryItem>),
}

impl HistoryPayload {
    /// Parse a raw JSON body.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

/// An explicitly requested, bounded window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub name: String,
    pub from: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(
        name: impl Into<String>,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Self, GraphError> {
        if from >= until {
            return Err(GraphError::InvalidRange(format!(
                "from ({}) must be before until ({})",
                from.to_rfc3339(),
                until.to_rfc3339()
            )));
        }
        Ok(Self {
            name: name.into(),
            from,
            until,
        })
    }

    /// Days on the x axis once the range spans more than one whole day.
    pub fn time_unit(&self) -> TimeUnit {
        if (self.until - self.from).num_days() > 1 {
            TimeUnit::Day
        } else {
            TimeUnit::Hour
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn range(hours: i64) -> TimeRange {
        let from = DateTime::from_timestamp(1_600_000_000, 0).unwrap();
        TimeRange::new("test", from, from + Duration::hours(hours)).unwrap()
    }

    #[test]
    fn test_time_unit_hour_for_one_day() {
        assert_eq!(range(24).time_unit(), TimeUnit::Hour);
        assert_eq!(range(47).time_unit(), TimeUnit::Hour);
    }

    #[test]
    fn test_time_unit_day_beyond_two_days() {
        assert_eq!(range(48).time_unit(), TimeUnit::Day);
        assert_eq!(range(24 * 7).time_unit(), TimeUnit::Day);
    }

    #[test]
    fn test_range_rejects_inverted_bounds() {
        let t = DateTime::from_timestamp(1_600_000_000, 0).unwrap();
        assert!(matches!(
            TimeRange::new("bad", t, t),
            Err(GraphError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_payload_over_time_shape() {
        let payload = HistoryPayload::from_json(
            r#"{"domains_over_time": {"1000": 5}, "ads_over_time": {"1000": 1}}"#,
        )
        .unwrap();
        match payload {
            HistoryPayload::OverTime(g) => {
                assert_eq!(g.domains_over_time["1000"], 5);
                assert_eq!(g.ads_over_time["1000"], 1);
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[test]
    fn test_payload_items_shape() {
        let payload = HistoryPayload::from_json(
            r#"[{"timestamp": 1000, "total_queries": 5, "blocked_queries": 1}]"#,
        )
        .unwrap();
        assert_eq!(
            payload,
            HistoryPayload::Items(vec![HistoryItem {
                timestamp: 1000,
                total_queries: 5,
                blocked_queries: 1
            }])
        );
    }

    #[test]
    fn test_payload_rejects_garbage() {
        assert!(HistoryPayload::from_json(r#"{"status": "ok"}"#).is_err());
    }
}
