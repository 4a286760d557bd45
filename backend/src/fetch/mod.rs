//! Upstream statistics sources.
//!
//! The transformation core never fetches anything itself; it is handed
//! whatever payload a [`HistorySource`] produced.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::FetchError;
use crate::models::{FetchResult, HistoryPayload, OverTimeGraphs, RawBucketMap, TimeRange};
use crate::services::normalizer::parse_bucket_key;

#[cfg(feature = "upstream-client")]
pub mod http;

#[cfg(feature = "upstream-client")]
pub use http::HttpHistorySource;

/// Something that can produce a statistics payload.
#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Fetch the rolling window (`range == None`) or a bounded one.
    async fn fetch(&self, range: Option<&TimeRange>) -> FetchResult<HistoryPayload>;

    /// Short description used in logs.
    fn describe(&self) -> String;
}

/// In-memory source for tests and local development.
///
/// Serves a fixed payload, or [`FetchError::Unavailable`] when none is set.
/// Bounded requests only see buckets inside `[from, until)`.
#[derive(Default)]
pub struct StaticHistorySource {
    payload: RwLock<Option<HistoryPayload>>,
    fetches: AtomicUsize,
}

impl StaticHistorySource {
    pub fn new(payload: HistoryPayload) -> Self {
        Self {
            payload: RwLock::new(Some(payload)),
            fetches: AtomicUsize::new(0),
        }
    }

    /// A source that fails every fetch until a payload is set.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn set(&self, payload: HistoryPayload) {
        *self.payload.write() = Some(payload);
    }

    pub fn clear(&self) {
        *self.payload.write() = None;
    }

    /// Number of fetches served or refused so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HistorySource for StaticHistorySource {
    async fn fetch(&self, range: Option<&TimeRange>) -> FetchResult<HistoryPayload> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let payload = self
            .payload
            .read()
            .clone()
            .ok_or_else(|| FetchError::Unavailable("no payload loaded".to_string()))?;

        Ok(match range {
            Some(range) => restrict_to_range(payload, range),
            None => payload,
        })
    }

    fn describe(&self) -> String {
        "static".to_string()
    }
}

fn restrict_to_range(payload: HistoryPayload, range: &TimeRange) -> HistoryPayload {
    let from = range.from.timestamp();
    let until = range.until.timestamp();
    let inside = |ts: i64| ts >= from && ts < until;

    match payload {
        HistoryPayload::Items(items) => {
            HistoryPayload::Items(items.into_iter().filter(|i| inside(i.timestamp)).collect())
        }
        HistoryPayload::OverTime(graphs) => {
            let keep = |map: RawBucketMap| -> RawBucketMap {
                map.into_iter()
                    .filter(|(k, _)| parse_bucket_key(k).is_some_and(inside))
                    .collect()
            };
            HistoryPayload::OverTime(OverTimeGraphs {
                domains_over_time: keep(graphs.domains_over_time),
                ads_over_time: keep(graphs.ads_over_time),
            })
        }
    }
}
