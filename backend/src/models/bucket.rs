//! Raw and normalized bucket series.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Bucket width used by the statistics backend, in seconds.
pub const BUCKET_WIDTH_SECS: i64 = 10 * 60;

/// Counts keyed by the decimal text of a UNIX timestamp (seconds).
///
/// Keys arrive in whatever order the JSON object had them and are not
/// guaranteed to be contiguous.
pub type RawBucketMap = HashMap<String, u64>;

/// Whether the newest bucket of a series may still be accumulating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketWindow {
    /// Rolling window with no explicit end: the last bucket is incomplete.
    Ongoing,
    /// Explicitly bounded window: every bucket is complete.
    Bounded,
}

impl BucketWindow {
    /// `Ongoing` when no explicit end boundary was requested.
    pub fn for_range<T>(range: Option<&T>) -> Self {
        match range {
            Some(_) => BucketWindow::Bounded,
            None => BucketWindow::Ongoing,
        }
    }
}

/// Two index-aligned sequences: ascending unique timestamps and their counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedSeries {
    timestamps: Vec<i64>,
    counts: Vec<u64>,
}

impl NormalizedSeries {
    /// Build from parallel vectors that are already sorted and deduplicated.
    ///
    /// Callers inside the crate guarantee the ordering; the length invariant
    /// is enforced here by truncating to the shorter side.
    pub(crate) fn from_sorted(mut timestamps: Vec<i64>, mut counts: Vec<u64>) -> Self {
        let len = timestamps.len().min(counts.len());
        timestamps.truncate(len);
        counts.truncate(len);
        Self { timestamps, counts }
    }

    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// `(timestamp, count)` pairs in ascending time order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, u64)> + '_ {
        self.timestamps
            .iter()
            .copied()
            .zip(self.counts.iter().copied())
    }

    /// Drop the newest bucket.
    pub(crate) fn trim_last(&mut self) {
        self.timestamps.pop();
        self.counts.pop();
    }
}
