//! Bucket-series normalization.
//!
//! Turns a sparse map of `"<unix seconds>" -> count` into two index-aligned,
//! numerically ordered sequences. Map keys are text, so ordering them as
//! strings would put `"100"` before `"9"`; every key is parsed before it is
//! compared.

use std::collections::BTreeMap;

use log::debug;

use crate::models::{BucketWindow, NormalizedSeries, RawBucketMap};

/// Parse a bucket key as a non-negative UNIX timestamp.
pub fn parse_bucket_key(key: &str) -> Option<i64> {
    key.trim().parse::<i64>().ok().filter(|ts| *ts >= 0)
}

/// Normalize a raw bucket map.
///
/// Keys that do not parse as non-negative integers are dropped. With
/// [`BucketWindow::Ongoing`] the newest bucket is removed as well.
pub fn normalize(raw: &RawBucketMap, window: BucketWindow) -> NormalizedSeries {
    let mut skipped = 0usize;
    let pairs = raw.iter().filter_map(|(key, count)| match parse_bucket_key(key) {
        Some(ts) => Some((ts, *count)),
        None => {
            skipped += 1;
            None
        }
    });
    let series = normalize_pairs(pairs, window);
    if skipped > 0 {
        debug!("dropped {} malformed bucket key(s)", skipped);
    }
    series
}

/// Normalize already-typed `(timestamp, count)` pairs.
///
/// Pairs sharing a timestamp are merged by summing their counts.
pub fn normalize_pairs<I>(pairs: I, window: BucketWindow) -> NormalizedSeries
where
    I: IntoIterator<Item = (i64, u64)>,
{
    let mut buckets: BTreeMap<i64, u64> = BTreeMap::new();
    for (ts, count) in pairs {
        let slot = buckets.entry(ts).or_insert(0);
        *slot = slot.saturating_add(count);
    }

    let (timestamps, counts): (Vec<i64>, Vec<u64>) = buckets.into_iter().unzip();
    let mut series = NormalizedSeries::from_sorted(timestamps, counts);

    if window == BucketWindow::Ongoing {
        series.trim_last();
    }
    series
}
