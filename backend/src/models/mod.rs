//! Domain types shared by the transformation services and the HTTP layer.

pub mod bucket;
pub mod chart;
pub mod history;
pub mod outcome;

pub use bucket::{BucketWindow, NormalizedSeries, RawBucketMap, BUCKET_WIDTH_SECS};
pub use chart::{ChartSeries, Dataset, MergedPoint, QueriesGraph, TimeUnit};
pub use history::{HistoryItem, HistoryPayload, OverTimeGraphs, TimeRange};
pub use outcome::{FetchResult, GraphResult};
