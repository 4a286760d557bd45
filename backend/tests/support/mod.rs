//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::collections::HashSet;
use std::io::Write;
use std::sync::Mutex;

use query_graph::models::{
    HistoryItem, HistoryPayload, OverTimeGraphs, RawBucketMap, BUCKET_WIDTH_SECS,
};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Config-related variables cleared for every env-scoped test.
pub const CONFIG_VARS: &[&str] = &[
    "QUERY_GRAPH_CONFIG",
    "HOST",
    "PORT",
    "UPSTREAM_URL",
    "UPSTREAM_PATH",
    "UPSTREAM_TIMEOUT_SECS",
    "POLL_INTERVAL_SECS",
];

/// Runs `f` with the config variables cleared and `changes` applied.
///
/// Access is serialized because the process environment is global, and the
/// previous values are restored even if `f` panics.
pub fn with_config_env<F, R>(changes: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = EnvGuard::apply(changes);
    f()
}

struct EnvGuard {
    saved: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    fn apply(changes: &[(&str, &str)]) -> Self {
        let keys: HashSet<&str> = CONFIG_VARS
            .iter()
            .copied()
            .chain(changes.iter().map(|(k, _)| *k))
            .collect();
        let saved = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for key in CONFIG_VARS {
            std::env::remove_var(key);
        }
        for (k, v) in changes {
            std::env::set_var(k, v);
        }

        Self { saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (k, v) in self.saved.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Write `content` to a temporary TOML file.
pub fn config_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("create temp config");
    file.write_all(content.as_bytes()).expect("write temp config");
    file
}

pub fn bucket_map(entries: &[(&str, u64)]) -> RawBucketMap {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

/// Three buckets, 1000/2000/3000, as the legacy over-time payload.
pub fn over_time_payload() -> HistoryPayload {
    HistoryPayload::OverTime(OverTimeGraphs {
        domains_over_time: bucket_map(&[("1000", 5), ("2000", 8), ("3000", 3)]),
        ads_over_time: bucket_map(&[("1000", 1), ("2000", 2), ("3000", 9)]),
    })
}

/// History items spanning `count` consecutive 10-minute buckets.
pub fn history_payload(start: i64, count: usize) -> HistoryPayload {
    HistoryPayload::Items(
        (0..count)
            .map(|i| HistoryItem {
                timestamp: start + i as i64 * BUCKET_WIDTH_SECS,
                total_queries: 100 + i as u64,
                blocked_queries: 10 + i as u64,
            })
            .collect(),
    )
}
