//! Configuration file and environment variable handling.
//!
//! Settings are read from `query-graph.toml` (when present) and then
//! overridden by environment variables.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [upstream]
//! base_url = "http://pi.hole:4747"
//! path = "/stats/overTime/graphs"
//! timeout_secs = 30
//!
//! [poll]
//! interval_secs = 600
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::GraphError;
use crate::models::{GraphResult, BUCKET_WIDTH_SECS};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "QUERY_GRAPH_CONFIG";

/// Full service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub upstream: UpstreamSettings,
    #[serde(default)]
    pub poll: PollSettings,
}

/// Bind address of the HTTP API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Statistics endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Refresh schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollSettings {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_base_url() -> String {
    "http://pi.hole:4747".to_string()
}

fn default_path() -> String {
    "/stats/overTime/graphs".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_interval_secs() -> u64 {
    BUCKET_WIDTH_SECS as u64
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            path: default_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

impl UpstreamSettings {
    /// Full URL of the statistics endpoint.
    pub fn endpoint(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if self.path.is_empty() {
            base.to_string()
        } else if self.path.starts_with('/') {
            format!("{}{}", base, self.path)
        } else {
            format!("{}/{}", base, self.path)
        }
    }
}

impl PollSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl GraphConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> GraphResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            GraphError::Config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        toml::from_str(&content)
            .map_err(|e| GraphError::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Locate a config file.
    ///
    /// `QUERY_GRAPH_CONFIG` wins when set; otherwise `query-graph.toml` is
    /// searched in the current directory, `backend/` and the parent directory.
    pub fn find_config_file() -> Option<PathBuf> {
        if let Ok(explicit) = env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(explicit));
        }

        [
            PathBuf::from("query-graph.toml"),
            PathBuf::from("backend/query-graph.toml"),
            PathBuf::from("../query-graph.toml"),
        ]
        .into_iter()
        .find(|p| p.exists())
    }

    /// File (or defaults when none is found), then environment, then validation.
    pub fn load() -> GraphResult<Self> {
        let mut config = match Self::find_config_file() {
            Some(path) => {
                log::info!("Loading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Override settings from environment variables.
    ///
    /// # Environment Variables
    /// - `HOST`, `PORT`: bind address
    /// - `UPSTREAM_URL`, `UPSTREAM_PATH`: statistics endpoint
    /// - `UPSTREAM_TIMEOUT_SECS`: request timeout
    /// - `POLL_INTERVAL_SECS`: refresh interval
    pub fn apply_env_overrides(&mut self) -> GraphResult<()> {
        if let Some(host) = env_str("HOST") {
            self.server.host = host;
        }
        if let Some(port) = env_parsed("PORT")? {
            self.server.port = port;
        }
        if let Some(url) = env_str("UPSTREAM_URL") {
            self.upstream.base_url = url;
        }
        if let Some(path) = env_str("UPSTREAM_PATH") {
            self.upstream.path = path;
        }
        if let Some(timeout) = env_parsed("UPSTREAM_TIMEOUT_SECS")? {
            self.upstream.timeout_secs = timeout;
        }
        if let Some(interval) = env_parsed("POLL_INTERVAL_SECS")? {
            self.poll.interval_secs = interval;
        }
        Ok(())
    }

    pub fn validate(&self) -> GraphResult<()> {
        if self.upstream.base_url.trim().is_empty() {
            return Err(GraphError::Config("upstream.base_url must not be empty".to_string()));
        }
        if self.upstream.timeout_secs == 0 {
            return Err(GraphError::Config("upstream.timeout_secs must be positive".to_string()));
        }
        if self.poll.interval_secs == 0 {
            return Err(GraphError::Config("poll.interval_secs must be positive".to_string()));
        }
        Ok(())
    }

    /// `host:port` string for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn env_str(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn env_parsed<T: std::str::FromStr>(name: &str) -> GraphResult<Option<T>> {
    match env_str(name) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| GraphError::Config(format!("{} has an invalid value: '{}'", name, raw))),
    }
}
