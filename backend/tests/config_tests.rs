//! Configuration loading from files and the environment.

mod support;

use query_graph::config::GraphConfig;
use query_graph::GraphError;
use support::{config_file, with_config_env};

#[test]
fn test_env_overrides_defaults() {
    let config = with_config_env(
        &[
            ("QUERY_GRAPH_CONFIG", "/nonexistent/query-graph.toml"),
            ("PORT", "9090"),
            ("UPSTREAM_URL", "http://10.0.0.53"),
            ("POLL_INTERVAL_SECS", "60"),
        ],
        || {
            let mut config = GraphConfig::default();
            config.apply_env_overrides().map(|_| config)
        },
    )
    .unwrap();

    assert_eq!(config.server.port, 9090);
    assert_eq!(config.upstream.base_url, "http://10.0.0.53");
    assert_eq!(config.poll.interval_secs, 60);
    assert_eq!(config.upstream.timeout_secs, 30);
}

#[test]
fn test_invalid_env_value_is_rejected() {
    let result = with_config_env(&[("PORT", "not-a-port")], || {
        GraphConfig::default().apply_env_overrides()
    });
    assert!(matches!(result, Err(GraphError::Config(_))));
}

#[test]
fn test_load_from_explicit_file_then_env() {
    let file = config_file(
        r#"
        [upstream]
        base_url = "http://dns.lan:8080"
        path = "/api/history"

        [poll]
        interval_secs = 300
        "#,
    );
    let path = file.path().to_string_lossy().to_string();

    let config = with_config_env(
        &[("QUERY_GRAPH_CONFIG", path.as_str()), ("POLL_INTERVAL_SECS", "120")],
        GraphConfig::load,
    )
    .unwrap();

    assert_eq!(config.upstream.endpoint(), "http://dns.lan:8080/api/history");
    assert_eq!(config.poll.interval_secs, 120);
    assert_eq!(config.server.port, 8080);
}

#[test]
fn test_load_rejects_zero_interval() {
    let file = config_file("[poll]\ninterval_secs = 0\n");
    let path = file.path().to_string_lossy().to_string();

    let result = with_config_env(&[("QUERY_GRAPH_CONFIG", path.as_str())], GraphConfig::load);
    assert!(matches!(result, Err(GraphError::Config(_))));
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let result = with_config_env(
        &[("QUERY_GRAPH_CONFIG", "/nonexistent/query-graph.toml")],
        GraphConfig::load,
    );
    assert!(matches!(result, Err(GraphError::Config(_))));
}

#[test]
fn test_malformed_file_is_an_error() {
    let file = config_file("[server\nport = ");
    let result = GraphConfig::from_file(file.path());
    assert!(matches!(result, Err(GraphError::Config(_))));
}
