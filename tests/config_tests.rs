// Config loading and validation tests

use solana_dashboard::config::{AppConfig, DEVNET_URL, TESTNET_URL};

const VALID_CONFIG: &str = r#"
[server]
port = 8081
host = "0.0.0.0"

[rpc]
gateway_url = "https://api.devnet.solana.com"
dashboard_url = "https://api.testnet.solana.com"
marketplace_url = "https://api-mainnet.magiceden.dev/v2/marketplace/popular_collections"
request_timeout_ms = 5000

[polling]
interval_ms = 15000
broadcast_capacity = 16

[monitoring]
stats_log_interval_secs = 60
"#;

const MINIMAL_CONFIG: &str = r#"
[server]
port = 8081
host = "127.0.0.1"

[polling]
interval_ms = 1000
broadcast_capacity = 4

[monitoring]
stats_log_interval_secs = 60
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.server.port, 8081);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.rpc.request_timeout_ms, 5000);
    assert_eq!(config.polling.interval_ms, 15000);
    assert_eq!(config.polling.broadcast_capacity, 16);
    assert_eq!(config.monitoring.stats_log_interval_secs, 60);
}

#[test]
fn test_config_rpc_defaults_keep_separate_clusters() {
    let config = AppConfig::load_from_str(MINIMAL_CONFIG).expect("minimal");
    assert_eq!(config.rpc.gateway_url, DEVNET_URL);
    assert_eq!(config.rpc.dashboard_url, TESTNET_URL);
    assert!(config.rpc.marketplace_url.contains("popular_collections"));
    assert_eq!(config.rpc.request_timeout_ms, 10_000);
}

#[test]
fn test_config_validation_rejects_invalid_port() {
    let bad = VALID_CONFIG.replace("port = 8081", "port = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.port"));
}

#[test]
fn test_config_validation_rejects_empty_host() {
    let bad = VALID_CONFIG.replace("host = \"0.0.0.0\"", "host = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.host"));
}

#[test]
fn test_config_validation_rejects_non_http_gateway_url() {
    let bad = VALID_CONFIG.replace(
        "gateway_url = \"https://api.devnet.solana.com\"",
        "gateway_url = \"devnet\"",
    );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("rpc.gateway_url"));
}

#[test]
fn test_config_validation_rejects_request_timeout_zero() {
    let bad = VALID_CONFIG.replace("request_timeout_ms = 5000", "request_timeout_ms = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("request_timeout_ms"));
}

#[test]
fn test_config_validation_rejects_interval_zero() {
    let bad = VALID_CONFIG.replace("interval_ms = 15000", "interval_ms = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("polling.interval_ms"));
}

#[test]
fn test_config_validation_rejects_broadcast_capacity_zero() {
    let bad = VALID_CONFIG.replace("broadcast_capacity = 16", "broadcast_capacity = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("broadcast_capacity"));
}

#[test]
fn test_config_validation_rejects_stats_log_interval_zero() {
    let bad = VALID_CONFIG.replace(
        "stats_log_interval_secs = 60",
        "stats_log_interval_secs = 0",
    );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("stats_log_interval_secs"));
}

#[test]
fn test_config_validation_rejects_invalid_toml() {
    let err = AppConfig::load_from_str("not valid toml [[[").unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_config_missing_polling_section_is_an_error() {
    let bad = MINIMAL_CONFIG.replace("[polling]", "[unused]");
    assert!(AppConfig::load_from_str(&bad).is_err());
}

#[test]
fn test_config_load_from_path() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();
    let config = AppConfig::load_from_path(&path).expect("load from path");
    assert_eq!(config.server.port, 8081);
}

#[test]
fn test_config_load_from_missing_path_names_the_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("nope.toml");
    let err = AppConfig::load_from_path(&path).unwrap_err();
    assert!(err.to_string().contains("nope.toml"));
}
