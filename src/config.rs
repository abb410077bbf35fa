use serde::Deserialize;
use std::path::Path;

pub const DEVNET_URL: &str = "https://api.devnet.solana.com";
pub const TESTNET_URL: &str = "https://api.testnet.solana.com";
pub const MAGIC_EDEN_POPULAR_COLLECTIONS_URL: &str =
    "https://api-mainnet.magiceden.dev/v2/marketplace/popular_collections";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub rpc: RpcConfig,
    pub polling: PollingConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

/// Upstream endpoints. The gateway routes and the dashboard poller target
/// different clusters by default (devnet / testnet).
#[derive(Debug, Clone, Deserialize)]
pub struct RpcConfig {
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,
    #[serde(default = "default_dashboard_url")]
    pub dashboard_url: String,
    #[serde(default = "default_marketplace_url")]
    pub marketplace_url: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            gateway_url: default_gateway_url(),
            dashboard_url: default_dashboard_url(),
            marketplace_url: default_marketplace_url(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

fn default_gateway_url() -> String {
    DEVNET_URL.into()
}

fn default_dashboard_url() -> String {
    TESTNET_URL.into()
}

fn default_marketplace_url() -> String {
    MAGIC_EDEN_POPULAR_COLLECTIONS_URL.into()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
    pub interval_ms: u64,
    /// Max number of view-model updates kept in the broadcast channel for /ws/dashboard (slow clients may lag).
    pub broadcast_capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    /// How often to log app stats (dashboard clients, polls ok/failed) at INFO level.
    pub stats_log_interval_secs: u64,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        Self::load_from_path(path)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading {}: {}", path.display(), e))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(!self.server.host.is_empty(), "server.host must be non-empty");
        for (key, url) in [
            ("rpc.gateway_url", &self.rpc.gateway_url),
            ("rpc.dashboard_url", &self.rpc.dashboard_url),
            ("rpc.marketplace_url", &self.rpc.marketplace_url),
        ] {
            anyhow::ensure!(
                url.starts_with("http://") || url.starts_with("https://"),
                "{} must be an http(s) URL, got {:?}",
                key,
                url
            );
        }
        anyhow::ensure!(
            self.rpc.request_timeout_ms > 0,
            "rpc.request_timeout_ms must be > 0, got {}",
            self.rpc.request_timeout_ms
        );
        anyhow::ensure!(
            self.polling.interval_ms > 0,
            "polling.interval_ms must be > 0, got {}",
            self.polling.interval_ms
        );
        anyhow::ensure!(
            self.polling.broadcast_capacity > 0,
            "polling.broadcast_capacity must be > 0, got {}",
            self.polling.broadcast_capacity
        );
        anyhow::ensure!(
            self.monitoring.stats_log_interval_secs > 0,
            "monitoring.stats_log_interval_secs must be > 0, got {}",
            self.monitoring.stats_log_interval_secs
        );
        Ok(())
    }
}
