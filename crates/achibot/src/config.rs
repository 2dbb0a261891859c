//! Configuration management

use achicore::protocol::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SERVER_KEY};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub harness: HarnessConfig,
    pub matchmaker: MatchmakerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub server_key: String,
    pub use_ssl: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Number of simulated clients
    pub clients: usize,
    /// Prefix of the display name sent on authentication
    pub username_prefix: String,
    pub appear_online: bool,
    /// Distance from the origin of each client's starting position
    pub start_offset: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchmakerConfig {
    pub query: String,
    /// 0 lets the server pick its default
    pub min_count: u32,
    /// 0 lets the server pick its default
    pub max_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl ServerConfig {
    /// Base URL for HTTP calls, e.g. `http://127.0.0.1:7350`
    pub fn http_url(&self) -> String {
        let scheme = if self.use_ssl { "https" } else { "http" };
        format!("{}://{}:{}", scheme, self.host, self.port)
    }

    /// Base URL for the realtime socket, e.g. `ws://127.0.0.1:7350`
    pub fn ws_url(&self) -> String {
        let scheme = if self.use_ssl { "wss" } else { "ws" };
        format!("{}://{}:{}", scheme, self.host, self.port)
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a file, falling back to defaults if it does not exist
    pub fn load_or_default(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
                server_key: DEFAULT_SERVER_KEY.to_string(),
                use_ssl: false,
            },
            harness: HarnessConfig {
                clients: 2,
                username_prefix: "rsclient".to_string(),
                appear_online: true,
                start_offset: 100.0,
            },
            matchmaker: MatchmakerConfig {
                query: String::new(),
                min_count: 0,
                max_count: 0,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}
