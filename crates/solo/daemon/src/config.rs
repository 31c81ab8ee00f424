//! Configuration for soloed

use serde::{Deserialize, Serialize};
use solo_mcp::McpAdapterConfig;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Main daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DaemonConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub composer: ComposerConfig,

    #[serde(default)]
    pub mcp: McpConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How the daemon talks to its callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Transport {
    /// MCP JSON-RPC over stdin/stdout
    #[default]
    Stdio,
    /// JSON over HTTP
    Http,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub transport: Transport,

    /// Listen address (HTTP transport only)
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: Transport::default(),
            listen_addr: default_listen_addr(),
            enable_cors: true,
        }
    }
}

/// Reference catalog source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Catalog JSON file; the built-in catalog is used when unset
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

/// Prose composition defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposerConfig {
    /// Append Monk principles unless a request says otherwise
    #[serde(default = "default_true")]
    pub monk_emphasis: bool,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            monk_emphasis: true,
        }
    }
}

/// MCP adapter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpConfig {
    /// Tool calls kept for audit
    #[serde(default = "default_max_call_history")]
    pub max_call_history: usize,

    /// Log full tool arguments
    #[serde(default)]
    pub detailed_logging: bool,
}

impl Default for McpConfig {
    fn default() -> Self {
        Self {
            max_call_history: default_max_call_history(),
            detailed_logging: false,
        }
    }
}

impl From<&McpConfig> for McpAdapterConfig {
    fn from(config: &McpConfig) -> Self {
        McpAdapterConfig {
            max_call_history: config.max_call_history,
            detailed_logging: config.detailed_logging,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// Default value helpers
fn default_true() -> bool {
    true
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

fn default_max_call_history() -> usize {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl DaemonConfig {
    /// Load configuration: defaults, then the optional file, then
    /// `SOLO_`-prefixed environment variables (`SOLO_SERVER__LISTEN_ADDR`).
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&DaemonConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("SOLO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DaemonConfig::default();
        assert_eq!(config.server.transport, Transport::Stdio);
        assert_eq!(config.server.listen_addr.port(), 8080);
        assert!(config.registry.catalog_path.is_none());
        assert!(config.composer.monk_emphasis);
        assert_eq!(config.mcp.max_call_history, 1000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config = DaemonConfig::load(None).unwrap();
        assert!(config.composer.monk_emphasis);
        assert_eq!(config.server.listen_addr.port(), 8080);
    }

    #[test]
    fn test_load_file_overrides_defaults() {
        let dir = std::env::temp_dir().join(format!("soloed-config-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("soloed.toml");
        std::fs::write(
            &path,
            r#"
[server]
transport = "http"
listen_addr = "0.0.0.0:9090"

[composer]
monk_emphasis = false

[mcp]
max_call_history = 5
"#,
        )
        .unwrap();

        let config = DaemonConfig::load(path.to_str()).unwrap();
        assert_eq!(config.server.transport, Transport::Http);
        assert_eq!(config.server.listen_addr.port(), 9090);
        assert!(!config.composer.monk_emphasis);
        assert_eq!(config.mcp.max_call_history, 5);
        assert_eq!(config.logging.level, "info");

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_mcp_config_conversion() {
        let adapter: McpAdapterConfig = (&McpConfig {
            max_call_history: 7,
            detailed_logging: true,
        })
            .into();
        assert_eq!(adapter.max_call_history, 7);
        assert!(adapter.detailed_logging);
    }
}
