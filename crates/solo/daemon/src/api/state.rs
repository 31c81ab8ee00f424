//! Application state shared by both transports

use crate::config::DaemonConfig;
use crate::error::DaemonResult;
use solo_composer::{ComposeOptions, Enhancer};
use solo_engine::IntensityEngine;
use solo_mcp::{solo_adapter, McpAdapter, McpAdapterConfig};
use solo_registry::Registry;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Profile derivation over the loaded catalog
    pub engine: IntensityEngine,

    /// Prompt enhancement with configured defaults
    pub enhancer: Arc<Enhancer>,

    /// MCP tool set over the same enhancer
    pub mcp: Arc<McpAdapter>,

    /// Daemon version
    pub version: String,

    /// Daemon start time
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    /// Create application state around an already loaded registry
    pub fn new(registry: Arc<Registry>, defaults: ComposeOptions, mcp: McpAdapterConfig) -> Self {
        let engine = IntensityEngine::new(registry);
        let enhancer = Arc::new(Enhancer::new(engine.clone()).with_defaults(defaults));
        let mcp = Arc::new(solo_adapter(Arc::clone(&enhancer), mcp));

        Self {
            engine,
            enhancer,
            mcp,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: chrono::Utc::now(),
        }
    }

    /// Load the catalog named by the configuration and wire every service.
    /// A catalog that fails to load or validate is fatal.
    pub fn bootstrap(config: &DaemonConfig) -> DaemonResult<Self> {
        let registry = Registry::load(config.registry.catalog_path.as_deref())?;

        Ok(Self::new(
            Arc::new(registry),
            ComposeOptions {
                monk_emphasis: config.composer.monk_emphasis,
            },
            McpAdapterConfig::from(&config.mcp),
        ))
    }

    /// Get uptime as a human-readable string
    pub fn uptime(&self) -> String {
        let secs = (chrono::Utc::now() - self.started_at).num_seconds();

        if secs < 60 {
            format!("{}s", secs)
        } else if secs < 3600 {
            format!("{}m {}s", secs / 60, secs % 60)
        } else {
            format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DaemonError;

    #[test]
    fn test_bootstrap_with_builtin_catalog() {
        let state = AppState::bootstrap(&DaemonConfig::default()).unwrap();
        assert_eq!(state.engine.registry().list_foundations().len(), 4);
        assert_eq!(state.mcp.list_tools().len(), 8);
        assert!(state.enhancer.defaults().monk_emphasis);
        assert!(state.uptime().ends_with('s'));
    }

    #[test]
    fn test_bootstrap_fails_on_missing_catalog() {
        let mut config = DaemonConfig::default();
        config.registry.catalog_path = Some("/nonexistent/solo-catalog.json".into());

        let err = AppState::bootstrap(&config).err().unwrap();
        assert!(matches!(err, DaemonError::Registry(_)));
    }

    #[test]
    fn test_composer_defaults_flow_through() {
        let mut config = DaemonConfig::default();
        config.composer.monk_emphasis = false;
        config.mcp.max_call_history = 3;

        let state = AppState::bootstrap(&config).unwrap();
        assert!(!state.enhancer.defaults().monk_emphasis);
        assert_eq!(state.mcp.config().max_call_history, 3);
    }
}
