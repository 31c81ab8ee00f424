//! soloed - Solo Arc daemon
//!
//! Serves jazz-solo intensity profiles and prompt enhancement over MCP
//! (stdin/stdout) or an HTTP API.

use clap::Parser;
use solo_daemon::{DaemonConfig, DaemonError, DaemonResult, Server, Transport};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Solo Arc daemon CLI
#[derive(Parser)]
#[command(name = "soloed")]
#[command(about = "Solo Arc - jazz-solo intensity profiles for prompt enhancement", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "SOLO_CONFIG")]
    config: Option<String>,

    /// Transport
    #[arg(short, long, value_enum, env = "SOLO_TRANSPORT")]
    transport: Option<Transport>,

    /// Listen address (HTTP transport)
    #[arg(short, long, env = "SOLO_LISTEN_ADDR")]
    listen: Option<String>,

    /// Catalog JSON file; the built-in catalog is used otherwise
    #[arg(long, env = "SOLO_CATALOG")]
    catalog: Option<PathBuf>,

    /// Log level
    #[arg(long, env = "SOLO_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, env = "SOLO_LOG_JSON")]
    json: bool,
}

#[tokio::main]
async fn main() -> DaemonResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = DaemonConfig::load(cli.config.as_deref())?;

    // Override with CLI args
    if let Some(transport) = cli.transport {
        config.server.transport = transport;
    }
    if let Some(listen) = cli.listen {
        config.server.listen_addr = listen
            .parse()
            .map_err(|e| DaemonError::Config(format!("Invalid listen address: {}", e)))?;
    }
    if let Some(catalog) = cli.catalog {
        config.registry.catalog_path = Some(catalog);
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    config.logging.json |= cli.json;

    // Initialize tracing; stdout belongs to the MCP transport
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.level.clone().into());

    if config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        transport = ?config.server.transport,
        "Starting soloed"
    );

    let server = Server::new(config)?;
    server.run().await
}
