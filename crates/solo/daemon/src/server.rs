//! Server setup and lifecycle management

use crate::api::{create_router, AppState};
use crate::config::{DaemonConfig, Transport};
use crate::error::{DaemonError, DaemonResult};
use solo_mcp::McpServer;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Solo Arc daemon
pub struct Server {
    config: DaemonConfig,
    state: AppState,
}

impl Server {
    /// Create a new server; fails when the catalog cannot be loaded
    pub fn new(config: DaemonConfig) -> DaemonResult<Self> {
        let state = AppState::bootstrap(&config)?;
        Ok(Self { config, state })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run on the configured transport until input closes or a shutdown
    /// signal arrives
    pub async fn run(self) -> DaemonResult<()> {
        match self.config.server.transport {
            Transport::Stdio => self.run_stdio().await,
            Transport::Http => self.run_http().await,
        }
    }

    async fn run_stdio(self) -> DaemonResult<()> {
        tracing::info!(version = %self.state.version, "Solo Arc MCP server on stdio");

        let server = McpServer::new(Arc::clone(&self.state.mcp));
        tokio::select! {
            result = server.run_stdio() => result?,
            _ = shutdown_signal() => {}
        }

        tracing::info!("Solo Arc daemon shutting down");
        Ok(())
    }

    async fn run_http(self) -> DaemonResult<()> {
        let addr = self.config.server.listen_addr;
        let app = create_router(self.state, self.config.server.enable_cors);

        let listener = TcpListener::bind(addr).await?;

        tracing::info!(%addr, "Solo Arc HTTP API listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| DaemonError::Server(e.to_string()))?;

        tracing::info!("Solo Arc daemon shutting down");
        Ok(())
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
