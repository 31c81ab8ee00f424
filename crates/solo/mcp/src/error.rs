use solo_types::SoloError;
use thiserror::Error;

/// MCP adapter errors.
#[derive(Debug, Error)]
pub enum McpAdapterError {
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Domain failure from the engine or composer. Reported to the caller
    /// as an `isError` tool result rather than a protocol error.
    #[error(transparent)]
    Domain(#[from] SoloError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type McpResult<T> = Result<T, McpAdapterError>;
