//! Model Context Protocol (MCP) transport for Solo Arc.
//!
//! ```text
//!   stdin ──▶ McpServer (JSON-RPC 2.0, one frame per line) ──▶ stdout
//!                   │
//!                   ▼
//!             McpAdapter ── call history (bounded, audit only)
//!                   │
//!                   ▼
//!             SoloTool × 8 ──▶ Enhancer ──▶ IntensityEngine
//! ```
//!
//! Domain failures surface as `isError` tool results; unknown tools and
//! malformed frames are JSON-RPC errors.

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod adapter;
pub mod error;
pub mod protocol;
pub mod server;
pub mod tools;

pub use adapter::{McpAdapter, McpAdapterConfig, McpCallRecord, McpToolExecutor, McpToolRegistry};
pub use error::{McpAdapterError, McpResult};
pub use protocol::{
    error_codes, JsonRpcError, JsonRpcId, JsonRpcRequest, JsonRpcResponse, McpAnnotations,
    McpContent, McpTool, McpToolCall, McpToolResult, PROTOCOL_VERSION,
};
pub use server::{McpServer, SERVER_NAME};
pub use tools::{solo_adapter, SoloTool, SoloToolKind};
