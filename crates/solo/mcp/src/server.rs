//! Newline-delimited JSON-RPC 2.0 server for MCP clients.
//!
//! One request per line in, one response per line out. Notifications get no
//! reply. Logging must go to stderr; stdout carries only protocol frames.

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::adapter::McpAdapter;
use crate::error::{McpAdapterError, McpResult};
use crate::protocol::{
    error_codes, JsonRpcId, JsonRpcRequest, JsonRpcResponse, McpToolCall, PROTOCOL_VERSION,
};

/// Name reported in the `initialize` handshake.
pub const SERVER_NAME: &str = "solo-arc";

pub struct McpServer {
    adapter: Arc<McpAdapter>,
}

impl McpServer {
    pub fn new(adapter: Arc<McpAdapter>) -> Self {
        Self { adapter }
    }

    pub fn adapter(&self) -> &McpAdapter {
        &self.adapter
    }

    /// Serve stdin/stdout until EOF.
    pub async fn run_stdio(&self) -> McpResult<()> {
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Serve newline-delimited requests from `reader` until EOF.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> McpResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(tools = self.adapter.list_tools().len(), "MCP server ready");

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let Some(response) = self.handle_line(&line).await else {
                continue;
            };

            let frame = serde_json::to_string(&response)?;
            writer.write_all(frame.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }

        info!("MCP input closed, shutting down");
        Ok(())
    }

    /// Handle one raw line. `None` means no reply is due.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "Failed to parse JSON-RPC request");
                return Some(JsonRpcResponse::error(
                    None,
                    error_codes::PARSE_ERROR,
                    format!("Parse error: {}", e),
                ));
            }
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                request.id,
                error_codes::INVALID_REQUEST,
                "Invalid JSON-RPC version",
            ));
        }

        let notification = request.is_notification();
        let response = self.dispatch(request).await;
        if notification {
            None
        } else {
            response
        }
    }

    async fn dispatch(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let id = request.id;
        debug!(method = %request.method, id = ?id, "JSON-RPC request");

        let response = match request.method.as_str() {
            "initialize" => {
                info!("Handling initialize request");
                JsonRpcResponse::success(
                    id,
                    json!({
                        "protocolVersion": PROTOCOL_VERSION,
                        "capabilities": { "tools": { "listChanged": false } },
                        "serverInfo": {
                            "name": SERVER_NAME,
                            "version": env!("CARGO_PKG_VERSION")
                        }
                    }),
                )
            }
            "notifications/initialized" => {
                info!("Client initialized notification received");
                return None;
            }
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(
                id,
                json!({ "tools": self.adapter.list_tools() }),
            ),
            "tools/call" => self.call_tool(id, request.params).await,
            other => JsonRpcResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method not found: {}", other),
            ),
        };

        Some(response)
    }

    async fn call_tool(&self, id: Option<JsonRpcId>, params: Option<Value>) -> JsonRpcResponse {
        let mut call = match params.map(serde_json::from_value::<McpToolCall>) {
            Some(Ok(call)) => call,
            Some(Err(e)) => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid tools/call params: {}", e),
                )
            }
            None => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    "tools/call requires params",
                )
            }
        };
        call.request_id = id.as_ref().map(ToString::to_string);

        match self.adapter.call_tool(call).await {
            Ok((result, _)) => match serde_json::to_value(result) {
                Ok(value) => JsonRpcResponse::success(id, value),
                Err(e) => JsonRpcResponse::error(id, error_codes::INTERNAL_ERROR, e.to_string()),
            },
            Err(McpAdapterError::ToolNotFound(name)) => JsonRpcResponse::error(
                id,
                error_codes::INVALID_PARAMS,
                format!("Unknown tool: {}", name),
            ),
            Err(e) => JsonRpcResponse::error(id, error_codes::INTERNAL_ERROR, e.to_string()),
        }
    }
}
