use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{McpAdapterError, McpResult};
use crate::protocol::{McpTool, McpToolCall, McpToolResult};

/// Tool executor trait for MCP tools.
#[async_trait]
pub trait McpToolExecutor: Send + Sync {
    /// Execute a tool call and return the result.
    async fn execute(&self, call: &McpToolCall) -> McpResult<McpToolResult>;

    /// Get the tool definition.
    fn tool(&self) -> &McpTool;
}

/// Tools in registration order, addressable by name.
#[derive(Default)]
pub struct McpToolRegistry {
    order: Vec<String>,
    executors: HashMap<String, Arc<dyn McpToolExecutor>>,
}

impl McpToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an executor under its tool's name, replacing any previous one.
    pub fn register(&mut self, executor: Arc<dyn McpToolExecutor>) {
        let name = executor.tool().name.clone();
        if self.executors.insert(name.clone(), executor).is_none() {
            self.order.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn McpToolExecutor>> {
        self.executors.get(name)
    }

    /// Tool definitions in registration order.
    pub fn list_tools(&self) -> Vec<&McpTool> {
        self.order
            .iter()
            .filter_map(|name| self.executors.get(name))
            .map(|executor| executor.tool())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// MCP call record for audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpCallRecord {
    pub call_id: String,
    /// JSON-RPC request id the call arrived with.
    pub request_id: Option<String>,
    pub tool_name: String,
    pub arguments: serde_json::Value,
    pub called_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    /// False for protocol failures and `isError` results alike.
    pub success: bool,
    /// First 100 characters of the result text.
    pub result_summary: Option<String>,
}

/// Configuration for the MCP adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpAdapterConfig {
    /// Maximum call history to retain.
    pub max_call_history: usize,
    /// Log full arguments for each call.
    pub detailed_logging: bool,
}

impl Default for McpAdapterConfig {
    fn default() -> Self {
        Self {
            max_call_history: 1000,
            detailed_logging: false,
        }
    }
}

/// Dispatches tool calls to registered executors and keeps a bounded
/// audit history. The history never influences results.
pub struct McpAdapter {
    registry: McpToolRegistry,
    call_history: RwLock<VecDeque<McpCallRecord>>,
    config: McpAdapterConfig,
}

impl McpAdapter {
    pub fn new() -> Self {
        Self {
            registry: McpToolRegistry::new(),
            call_history: RwLock::new(VecDeque::new()),
            config: McpAdapterConfig::default(),
        }
    }

    /// Create with custom configuration.
    pub fn with_config(mut self, config: McpAdapterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &McpAdapterConfig {
        &self.config
    }

    pub fn register_tool(&mut self, executor: Arc<dyn McpToolExecutor>) {
        self.registry.register(executor);
    }

    /// MCP `tools/list` payload.
    pub fn list_tools(&self) -> Vec<McpTool> {
        self.registry.list_tools().into_iter().cloned().collect()
    }

    /// Run a tool call and record it.
    pub async fn call_tool(&self, call: McpToolCall) -> McpResult<(McpToolResult, McpCallRecord)> {
        let executor = self
            .registry
            .get(&call.name)
            .ok_or_else(|| McpAdapterError::ToolNotFound(call.name.clone()))?;

        let call_id = format!("mcp-call-{}", uuid::Uuid::new_v4());
        let called_at = Utc::now();

        if self.config.detailed_logging {
            debug!(call_id = %call_id, tool = %call.name, arguments = %call.arguments, "Tool call");
        } else {
            debug!(call_id = %call_id, tool = %call.name, "Tool call");
        }

        let result = executor.execute(&call).await;

        let record = McpCallRecord {
            call_id,
            request_id: call.request_id.clone(),
            tool_name: call.name.clone(),
            arguments: call.arguments.clone(),
            called_at,
            completed_at: Utc::now(),
            success: matches!(&result, Ok(r) if !r.is_error()),
            result_summary: result
                .as_ref()
                .ok()
                .and_then(|r| r.first_text())
                .map(|text| text.chars().take(100).collect()),
        };

        match &result {
            Ok(r) if r.is_error() => {
                debug!(call_id = %record.call_id, tool = %record.tool_name, "Tool returned an error result");
            }
            Ok(_) => {}
            Err(e) => {
                warn!(call_id = %record.call_id, tool = %record.tool_name, error = %e, "Tool call failed");
            }
        }

        self.remember(record.clone());

        result.map(|r| (r, record))
    }

    /// Most recent calls first.
    pub fn call_history(&self, limit: usize) -> Vec<McpCallRecord> {
        self.call_history
            .read()
            .map(|h| h.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default()
    }

    fn remember(&self, record: McpCallRecord) {
        if self.config.max_call_history == 0 {
            return;
        }
        if let Ok(mut history) = self.call_history.write() {
            history.push_back(record);
            while history.len() > self.config.max_call_history {
                history.pop_front();
            }
        }
    }
}

impl Default for McpAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::McpAnnotations;

    struct EchoTool {
        tool: McpTool,
    }

    impl EchoTool {
        fn new(name: &str) -> Self {
            Self {
                tool: McpTool {
                    name: name.to_string(),
                    description: "Echo back the input message".to_string(),
                    input_schema: serde_json::json!({"type": "object"}),
                    annotations: McpAnnotations::read_only("Echo"),
                },
            }
        }
    }

    #[async_trait]
    impl McpToolExecutor for EchoTool {
        async fn execute(&self, call: &McpToolCall) -> McpResult<McpToolResult> {
            match call.arguments.get("message").and_then(|v| v.as_str()) {
                Some(message) => Ok(McpToolResult::text(format!("Echo: {}", message))),
                None => Ok(McpToolResult::error_text("missing message")),
            }
        }

        fn tool(&self) -> &McpTool {
            &self.tool
        }
    }

    fn adapter(max_call_history: usize) -> McpAdapter {
        let mut adapter = McpAdapter::new().with_config(McpAdapterConfig {
            max_call_history,
            detailed_logging: true,
        });
        adapter.register_tool(Arc::new(EchoTool::new("echo")));
        adapter
    }

    #[test]
    fn registry_keeps_registration_order() {
        let mut registry = McpToolRegistry::new();
        registry.register(Arc::new(EchoTool::new("b")));
        registry.register(Arc::new(EchoTool::new("a")));
        registry.register(Arc::new(EchoTool::new("b")));

        let names: Vec<&str> = registry.list_tools().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(registry.len(), 2);
    }

    #[tokio::test]
    async fn call_is_recorded() {
        let adapter = adapter(10);
        let (result, record) = adapter
            .call_tool(McpToolCall::new("echo", serde_json::json!({"message": "hi"})))
            .await
            .unwrap();

        assert_eq!(result.first_text(), Some("Echo: hi"));
        assert!(record.success);
        assert!(record.call_id.starts_with("mcp-call-"));
        assert_eq!(record.result_summary.as_deref(), Some("Echo: hi"));
        assert_eq!(adapter.call_history(5).len(), 1);
    }

    #[tokio::test]
    async fn error_results_are_recorded_as_failures() {
        let adapter = adapter(10);
        let (result, record) = adapter
            .call_tool(McpToolCall::new("echo", serde_json::json!({})))
            .await
            .unwrap();
        assert!(result.is_error());
        assert!(!record.success);
    }

    #[tokio::test]
    async fn unknown_tool_is_rejected() {
        let adapter = adapter(10);
        let err = adapter
            .call_tool(McpToolCall::new("missing", serde_json::Value::Null))
            .await
            .unwrap_err();
        assert!(matches!(err, McpAdapterError::ToolNotFound(name) if name == "missing"));
        assert!(adapter.call_history(5).is_empty());
    }

    #[tokio::test]
    async fn history_is_bounded_newest_first() {
        let adapter = adapter(2);
        for message in ["one", "two", "three"] {
            adapter
                .call_tool(McpToolCall::new("echo", serde_json::json!({"message": message})))
                .await
                .unwrap();
        }

        let history = adapter.call_history(10);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].result_summary.as_deref(), Some("Echo: three"));
        assert_eq!(history[1].result_summary.as_deref(), Some("Echo: two"));
    }

    #[tokio::test]
    async fn zero_history_keeps_nothing() {
        let adapter = adapter(0);
        adapter
            .call_tool(McpToolCall::new("echo", serde_json::json!({"message": "x"})))
            .await
            .unwrap();
        assert!(adapter.call_history(10).is_empty());
    }
}
