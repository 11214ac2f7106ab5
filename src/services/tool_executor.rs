use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::errors::ToolError;
use crate::services::logger::Logger;
use crate::utils::suggest::suggest;

/// A manager that serves one or more tools from the catalog. `tools()` drives
/// both registration and the wiring parity check at startup.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    fn tools(&self) -> &'static [&'static str];
    async fn handle(&self, tool: &str, args: Value) -> Result<Value, ToolError>;
}

/// Fixed dispatch table from tool name to handler. Unknown names are a
/// dispatch fault here; nothing downstream runs and no HTTP call is made.
pub struct ToolExecutor {
    logger: Logger,
    handlers: Arc<HashMap<String, Arc<dyn ToolHandler>>>,
}

impl ToolExecutor {
    pub fn new(logger: Logger, handlers: HashMap<String, Arc<dyn ToolHandler>>) -> Self {
        Self {
            logger: logger.child("executor"),
            handlers: Arc::new(handlers),
        }
    }

    pub fn known_tools(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.keys().cloned().collect();
        names.sort();
        names
    }

    pub async fn execute(&self, tool: &str, args: Value) -> Result<Value, ToolError> {
        let Some(handler) = self.handlers.get(tool) else {
            let candidates = self.known_tools();
            let suggestions = suggest(tool, &candidates, 5);
            let hint = if suggestions.is_empty() {
                "Call tools/list for the full tool catalog".to_string()
            } else {
                format!("Did you mean: {}?", suggestions.join(", "))
            };
            return Err(ToolError::invalid_params(format!("Unknown tool: {}", tool)).with_hint(hint));
        };

        let span_id = uuid::Uuid::new_v4().to_string();
        let started = Instant::now();
        self.logger.debug(
            "Dispatching tool call",
            Some(&serde_json::json!({ "tool": tool, "span_id": span_id })),
        );

        let result = handler.handle(tool, args).await;

        let duration_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => self.logger.debug(
                "Tool call finished",
                Some(&serde_json::json!({
                    "tool": tool,
                    "span_id": span_id,
                    "duration_ms": duration_ms,
                })),
            ),
            Err(err) => self.logger.warn(
                "Tool call failed",
                Some(&serde_json::json!({
                    "tool": tool,
                    "span_id": span_id,
                    "duration_ms": duration_ms,
                    "code": err.code,
                    "error": err.message,
                })),
            ),
        }
        result
    }
}
