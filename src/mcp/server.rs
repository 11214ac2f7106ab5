use crate::app::App;
use crate::errors::{ErrorCode, McpError, ToolError};
use crate::mcp::catalog::{tool_catalog, validate_tool_args};
use crate::mcp::protocol::{JsonRpcRequest, JsonRpcResponse};
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};

const PROTOCOL_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "zohodesk-mcp";
const SERVER_VERSION: &str = "1.0.0";

/// Wraps a tool outcome in the single-content-result shape the protocol
/// expects. JSON results are pretty-printed; plain-string results (delete
/// confirmations) pass through untouched.
fn tool_call_success(result: &Value) -> Value {
    let text = match result {
        Value::String(text) => text.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    };
    serde_json::json!({
        "content": [ { "type": "text", "text": text } ]
    })
}

fn protocol_failure(id: Value, error: McpError) -> JsonRpcResponse {
    JsonRpcResponse::failure(id, error.code.as_i32(), error.message)
}

/// Dispatch faults never cross the protocol boundary as JSON-RPC errors; they
/// become an `Error: ...` text result the caller must inspect.
fn tool_call_fault(error: &ToolError) -> Value {
    let mut text = format!("Error: {}", error.message);
    if let Some(hint) = &error.hint {
        text.push_str(&format!(" ({})", hint));
    }
    serde_json::json!({
        "content": [ { "type": "text", "text": text } ]
    })
}

pub struct McpServer {
    app: Arc<App>,
}

impl McpServer {
    pub async fn new() -> Result<Self, ToolError> {
        let app = App::initialize()?;
        Ok(Self { app: Arc::new(app) })
    }

    pub fn with_app(app: Arc<App>) -> Self {
        Self { app }
    }

    fn handle_initialize(&self) -> Value {
        serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": {} },
            "serverInfo": { "name": SERVER_NAME, "version": SERVER_VERSION },
        })
    }

    fn handle_tools_list(&self) -> Value {
        serde_json::json!({ "tools": tool_catalog() })
    }

    pub async fn handle_tools_call(&self, name: &str, args: Value) -> Value {
        let outcome = match validate_tool_args(name, &args) {
            Ok(()) => self.app.tool_executor.execute(name, args).await,
            Err(err) => Err(err),
        };
        match outcome {
            Ok(result) => tool_call_success(&result),
            Err(err) => tool_call_fault(&err),
        }
    }

    async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.jsonrpc != "2.0" {
            return request.id.map(|id| {
                protocol_failure(
                    id,
                    McpError::new(ErrorCode::InvalidRequest, "Unsupported JSON-RPC version"),
                )
            });
        }

        match request.method.as_str() {
            _ if request.method.starts_with("notifications/") => None,
            "initialize" => request
                .id
                .map(|id| JsonRpcResponse::success(id, self.handle_initialize())),
            "tools/list" => request
                .id
                .map(|id| JsonRpcResponse::success(id, self.handle_tools_list())),
            "tools/call" => {
                let id = request.id?;
                let params = request.params.as_object().cloned().unwrap_or_default();
                let name = params.get("name").and_then(|v| v.as_str()).unwrap_or("");
                if name.is_empty() {
                    return Some(protocol_failure(
                        id,
                        McpError::new(ErrorCode::InvalidParams, "Missing tool name"),
                    ));
                }
                let args = params
                    .get("arguments")
                    .cloned()
                    .unwrap_or_else(|| Value::Object(Default::default()));
                Some(JsonRpcResponse::success(
                    id,
                    self.handle_tools_call(name, args).await,
                ))
            }
            _ => request.id.map(|id| {
                protocol_failure(
                    id,
                    McpError::new(ErrorCode::MethodNotFound, "Method not found"),
                )
            }),
        }
    }

    pub async fn run_stdio(&self) -> Result<(), ToolError> {
        let stdin = tokio::io::stdin();
        let stdout = tokio::io::stdout();
        let mut reader = BufReader::new(stdin).lines();
        let mut writer = BufWriter::new(stdout);

        while let Some(line) = reader
            .next_line()
            .await
            .map_err(|err| ToolError::internal(err.to_string()))?
        {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let response = match serde_json::from_str::<JsonRpcRequest>(trimmed) {
                Ok(request) => self.handle_request(request).await,
                Err(_) => {
                    let error = if serde_json::from_str::<Value>(trimmed).is_ok() {
                        McpError::new(ErrorCode::InvalidRequest, "Invalid request")
                    } else {
                        McpError::new(ErrorCode::ParseError, "Parse error")
                    };
                    Some(protocol_failure(Value::Null, error))
                }
            };

            if let Some(response) = response {
                let payload = serde_json::to_string(&response).unwrap_or_default();
                writer.write_all(payload.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        Ok(())
    }
}

pub async fn run_stdio() -> Result<(), ToolError> {
    let server = McpServer::new().await?;
    server.run_stdio().await
}
