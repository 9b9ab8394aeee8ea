pub mod create_cache;
pub mod delete_cache;
pub mod get;
pub mod list_caches;
pub mod set;

use serde_json::{json, Value};

use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, ToolCallParams};
use crate::registry::ToolRegistry;

/// Dispatch a JSON-RPC request to the appropriate handler.
///
/// Returns `None` for notifications (no response required).
pub async fn dispatch(req: &JsonRpcRequest, registry: &ToolRegistry) -> Option<JsonRpcResponse> {
    match req.method.as_str() {
        "initialize" => {
            let result = json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": "mcp-cache-server",
                    "version": env!("CARGO_PKG_VERSION")
                }
            });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "notifications/initialized" => None,

        "ping" => Some(JsonRpcResponse::success(req.id.clone(), json!({}))),

        "tools/list" => {
            let result = json!({ "tools": registry.descriptors() });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "tools/call" => {
            let params: ToolCallParams = match &req.params {
                Some(v) => match serde_json::from_value(v.clone()) {
                    Ok(p) => p,
                    Err(e) => {
                        return Some(JsonRpcResponse::error(
                            req.id.clone(),
                            JsonRpcError::invalid_params(format!("Invalid tools/call params: {e}")),
                        ));
                    }
                },
                None => {
                    return Some(JsonRpcResponse::error(
                        req.id.clone(),
                        JsonRpcError::invalid_params("Missing params for tools/call"),
                    ));
                }
            };

            let tool_result = registry.call(&params.name, params.arguments).await;
            match serde_json::to_value(&tool_result) {
                Ok(result) => Some(JsonRpcResponse::success(req.id.clone(), result)),
                Err(e) => {
                    tracing::error!(
                        tool = %params.name,
                        error = %e,
                        "failed to serialize tool result"
                    );
                    Some(JsonRpcResponse::error(
                        req.id.clone(),
                        JsonRpcError::internal_error("Failed to serialize tool result"),
                    ))
                }
            }
        }

        _ => Some(JsonRpcResponse::error(
            req.id.clone(),
            JsonRpcError::method_not_found(&req.method),
        )),
    }
}

/// Optional per-call cache override.
fn cache_name_property() -> Value {
    json!({
        "type": "string",
        "minLength": 1,
        "description": "The cache to use; defaults to the server's configured cache"
    })
}

/// Schema for tools taking a single required cache `name`.
fn name_schema(description: &str) -> Value {
    json!({
        "type": "object",
        "required": ["name"],
        "additionalProperties": false,
        "properties": {
            "name": {
                "type": "string",
                "minLength": 1,
                "description": description
            }
        }
    })
}
