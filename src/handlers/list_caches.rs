use async_trait::async_trait;
use serde_json::{json, Value};

use crate::outcome::CacheOperationResult;
use crate::registry::{Tool, ToolContext};
use crate::schema::ValidationError;

/// `list-caches`: enumerate caches in the backend's order. Takes no arguments.
pub struct ListCachesTool;

#[async_trait]
impl Tool for ListCachesTool {
    fn name(&self) -> &'static str {
        "list-caches"
    }

    fn description(&self) -> &'static str {
        "List all caches"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "additionalProperties": false,
            "properties": {}
        })
    }

    async fn call(
        &self,
        _args: Value,
        ctx: &ToolContext,
    ) -> Result<CacheOperationResult, ValidationError> {
        Ok(ctx.adapter.list_caches().await)
    }
}
