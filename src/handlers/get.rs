use async_trait::async_trait;
use serde_json::{json, Value};

use crate::outcome::CacheOperationResult;
use crate::protocol::GetParams;
use crate::registry::{Tool, ToolContext};
use crate::schema::{parse_args, ValidationError};

/// `get`: read a key, from the default cache unless `cacheName` is allowed and given.
pub struct GetTool {
    cache_override: bool,
}

impl GetTool {
    pub fn single() -> Self {
        Self { cache_override: false }
    }

    pub fn multi() -> Self {
        Self { cache_override: true }
    }
}

#[async_trait]
impl Tool for GetTool {
    fn name(&self) -> &'static str {
        "get"
    }

    fn description(&self) -> &'static str {
        "Get a key-value pair from the cache"
    }

    fn input_schema(&self) -> Value {
        let mut properties = json!({
            "key": {
                "type": "string",
                "description": "The key to get from the cache"
            }
        });
        if self.cache_override {
            properties["cacheName"] = super::cache_name_property();
        }

        json!({
            "type": "object",
            "required": ["key"],
            "additionalProperties": false,
            "properties": properties
        })
    }

    async fn call(
        &self,
        args: Value,
        ctx: &ToolContext,
    ) -> Result<CacheOperationResult, ValidationError> {
        let params: GetParams = parse_args(args)?;
        let op = ctx.defaults.resolve(params.cache_name, params.key, None, None);
        Ok(ctx.adapter.get(&op).await)
    }
}
