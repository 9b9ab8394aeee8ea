use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::outcome::CacheOperationResult;
use crate::protocol::SetParams;
use crate::registry::{Tool, ToolContext};
use crate::schema::{parse_args, ValidationError};

/// `set`: store a key with an optional TTL override.
pub struct SetTool {
    cache_override: bool,
}

impl SetTool {
    pub fn single() -> Self {
        Self { cache_override: false }
    }

    pub fn multi() -> Self {
        Self { cache_override: true }
    }
}

#[async_trait]
impl Tool for SetTool {
    fn name(&self) -> &'static str {
        "set"
    }

    fn description(&self) -> &'static str {
        "Set a key-value pair in the cache"
    }

    fn input_schema(&self) -> Value {
        let mut properties = json!({
            "key": {
                "type": "string",
                "description": "The key to set in the cache"
            },
            "value": {
                "type": "string",
                "description": "The value to set in the cache"
            },
            "ttl": {
                "type": "number",
                "exclusiveMinimum": 0,
                "description": "The TTL for the key in seconds"
            }
        });
        if self.cache_override {
            properties["cacheName"] = super::cache_name_property();
        }

        json!({
            "type": "object",
            "required": ["key", "value"],
            "additionalProperties": false,
            "properties": properties
        })
    }

    async fn call(
        &self,
        args: Value,
        ctx: &ToolContext,
    ) -> Result<CacheOperationResult, ValidationError> {
        let params: SetParams = parse_args(args)?;
        let ttl = params.ttl.map(ttl_from_secs).transpose()?;
        let op = ctx
            .defaults
            .resolve(params.cache_name, params.key, Some(params.value), ttl);
        Ok(ctx.adapter.set(&op).await)
    }
}

fn ttl_from_secs(secs: f64) -> Result<Duration, ValidationError> {
    if secs.is_nan() || secs <= 0.0 {
        return Err(ValidationError::new("ttl must be greater than 0"));
    }
    let ttl = Duration::try_from_secs_f64(secs)
        .map_err(|e| ValidationError::new(format!("ttl {secs} is out of range: {e}")))?;
    // sub-nanosecond values round down to zero
    if ttl.is_zero() {
        return Err(ValidationError::new("ttl must be greater than 0"));
    }
    Ok(ttl)
}
