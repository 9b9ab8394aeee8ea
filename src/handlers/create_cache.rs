use async_trait::async_trait;
use serde_json::Value;

use crate::outcome::CacheOperationResult;
use crate::protocol::CacheNameParams;
use crate::registry::{Tool, ToolContext};
use crate::schema::{parse_args, ValidationError};

/// `create-cache`: idempotent, an existing cache reports success.
pub struct CreateCacheTool;

#[async_trait]
impl Tool for CreateCacheTool {
    fn name(&self) -> &'static str {
        "create-cache"
    }

    fn description(&self) -> &'static str {
        "Create a cache"
    }

    fn input_schema(&self) -> Value {
        super::name_schema("The name of the cache to create")
    }

    async fn call(
        &self,
        args: Value,
        ctx: &ToolContext,
    ) -> Result<CacheOperationResult, ValidationError> {
        let params: CacheNameParams = parse_args(args)?;
        Ok(ctx.adapter.create_cache(&params.name).await)
    }
}
