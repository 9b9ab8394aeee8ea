use async_trait::async_trait;
use serde_json::Value;

use crate::outcome::CacheOperationResult;
use crate::protocol::CacheNameParams;
use crate::registry::{Tool, ToolContext};
use crate::schema::{parse_args, ValidationError};

pub struct DeleteCacheTool;

#[async_trait]
impl Tool for DeleteCacheTool {
    fn name(&self) -> &'static str {
        "delete-cache"
    }

    fn description(&self) -> &'static str {
        "Delete a cache and every entry in it"
    }

    fn input_schema(&self) -> Value {
        super::name_schema("The name of the cache to delete")
    }

    async fn call(
        &self,
        args: Value,
        ctx: &ToolContext,
    ) -> Result<CacheOperationResult, ValidationError> {
        let params: CacheNameParams = parse_args(args)?;
        Ok(ctx.adapter.delete_cache(&params.name).await)
    }
}
