//! Tool registration, advertisement, and invocation.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::adapter::CacheAdapter;
use crate::config::CacheMode;
use crate::defaults::ProcessDefaults;
use crate::handlers::{create_cache, delete_cache, get, list_caches, set};
use crate::outcome::CacheOperationResult;
use crate::protocol::{McpErrorCode, McpErrorResponse, ToolResult};
use crate::schema::{SchemaError, ToolSchema, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("duplicate tool registration: {0}")]
    DuplicateTool(String),

    #[error("invalid input schema for tool {tool}: {source}")]
    Schema {
        tool: String,
        #[source]
        source: SchemaError,
    },
}

/// Shared, read-only state every tool call runs against.
#[derive(Clone)]
pub struct ToolContext {
    pub adapter: CacheAdapter,
    pub defaults: ProcessDefaults,
}

/// A named, schema-described cache operation.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// JSON Schema for the tool's arguments.
    fn input_schema(&self) -> Value;

    /// Run the tool on arguments that already passed `input_schema`.
    async fn call(
        &self,
        args: Value,
        ctx: &ToolContext,
    ) -> Result<CacheOperationResult, ValidationError>;
}

/// Advertised form of a tool (`tools/list` entry).
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor<'a> {
    pub name: &'a str,
    pub description: &'a str,
    #[serde(rename = "inputSchema")]
    pub input_schema: &'a Value,
}

struct RegisteredTool {
    tool: Box<dyn Tool>,
    schema: ToolSchema,
}

/// Tools keyed by unique name, in registration order. Immutable once serving.
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    context: ToolContext,
}

impl ToolRegistry {
    pub fn new(context: ToolContext) -> Self {
        Self {
            tools: Vec::new(),
            context,
        }
    }

    /// Build the registry with the tool set for `mode`.
    pub fn for_mode(context: ToolContext, mode: CacheMode) -> Result<Self, RegistryError> {
        let mut registry = Self::new(context);
        match mode {
            CacheMode::Single => {
                registry.register(Box::new(get::GetTool::single()))?;
                registry.register(Box::new(set::SetTool::single()))?;
            }
            CacheMode::Multi => {
                registry.register(Box::new(get::GetTool::multi()))?;
                registry.register(Box::new(set::SetTool::multi()))?;
                registry.register(Box::new(list_caches::ListCachesTool))?;
                registry.register(Box::new(create_cache::CreateCacheTool))?;
                registry.register(Box::new(delete_cache::DeleteCacheTool))?;
            }
        }
        Ok(registry)
    }

    /// Register a tool, compiling its schema. Names must be unique.
    pub fn register(&mut self, tool: Box<dyn Tool>) -> Result<(), RegistryError> {
        let name = tool.name();
        if self.tools.iter().any(|t| t.tool.name() == name) {
            return Err(RegistryError::DuplicateTool(name.to_string()));
        }

        let schema =
            ToolSchema::compile(tool.input_schema()).map_err(|source| RegistryError::Schema {
                tool: name.to_string(),
                source,
            })?;

        self.tools.push(RegisteredTool { tool, schema });
        Ok(())
    }

    pub fn descriptors(&self) -> Vec<ToolDescriptor<'_>> {
        self.tools
            .iter()
            .map(|t| ToolDescriptor {
                name: t.tool.name(),
                description: t.tool.description(),
                input_schema: t.schema.as_json(),
            })
            .collect()
    }

    /// Validate and run a tool call. Total: every input yields a result.
    pub async fn call(&self, name: &str, arguments: Option<Value>) -> ToolResult {
        let Some(entry) = self.find(name) else {
            let message = format!("Unknown tool: {name}");
            return McpErrorResponse::new(McpErrorCode::UnknownTool, message).into();
        };

        match self.invoke(entry, arguments).await {
            Ok(result) => result.into(),
            Err(err) => {
                tracing::debug!(tool = name, error = %err, "rejected tool arguments");
                McpErrorResponse::new(
                    McpErrorCode::InvalidArguments,
                    format!("Invalid arguments for {name}: {err}"),
                )
                .into()
            }
        }
    }

    async fn invoke(
        &self,
        entry: &RegisteredTool,
        arguments: Option<Value>,
    ) -> Result<CacheOperationResult, ValidationError> {
        let args = arguments.unwrap_or_else(|| Value::Object(Default::default()));
        entry.schema.validate(&args)?;
        entry.tool.call(args, &self.context).await
    }

    fn find(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.iter().find(|t| t.tool.name() == name)
    }
}
