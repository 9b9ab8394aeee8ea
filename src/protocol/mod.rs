pub mod request;
pub mod response;

pub use request::{CacheNameParams, GetParams, JsonRpcRequest, RpcId, SetParams, ToolCallParams};
pub use response::{
    JsonRpcError, JsonRpcResponse, McpErrorCode, McpErrorResponse, ToolResult, ToolResultContent,
};
