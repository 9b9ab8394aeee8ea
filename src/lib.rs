//! MCP server exposing a key-value cache to AI agents.
//!
//! Exposes `get` and `set` (plus `list-caches`, `create-cache`, and
//! `delete-cache` in multi-cache mode) over JSON-RPC 2.0 stdio transport.
//! Every tool call yields a single text block such as `Status: HIT\nValue: ...`,
//! whether the backend succeeded, missed, or failed.

pub mod adapter;
pub mod backend;
pub mod config;
pub mod defaults;
pub mod error;
pub mod handlers;
pub mod outcome;
pub mod protocol;
pub mod registry;
pub mod server;

pub mod schema;

use std::sync::Arc;

use crate::adapter::CacheAdapter;
use crate::backend::{BackendReply, CacheBackend, MemoryBackend};
use crate::config::{CacheMode, ServerConfig};
use crate::error::StartupError;
use crate::registry::{ToolContext, ToolRegistry};
use crate::server::McpServer;

/// Connect the bundled backend described by `config`.
pub fn connect_backend(config: &ServerConfig) -> Result<Arc<dyn CacheBackend>, StartupError> {
    let backend = MemoryBackend::connect(&config.api_key, config.defaults.ttl())?
        .with_max_caches(config.max_caches);
    Ok(Arc::new(backend))
}

/// Build a ready-to-run server on top of `backend`.
///
/// In single-cache mode the default cache is created first; creation is
/// idempotent, so an existing cache is fine.
pub async fn build_server(
    config: &ServerConfig,
    backend: Arc<dyn CacheBackend>,
) -> Result<McpServer, StartupError> {
    if config.mode == CacheMode::Single {
        let reply = backend.create_cache(config.defaults.cache_name()).await?;
        if reply != BackendReply::Success {
            tracing::warn!(?reply, "unexpected reply while creating the default cache");
        }
    }

    let context = ToolContext {
        adapter: CacheAdapter::new(backend),
        defaults: config.defaults.clone(),
    };
    let registry = ToolRegistry::for_mode(context, config.mode)?;

    tracing::info!(
        mode = ?config.mode,
        cache = config.defaults.cache_name(),
        default_ttl_secs = config.defaults.ttl().as_secs(),
        tools = registry.descriptors().len(),
        "cache server ready"
    );

    Ok(McpServer::new(registry))
}
