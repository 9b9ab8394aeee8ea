//! One backend call per tool call, captured as a `CacheOperationResult`.

use std::sync::Arc;

use crate::backend::{BackendError, BackendReply, CacheBackend};
use crate::defaults::CacheKeyOperation;
use crate::outcome::CacheOperationResult;

/// Translates resolved operations into backend calls.
///
/// Never fails: backend errors and unexpected reply tags become result cases.
#[derive(Clone)]
pub struct CacheAdapter {
    backend: Arc<dyn CacheBackend>,
}

impl CacheAdapter {
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self { backend }
    }

    pub async fn get(&self, op: &CacheKeyOperation) -> CacheOperationResult {
        let reply = self.backend.fetch(&op.cache_name, &op.key).await;
        interpret("get", reply, |reply| match reply {
            BackendReply::Hit(value) => Ok(CacheOperationResult::Hit(value)),
            BackendReply::Miss => Ok(CacheOperationResult::Miss),
            other => Err(other),
        })
    }

    pub async fn set(&self, op: &CacheKeyOperation) -> CacheOperationResult {
        let value = op.value.as_deref().unwrap_or_default();
        let reply = self
            .backend
            .store(&op.cache_name, &op.key, value, op.ttl)
            .await;
        interpret("set", reply, expect_success)
    }

    pub async fn list_caches(&self) -> CacheOperationResult {
        let reply = self.backend.list_caches().await;
        interpret("list-caches", reply, |reply| match reply {
            BackendReply::CacheList(names) => Ok(CacheOperationResult::SuccessWithList(names)),
            other => Err(other),
        })
    }

    pub async fn create_cache(&self, name: &str) -> CacheOperationResult {
        let reply = self.backend.create_cache(name).await;
        interpret("create-cache", reply, expect_success)
    }

    pub async fn delete_cache(&self, name: &str) -> CacheOperationResult {
        let reply = self.backend.delete_cache(name).await;
        interpret("delete-cache", reply, expect_success)
    }
}

fn expect_success(reply: BackendReply) -> Result<CacheOperationResult, BackendReply> {
    match reply {
        BackendReply::Success => Ok(CacheOperationResult::Success),
        other => Err(other),
    }
}

/// Map a backend reply through `accept`; anything it hands back is unrecognized.
fn interpret<F>(
    operation: &'static str,
    reply: Result<BackendReply, BackendError>,
    accept: F,
) -> CacheOperationResult
where
    F: FnOnce(BackendReply) -> Result<CacheOperationResult, BackendReply>,
{
    match reply {
        Ok(reply) => accept(reply).unwrap_or_else(|unexpected| {
            let raw = describe(&unexpected);
            tracing::warn!(operation, reply = %raw, "unrecognized backend reply");
            CacheOperationResult::Unrecognized(raw)
        }),
        Err(err) => {
            tracing::warn!(operation, kind = err.kind(), error = %err, "backend error");
            CacheOperationResult::BackendError(err.to_string())
        }
    }
}

fn describe(reply: &BackendReply) -> String {
    match reply {
        BackendReply::Other { kind, detail } => format!("{kind}: {detail}"),
        known => format!("{known:?}"),
    }
}
