//! Recording backend double shared by integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use mcp_cache_server::adapter::CacheAdapter;
use mcp_cache_server::backend::{BackendError, BackendReply, CacheBackend};
use mcp_cache_server::config::CacheMode;
use mcp_cache_server::defaults::ProcessDefaults;
use mcp_cache_server::registry::{ToolContext, ToolRegistry};

pub const DEFAULT_CACHE: &str = "default-cache";

/// A backend call as the double observed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Fetch { cache: String, key: String },
    Store { cache: String, key: String, value: String, ttl: Option<Duration> },
    CreateCache(String),
    DeleteCache(String),
    ListCaches,
}

/// Records every call and answers each with the same scripted reply.
pub struct RecordingBackend {
    calls: Mutex<Vec<Call>>,
    reply: Mutex<Result<BackendReply, BackendError>>,
}

impl RecordingBackend {
    pub fn replying(reply: Result<BackendReply, BackendError>) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            reply: Mutex::new(reply),
        })
    }

    pub fn set_reply(&self, reply: Result<BackendReply, BackendError>) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: Call) -> Result<BackendReply, BackendError> {
        self.calls.lock().unwrap().push(call);
        self.reply.lock().unwrap().clone()
    }
}

#[async_trait]
impl CacheBackend for RecordingBackend {
    async fn fetch(&self, cache: &str, key: &str) -> Result<BackendReply, BackendError> {
        self.record(Call::Fetch {
            cache: cache.into(),
            key: key.into(),
        })
    }

    async fn store(
        &self,
        cache: &str,
        key: &str,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<BackendReply, BackendError> {
        self.record(Call::Store {
            cache: cache.into(),
            key: key.into(),
            value: value.into(),
            ttl,
        })
    }

    async fn create_cache(&self, name: &str) -> Result<BackendReply, BackendError> {
        self.record(Call::CreateCache(name.into()))
    }

    async fn delete_cache(&self, name: &str) -> Result<BackendReply, BackendError> {
        self.record(Call::DeleteCache(name.into()))
    }

    async fn list_caches(&self) -> Result<BackendReply, BackendError> {
        self.record(Call::ListCaches)
    }
}

pub fn registry(backend: Arc<RecordingBackend>, mode: CacheMode) -> ToolRegistry {
    let context = ToolContext {
        adapter: CacheAdapter::new(backend),
        defaults: ProcessDefaults::new(DEFAULT_CACHE, Duration::from_secs(60)),
    };
    ToolRegistry::for_mode(context, mode).unwrap()
}
