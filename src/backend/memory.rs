//! In-process backend: named caches of string entries with per-entry expiry.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use super::{BackendError, BackendReply, CacheBackend};

#[derive(Debug)]
struct Entry {
    value: String,
    expires_at: Instant,
}

#[derive(Debug, Default)]
struct Namespaces {
    /// Creation order, for enumeration.
    order: Vec<String>,
    caches: HashMap<String, HashMap<String, Entry>>,
}

#[derive(Debug)]
pub struct MemoryBackend {
    default_ttl: Duration,
    max_caches: Option<usize>,
    state: RwLock<Namespaces>,
}

impl MemoryBackend {
    /// Validate the credential and build an empty backend.
    pub fn connect(api_key: &str, default_ttl: Duration) -> Result<Self, BackendError> {
        if api_key.trim().is_empty() {
            return Err(BackendError::Authentication("API key is empty".into()));
        }

        Ok(Self {
            default_ttl,
            max_caches: None,
            state: RwLock::new(Namespaces::default()),
        })
    }

    /// Cap the number of caches; creating more is `LimitExceeded`.
    pub fn with_max_caches(mut self, max_caches: Option<usize>) -> Self {
        self.max_caches = max_caches;
        self
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn fetch(&self, cache: &str, key: &str) -> Result<BackendReply, BackendError> {
        let mut state = self.state.write().await;
        let entries = state
            .caches
            .get_mut(cache)
            .ok_or_else(|| BackendError::CacheNotFound(cache.to_string()))?;

        let expired = match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => {
                return Ok(BackendReply::Hit(entry.value.clone()));
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.remove(key);
        }
        Ok(BackendReply::Miss)
    }

    async fn store(
        &self,
        cache: &str,
        key: &str,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<BackendReply, BackendError> {
        let ttl = ttl.unwrap_or(self.default_ttl);
        let expires_at = Instant::now()
            .checked_add(ttl)
            .ok_or_else(|| {
                BackendError::LimitExceeded(format!("TTL of {}s is too large", ttl.as_secs()))
            })?;

        let mut state = self.state.write().await;
        let entries = state
            .caches
            .get_mut(cache)
            .ok_or_else(|| BackendError::CacheNotFound(cache.to_string()))?;

        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(BackendReply::Success)
    }

    async fn create_cache(&self, name: &str) -> Result<BackendReply, BackendError> {
        let mut state = self.state.write().await;
        if state.caches.contains_key(name) {
            return Ok(BackendReply::Success);
        }

        if let Some(max) = self.max_caches {
            if state.caches.len() >= max {
                return Err(BackendError::LimitExceeded(format!(
                    "cache limit of {max} reached"
                )));
            }
        }

        state.caches.insert(name.to_string(), HashMap::new());
        state.order.push(name.to_string());
        Ok(BackendReply::Success)
    }

    async fn delete_cache(&self, name: &str) -> Result<BackendReply, BackendError> {
        let mut state = self.state.write().await;
        if state.caches.remove(name).is_none() {
            return Err(BackendError::CacheNotFound(name.to_string()));
        }
        state.order.retain(|n| n != name);
        Ok(BackendReply::Success)
    }

    async fn list_caches(&self) -> Result<BackendReply, BackendError> {
        let state = self.state.read().await;
        Ok(BackendReply::CacheList(state.order.clone()))
    }
}
