//! Process-wide defaults and per-call resolution of cache operations.

use std::time::Duration;

/// Defaults shared by every tool call, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessDefaults {
    cache_name: String,
    ttl: Duration,
}

impl ProcessDefaults {
    /// `cache_name` must be non-empty and `ttl` non-zero; `ServerConfig`
    /// rejects anything else before this is built.
    pub fn new(cache_name: impl Into<String>, ttl: Duration) -> Self {
        Self {
            cache_name: cache_name.into(),
            ttl,
        }
    }

    pub fn cache_name(&self) -> &str {
        &self.cache_name
    }

    /// Default entry lifetime, handed to the backend at construction.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Resolve a key operation against the defaults.
    ///
    /// A missing cache name falls back to the default cache. A missing TTL
    /// stays `None` so the backend's own default applies.
    pub fn resolve(
        &self,
        cache_name: Option<String>,
        key: String,
        value: Option<String>,
        ttl: Option<Duration>,
    ) -> CacheKeyOperation {
        CacheKeyOperation {
            cache_name: cache_name.unwrap_or_else(|| self.cache_name.clone()),
            key,
            value,
            ttl,
        }
    }
}

/// A fully resolved key-level cache operation. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKeyOperation {
    pub cache_name: String,
    pub key: String,
    pub value: Option<String>,
    pub ttl: Option<Duration>,
}
