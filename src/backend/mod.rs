//! Contract consumed from the cache backend.
//!
//! The backend owns all cached data, expiry, and namespacing. This layer only
//! issues single requests and interprets the reply tags.

pub mod memory;

use std::time::Duration;

use async_trait::async_trait;

pub use memory::MemoryBackend;

/// Reply tags a backend may return.
///
/// `Other` carries any tag this layer does not model (a newer backend, or an
/// operation-specific reply showing up where it does not belong).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendReply {
    Hit(String),
    Miss,
    Success,
    CacheList(Vec<String>),
    Other { kind: String, detail: String },
}

/// Failures reported by the backend itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("cache not found: {0}")]
    CacheNotFound(String),

    #[error("{0}")]
    LimitExceeded(String),

    #[error("{0}")]
    Unavailable(String),

    #[error("{0}")]
    Internal(String),
}

impl BackendError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Authentication(_) => "authentication",
            Self::CacheNotFound(_) => "cache_not_found",
            Self::LimitExceeded(_) => "limit_exceeded",
            Self::Unavailable(_) => "unavailable",
            Self::Internal(_) => "internal",
        }
    }
}

/// A networked key-value cache with named caches and per-entry TTL.
///
/// Implementations must accept concurrent outstanding requests.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Read `key` from `cache`: `Hit` or `Miss`.
    async fn fetch(&self, cache: &str, key: &str) -> Result<BackendReply, BackendError>;

    /// Write `key` into `cache`. `ttl = None` means the backend default.
    async fn store(
        &self,
        cache: &str,
        key: &str,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<BackendReply, BackendError>;

    /// Create a cache. Creating an existing cache succeeds.
    async fn create_cache(&self, name: &str) -> Result<BackendReply, BackendError>;

    async fn delete_cache(&self, name: &str) -> Result<BackendReply, BackendError>;

    /// Enumerate caches as `CacheList`, in backend order.
    async fn list_caches(&self) -> Result<BackendReply, BackendError>;
}
