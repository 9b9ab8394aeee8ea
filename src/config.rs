use std::time::Duration;

use crate::defaults::ProcessDefaults;

/// Default cache name when `MCP_CACHE_NAME` is unset.
pub const DEFAULT_CACHE_NAME: &str = "mcp-cache";

/// Default entry time-to-live (60 seconds).
const DEFAULT_TTL_SECS: u64 = 60;

const ENV_API_KEY: &str = "MCP_CACHE_API_KEY";
const ENV_CACHE_NAME: &str = "MCP_CACHE_NAME";
const ENV_DEFAULT_TTL: &str = "MCP_CACHE_DEFAULT_TTL_SECONDS";
const ENV_MODE: &str = "MCP_CACHE_MODE";
const ENV_MAX_CACHES: &str = "MCP_CACHE_MAX_CACHES";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required configuration: {0} is not set")]
    Missing(&'static str),

    #[error("invalid configuration: {field} {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Which tool set the server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheMode {
    /// `get` and `set` against the default cache only.
    #[default]
    Single,
    /// Per-call `cacheName` override plus cache administration tools.
    Multi,
}

impl CacheMode {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "multi" => Ok(Self::Multi),
            other => Err(ConfigError::Invalid {
                field: ENV_MODE,
                reason: format!("must be `single` or `multi`, got `{other}`"),
            }),
        }
    }
}

/// Server configuration loaded from environment variables.
#[derive(Clone)]
pub struct ServerConfig {
    pub api_key: String,
    pub defaults: ProcessDefaults,
    pub mode: CacheMode,
    pub max_caches: Option<usize>,
}

// Keeps the credential out of logs.
impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("api_key", &"<redacted>")
            .field("defaults", &self.defaults)
            .field("mode", &self.mode)
            .field("max_caches", &self.max_caches)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment.
    ///
    /// - `MCP_CACHE_API_KEY` (required): backend credential
    /// - `MCP_CACHE_NAME` (optional, default `mcp-cache`): default cache
    /// - `MCP_CACHE_DEFAULT_TTL_SECONDS` (optional, default 60): default entry TTL
    /// - `MCP_CACHE_MODE` (optional, default `single`): `single` or `multi`
    /// - `MCP_CACHE_MAX_CACHES` (optional): cache quota of the bundled backend
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let api_key = read(ENV_API_KEY).ok_or(ConfigError::Missing(ENV_API_KEY))?;

        let cache_name = match read(ENV_CACHE_NAME) {
            Some(val) => val.trim().to_string(),
            None => {
                tracing::warn!("{ENV_CACHE_NAME} is not set, using default `{DEFAULT_CACHE_NAME}`");
                DEFAULT_CACHE_NAME.to_string()
            }
        };
        if cache_name.is_empty() {
            return Err(ConfigError::Invalid {
                field: ENV_CACHE_NAME,
                reason: "must not be blank".into(),
            });
        }

        let ttl_secs = match read(ENV_DEFAULT_TTL) {
            Some(val) => match val.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        field: ENV_DEFAULT_TTL,
                        reason: "must be a positive integer".into(),
                    })
                }
            },
            None => {
                tracing::warn!("{ENV_DEFAULT_TTL} is not set, using default {DEFAULT_TTL_SECS}");
                DEFAULT_TTL_SECS
            }
        };

        let mode = match read(ENV_MODE) {
            Some(val) => CacheMode::parse(&val)?,
            None => CacheMode::default(),
        };

        let max_caches = match read(ENV_MAX_CACHES) {
            Some(val) => Some(val.trim().parse::<usize>().map_err(|_| ConfigError::Invalid {
                field: ENV_MAX_CACHES,
                reason: "must be a non-negative integer".into(),
            })?),
            None => None,
        };

        Ok(Self {
            api_key,
            defaults: ProcessDefaults::new(cache_name, Duration::from_secs(ttl_secs)),
            mode,
            max_caches,
        })
    }
}
