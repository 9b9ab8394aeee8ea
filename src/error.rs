use crate::backend::BackendError;
use crate::config::ConfigError;
use crate::registry::RegistryError;
use crate::server::ServerError;

/// Fatal failures; the process exits non-zero on any of these.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("tool registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("fatal error: {0}")]
    Server(#[from] ServerError),
}
