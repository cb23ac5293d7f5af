use thiserror::Error;

use satchel_core::DomainError;

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Persistence operation error.
///
/// These are storage and encoding failures, as opposed to domain errors
/// (which are wrapped when a restore trips over one).
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("io error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Captured state does not have the expected shape.
    #[error("invalid state for '{key}': {reason}")]
    InvalidState { key: String, reason: String },

    #[error("invalid save name '{0}'")]
    InvalidName(String),

    #[error("save store lock poisoned")]
    Poisoned,
}

impl PersistenceError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_state(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidState {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
