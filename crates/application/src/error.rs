//! Application-level errors.

use domain::error::DomainError;
use serde::Serialize;
use validator::ValidationErrors;

pub type Result<T> = std::result::Result<T, ApplicationError>;

/// Record of one input key the distribution job could not fully process.
///
/// The index points back into the submitted batch so callers can retry
/// exactly the keys that failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedKey {
    pub index: usize,
    pub message: String,
}

/// Errors that can occur in the application layer.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error("validation error occurred")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("no unit file for gear {id}")]
    MissingUnitFile { id: String },
    #[error("no repository for gear {id}")]
    MissingRepository { id: String },

    #[error("not all keys were completed")]
    KeysNotCompleted(Vec<FailedKey>),

    #[error("internal error: {0}")]
    Internal(Box<dyn std::error::Error + Send + Sync>),
}

impl ApplicationError {
    pub fn internal<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Internal(Box::new(err))
    }
}

pub trait ToInternal<T> {
    fn catch(self) -> Result<T>;
}

impl<T, E> ToInternal<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn catch(self) -> Result<T> {
        self.map_err(|e| ApplicationError::Internal(Box::new(e)))
    }
}
