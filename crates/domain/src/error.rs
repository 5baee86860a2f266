//! Custom error handler for domain (core).

use crate::key::public_key::KeyError;

pub type Result<T> = std::result::Result<T, DomainError>;

/// Enum representing custom domain errors.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("identifier must carry the 'gear_' prefix")]
    MissingIdentifierPrefix,
    #[error("identifier must be lowercase alphanumeric and at most 32 characters length")]
    InvalidIdentifierFormat,

    #[error(transparent)]
    PublicKey(#[from] KeyError),
}
