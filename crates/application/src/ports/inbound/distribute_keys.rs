//! Key distribution inbound port.

use crate::dto::DistributeKeysRequest;
use crate::error::Result;

/// Inbound port for the key distribution job.
pub trait DistributeKeys: Send + Sync {
    /// Install every key of the batch and grant the requested access.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ApplicationError::Validation`] before any
    /// mutation when the batch is malformed, and
    /// [`crate::error::ApplicationError::KeysNotCompleted`] with one record
    /// per failed key index when parts of the batch could not be applied.
    fn execute(&self, request: &DistributeKeysRequest) -> Result<()>;
}
