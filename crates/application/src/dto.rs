//! Data Transfer Objects for the gearauth jobs.
//!
//! DTOs are used to transfer data between the dispatch layer and the use
//! cases without exposing domain entities.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use domain::gear::id::ContainerId;

/// Algorithm tags accepted for submitted keys.
pub const KEY_KINDS: [&str; 3] = ["ssh-rsa", "ssh-dsa", "ssh-ecdsa"];

/// One caller-submitted public key.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct KeyInput {
    /// Algorithm tag of the submitted key.
    #[serde(rename = "type")]
    #[validate(custom(
        function = "validate_key_kind",
        message = "type must be one of 'ssh-rsa', 'ssh-dsa' or 'ssh-ecdsa'"
    ))]
    pub kind: String,
    /// OpenSSH-encoded key material.
    #[validate(length(min = 1, message = "value must be specified"))]
    pub value: String,
}

/// Grant: a key may access a gear repository.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RepositoryGrant {
    #[validate(custom(
        function = "validate_target_id",
        message = "id must be a well-formed container identifier"
    ))]
    pub id: String,
    /// Read-write when set, read-only otherwise.
    #[serde(default)]
    pub write: bool,
}

/// Grant: a key may access a running gear.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GearGrant {
    #[validate(custom(
        function = "validate_target_id",
        message = "id must be a well-formed container identifier"
    ))]
    pub id: String,
}

/// Batch request installing keys and granting them access.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DistributeKeysRequest {
    /// User the batch is submitted on behalf of.
    pub user_id: String,
    #[validate(
        length(min = 1, message = "one or more keys must be specified"),
        nested
    )]
    pub keys: Vec<KeyInput>,
    #[serde(default)]
    #[validate(nested)]
    pub repositories: Vec<RepositoryGrant>,
    #[serde(default)]
    #[validate(nested)]
    pub gears: Vec<GearGrant>,
}

impl DistributeKeysRequest {
    /// Validate the whole batch before any mutation.
    ///
    /// # Errors
    ///
    /// Returns `Err` when a key or grant is malformed, when the batch
    /// holds no key, or when it names no target at all. Nothing is ever
    /// partially applied on validation failure.
    pub fn check(&self) -> std::result::Result<(), ValidationErrors> {
        self.validate()?;

        if self.repositories.is_empty() && self.gears.is_empty() {
            let mut errors = ValidationErrors::new();
            errors.add(
                "repositories",
                ValidationError::new("missing_targets").with_message(
                    "either repositories or gears must be specified".into(),
                ),
            );
            return Err(errors);
        }

        Ok(())
    }
}

fn validate_key_kind(kind: &str) -> std::result::Result<(), ValidationError> {
    if KEY_KINDS.contains(&kind) {
        Ok(())
    } else {
        Err(ValidationError::new("key_kind"))
    }
}

fn validate_target_id(id: &str) -> std::result::Result<(), ValidationError> {
    ContainerId::parse(id)
        .map(|_| ())
        .map_err(|_| ValidationError::new("container_id"))
}
