//! Container identifier logic management.

use std::fmt;

use crate::error::{DomainError, Result};

/// Well-known prefix carried by every gear identifier and its host account.
pub const IDENTIFIER_PREFIX: &str = "gear_";

/// Value object of a valid container identifier.
///
/// The identifier doubles as the OS username of the gear, so its charset is
/// restricted to what a user database accepts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerId(String);

impl ContainerId {
    /// Converts a [`String`] into a valid [`ContainerId`].
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string does not carry the `gear_` prefix, is
    /// longer than 32 characters, or holds anything but lowercase
    /// alphanumerics and underscores after the prefix.
    pub fn parse(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        let trimmed = id.trim();

        let Some(name) = trimmed.strip_prefix(IDENTIFIER_PREFIX) else {
            return Err(DomainError::MissingIdentifierPrefix);
        };

        if name.is_empty() || trimmed.len() > 32 {
            return Err(DomainError::InvalidIdentifierFormat);
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(DomainError::InvalidIdentifierFormat);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Derives the identifier backing a host user account.
    ///
    /// The account name is the identifier itself; this only re-applies the
    /// identifier rules to it.
    pub fn from_username(username: &str) -> Result<Self> {
        Self::parse(username)
    }

    /// Returns the same string as a string slice `&str`.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ContainerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
