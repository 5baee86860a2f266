//! SSH public keys logic management.

use ssh_key::PublicKey;

use crate::error::Result;
use crate::key::fingerprint::KeyFingerprint;

/// Logical errors related to public keys.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("unable to parse key")]
    Unparsable,
    #[error("key encoding is invalid")]
    InvalidEncoding,
}

/// Value object of a valid SSH public key.
///
/// The key is re-canonicalized through its wire encoding on parse, so two
/// submissions differing only by comment or surrounding whitespace are the
/// same key, with the same fingerprint and the same stored content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshPublicKey {
    key: PublicKey,
    wire: Vec<u8>,
}

impl SshPublicKey {
    /// Converts an OpenSSH `authorized_keys` line into a valid
    /// [`SshPublicKey`].
    ///
    /// # Errors
    ///
    /// Returns `Err` if the line is not a well-formed OpenSSH public key.
    pub fn parse(line: &str) -> Result<Self> {
        let submitted = PublicKey::from_openssh(line.trim())
            .map_err(|_| KeyError::Unparsable)?;

        let wire = submitted
            .to_bytes()
            .map_err(|_| KeyError::InvalidEncoding)?;
        // Round-trip through the wire encoding to drop the comment.
        let key =
            PublicKey::from_bytes(&wire).map_err(|_| KeyError::InvalidEncoding)?;

        Ok(Self { key, wire })
    }

    /// Content fingerprint over the canonical wire encoding.
    pub fn fingerprint(&self) -> KeyFingerprint {
        KeyFingerprint::digest(&self.wire)
    }

    /// Canonical `authorized_keys` line, newline-terminated and
    /// comment-free. This is the exact content persisted in the key store.
    pub fn authorized_line(&self) -> Result<Vec<u8>> {
        let mut line = self
            .key
            .to_openssh()
            .map_err(|_| KeyError::InvalidEncoding)?;
        line.push('\n');
        Ok(line.into_bytes())
    }

    /// Algorithm tag of the key (e.g. `ssh-rsa`).
    pub fn algorithm(&self) -> String {
        self.key.algorithm().to_string()
    }
}
