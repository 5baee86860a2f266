//! Content fingerprint of public keys.

use std::fmt;

use sha2::{Digest, Sha256};

/// Value object of a key fingerprint.
///
/// Hex-encoded SHA-256 of the key's canonical wire encoding. The
/// fingerprint is the sole identity of a key: it names the stored key file
/// and every access symlink pointing at it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyFingerprint(String);

impl KeyFingerprint {
    /// Digest `wire`, the canonical wire encoding of a public key.
    pub fn digest(wire: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(wire);
        Self(hex::encode(hasher.finalize()))
    }

    /// Returns the same string as a string slice `&str`.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for KeyFingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
