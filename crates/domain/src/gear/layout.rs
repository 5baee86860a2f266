//! Host filesystem layout derivation.

use std::path::PathBuf;

use crate::gear::id::ContainerId;
use crate::key::fingerprint::KeyFingerprint;

/// Default root under which all gear state lives.
pub const DEFAULT_BASE_PATH: &str = "/var/lib/gears";

/// Pure path resolver for a gear host.
///
/// Every path touched by the access layer derives deterministically from
/// the base directory, an identifier, and a fingerprint. Deriving a path
/// has no side effects; existence is the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostLayout {
    base: PathBuf,
}

impl HostLayout {
    /// Create a new [`HostLayout`] rooted at `base`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Unit file whose existence marks the gear as provisioned.
    pub fn unit_path(&self, id: &ContainerId) -> PathBuf {
        self.base
            .join("units")
            .join(format!("{}.service", id.as_str()))
    }

    /// Bare git repository owned by the gear.
    pub fn repository_path(&self, id: &ContainerId) -> PathBuf {
        self.base.join("git").join(id.as_str())
    }

    /// Content-addressed public key file.
    pub fn public_key_path(&self, fingerprint: &KeyFingerprint) -> PathBuf {
        self.base.join("keys").join(fingerprint.as_str())
    }

    /// Directory holding one symlink per key allowed to reach the gear.
    pub fn ssh_access_dir(&self, id: &ContainerId) -> PathBuf {
        self.base
            .join("access")
            .join("gears")
            .join("ssh")
            .join(id.as_str())
    }

    /// Symlink granting `fingerprint` SSH access to the gear.
    pub fn ssh_access_path(
        &self,
        id: &ContainerId,
        fingerprint: &KeyFingerprint,
    ) -> PathBuf {
        self.ssh_access_dir(id).join(fingerprint.as_str())
    }

    /// Legacy consolidated authorized_keys file, superseded by the per-key
    /// symlinks and removed on the first symlink-based grant.
    pub fn auth_keys_path(&self, id: &ContainerId) -> PathBuf {
        self.base
            .join("home")
            .join(id.as_str())
            .join(".ssh")
            .join("authorized_keys")
    }

    /// Directory holding one symlink per key allowed to reach the gear
    /// repository.
    pub fn git_access_dir(&self, id: &ContainerId) -> PathBuf {
        self.base.join("access").join("git").join(id.as_str())
    }

    /// Symlink granting `fingerprint` read or read-write access to the
    /// gear repository. The mode is encoded in the link name.
    pub fn git_access_path(
        &self,
        id: &ContainerId,
        fingerprint: &KeyFingerprint,
        write: bool,
    ) -> PathBuf {
        let mode = if write { "write" } else { "read" };
        self.git_access_dir(id)
            .join(format!("{}.{mode}", fingerprint.as_str()))
    }
}

impl Default for HostLayout {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_PATH)
    }
}
