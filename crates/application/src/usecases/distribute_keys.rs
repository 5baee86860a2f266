//! Key distribution job implementation.

use std::path::Path;

use domain::gear::id::ContainerId;
use domain::gear::layout::HostLayout;
use domain::key::fingerprint::KeyFingerprint;
use domain::key::public_key::SshPublicKey;

use crate::dto::{DistributeKeysRequest, GearGrant, KeyInput, RepositoryGrant};
use crate::error::{ApplicationError, FailedKey, Result};
use crate::ports::inbound::DistributeKeys;
use crate::ports::outbound::HostFilesystem;

/// Record that processing of one input key failed.
struct KeyFailure {
    index: usize,
    reason: ApplicationError,
}

/// Permission kinds sharing one grant shape.
#[derive(Clone, Copy)]
enum Grant<'a> {
    Gear(&'a GearGrant),
    Repository(&'a RepositoryGrant),
}

impl Grant<'_> {
    fn target_id(&self) -> &str {
        match self {
            Grant::Gear(grant) => &grant.id,
            Grant::Repository(grant) => &grant.id,
        }
    }
}

/// Key distribution job.
///
/// Installs a batch of public keys into the content-addressed store, then
/// grants each of them access to every requested gear and repository by
/// placing a fingerprint-named symlink in the target's access directory.
/// Failures are collected against the key's input index and the batch
/// never aborts early, so callers can retry exactly the failed indices.
pub struct DistributeKeysUseCase {
    fs: Box<dyn HostFilesystem>,
    layout: HostLayout,
}

impl DistributeKeysUseCase {
    /// Create a new [`DistributeKeysUseCase`].
    pub fn new(fs: Box<dyn HostFilesystem>, layout: HostLayout) -> Self {
        Self { fs, layout }
    }

    fn install_key(
        &self,
        index: usize,
        key: &KeyInput,
        request: &DistributeKeysRequest,
        failures: &mut Vec<KeyFailure>,
    ) {
        let parsed = match SshPublicKey::parse(&key.value) {
            Ok(parsed) => parsed,
            Err(err) => {
                failures.push(KeyFailure {
                    index,
                    reason: err.into(),
                });
                return;
            },
        };

        let fingerprint = parsed.fingerprint();
        let key_path = self.layout.public_key_path(&fingerprint);

        let content = match parsed.authorized_line() {
            Ok(content) => content,
            Err(err) => {
                failures.push(KeyFailure {
                    index,
                    reason: err.into(),
                });
                return;
            },
        };
        if let Err(err) = self.fs.store(&key_path, &content) {
            failures.push(KeyFailure { index, reason: err });
            return;
        }

        let grants = request
            .gears
            .iter()
            .map(Grant::Gear)
            .chain(request.repositories.iter().map(Grant::Repository));
        for grant in grants {
            self.grant_access(index, &key_path, &fingerprint, grant, failures);
        }
    }

    /// Apply one grant: probe the target resource, place the symlink and,
    /// for gears, retire the consolidated authorized_keys file. Each step
    /// fails independently; none stops the others.
    fn grant_access(
        &self,
        index: usize,
        key_path: &Path,
        fingerprint: &KeyFingerprint,
        grant: Grant<'_>,
        failures: &mut Vec<KeyFailure>,
    ) {
        let id = match ContainerId::parse(grant.target_id().to_owned()) {
            Ok(id) => id,
            Err(err) => {
                failures.push(KeyFailure {
                    index,
                    reason: err.into(),
                });
                return;
            },
        };

        let (required, access) = match grant {
            Grant::Gear(_) => (
                self.layout.unit_path(&id),
                self.layout.ssh_access_path(&id, fingerprint),
            ),
            Grant::Repository(repository) => (
                self.layout.repository_path(&id),
                self.layout
                    .git_access_path(&id, fingerprint, repository.write),
            ),
        };

        if !self.fs.exists(&required) {
            failures.push(KeyFailure {
                index,
                reason: match grant {
                    Grant::Gear(_) => ApplicationError::MissingUnitFile {
                        id: id.to_string(),
                    },
                    Grant::Repository(_) => {
                        ApplicationError::MissingRepository {
                            id: id.to_string(),
                        }
                    },
                },
            });
        }

        if let Err(err) = self.fs.link(key_path, &access) {
            failures.push(KeyFailure { index, reason: err });
        }

        if let Grant::Gear(_) = grant {
            // First symlink-based grant supersedes the consolidated file.
            let legacy = self.layout.auth_keys_path(&id);
            if self.fs.exists(&legacy) {
                if let Err(err) = self.fs.remove(&legacy) {
                    failures.push(KeyFailure { index, reason: err });
                }
            }
        }
    }
}

impl DistributeKeys for DistributeKeysUseCase {
    fn execute(&self, request: &DistributeKeysRequest) -> Result<()> {
        request.check()?;

        let mut failures = Vec::new();
        for (index, key) in request.keys.iter().enumerate() {
            self.install_key(index, key, request, &mut failures);
        }

        if failures.is_empty() {
            tracing::info!(
                user_id = %request.user_id,
                keys = request.keys.len(),
                "keys distributed"
            );
            return Ok(());
        }

        let failed = failures
            .into_iter()
            .map(|failure| {
                tracing::error!(
                    index = failure.index,
                    reason = %failure.reason,
                    "key not completed"
                );
                FailedKey {
                    index: failure.index,
                    message: failure.reason.to_string(),
                }
            })
            .collect();

        Err(ApplicationError::KeysNotCompleted(failed))
    }
}
