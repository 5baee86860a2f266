//! Host user reconciliation pass implementation.

use domain::gear::id::{ContainerId, IDENTIFIER_PREFIX};
use domain::gear::layout::HostLayout;

use crate::ports::inbound::ReconcileUsers;
use crate::ports::outbound::{AccountEntry, HostAccounts, HostFilesystem};

/// Host user reconciliation job.
///
/// Compares the host user database against provisioned unit files and
/// removes accounts whose backing gear no longer exists. Truth is derived
/// from host artifacts; there is no separate authoritative store to
/// consult or to drift from.
pub struct ReconcileUsersUseCase {
    accounts: Box<dyn HostAccounts>,
    fs: Box<dyn HostFilesystem>,
    layout: HostLayout,
}

impl ReconcileUsersUseCase {
    /// Create a new [`ReconcileUsersUseCase`].
    pub fn new(
        accounts: Box<dyn HostAccounts>,
        fs: Box<dyn HostFilesystem>,
        layout: HostLayout,
    ) -> Self {
        Self {
            accounts,
            fs,
            layout,
        }
    }

    /// Decide which accounts are orphaned.
    ///
    /// An account is a removal candidate iff its name derives to a valid
    /// container identifier whose unit file is absent. Accounts with an
    /// ambiguous identity are reported and left untouched.
    pub fn plan(&self, entries: &[AccountEntry]) -> Vec<ContainerId> {
        let mut candidates = Vec::new();

        for entry in entries {
            if !entry.name.starts_with(IDENTIFIER_PREFIX) {
                continue;
            }

            let id = match ContainerId::from_username(&entry.name) {
                Ok(id) => id,
                Err(err) => {
                    tracing::warn!(
                        account = %entry.name,
                        error = %err,
                        "unable to derive identifier from account"
                    );
                    continue;
                },
            };

            if !self.fs.exists(&self.layout.unit_path(&id)) {
                candidates.push(id);
            }
        }

        candidates
    }
}

impl ReconcileUsers for ReconcileUsersUseCase {
    fn execute(&self, dry_run: bool) {
        tracing::info!(dry_run, "host users reconciliation started");

        let entries = match self.accounts.list() {
            Ok(entries) => entries,
            Err(err) => {
                tracing::error!(error = %err, "failed to enumerate host users");
                return;
            },
        };

        for id in self.plan(&entries) {
            if dry_run {
                tracing::info!(account = %id, "account could be removed");
                continue;
            }

            tracing::info!(account = %id, "removing account");
            if let Err(err) = self.accounts.remove(id.as_str()) {
                tracing::error!(
                    account = %id,
                    error = %err,
                    "failed to remove account"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::support::{MemoryAccounts, MemoryFilesystem};

    fn provision_unit(fs: &MemoryFilesystem, layout: &HostLayout, id: &str) {
        let id = ContainerId::parse(id).unwrap();
        fs.touch(layout.unit_path(&id));
    }

    fn usecase(
        accounts: MemoryAccounts,
        fs: MemoryFilesystem,
    ) -> ReconcileUsersUseCase {
        ReconcileUsersUseCase::new(
            Box::new(accounts),
            Box::new(fs),
            HostLayout::default(),
        )
    }

    #[test]
    fn test_orphaned_account_is_removed() {
        let fs = MemoryFilesystem::new();
        let layout = HostLayout::default();
        provision_unit(&fs, &layout, "gear_xyz");

        let accounts = MemoryAccounts::new(&["gear_abc", "gear_xyz"]);
        let job = usecase(accounts.clone(), fs);
        job.execute(false);

        assert_eq!(accounts.removed(), vec!["gear_abc".to_string()]);
    }

    #[test]
    fn test_dry_run_removes_nothing() {
        let fs = MemoryFilesystem::new();
        let accounts = MemoryAccounts::new(&["gear_abc", "gear_xyz"]);

        let job = usecase(accounts.clone(), fs);
        job.execute(true);

        assert!(accounts.removed().is_empty());
    }

    #[test]
    fn test_foreign_accounts_are_ignored() {
        let fs = MemoryFilesystem::new();
        let accounts = MemoryAccounts::new(&["root", "daemon", "postgres"]);

        let job = usecase(accounts.clone(), fs);
        job.execute(false);

        assert!(accounts.removed().is_empty());
    }

    #[test]
    fn test_ambiguous_identity_is_never_removed() {
        let fs = MemoryFilesystem::new();
        // Carries the prefix but does not derive to a valid identifier.
        let accounts = MemoryAccounts::new(&["gear_ABC", "gear_"]);

        let job = usecase(accounts.clone(), fs);
        job.execute(false);

        assert!(accounts.removed().is_empty());
    }

    #[test]
    fn test_removal_failure_does_not_stop_the_pass() {
        let fs = MemoryFilesystem::new();
        let accounts =
            MemoryAccounts::new(&["gear_abc", "gear_def"]).failing_on("gear_abc");

        let job = usecase(accounts.clone(), fs);
        job.execute(false);

        assert_eq!(accounts.removed(), vec!["gear_def".to_string()]);
    }

    #[test]
    fn test_plan_reports_candidates_without_acting() {
        let fs = MemoryFilesystem::new();
        let layout = HostLayout::default();
        provision_unit(&fs, &layout, "gear_live");

        let accounts =
            MemoryAccounts::new(&["gear_live", "gear_gone", "messagebus"]);
        let job = usecase(accounts.clone(), fs);

        let candidates = job.plan(&accounts.list().unwrap());
        assert_eq!(
            candidates,
            vec![ContainerId::parse("gear_gone").unwrap()]
        );
        assert!(accounts.removed().is_empty());
    }

    // An account whose unit file has not been written yet is
    // indistinguishable from an orphan; the pass removes it. Known
    // limitation of deriving liveness from the unit file alone.
    #[test]
    fn test_account_created_before_unit_file_is_still_removed() {
        let fs = MemoryFilesystem::new();
        let accounts = MemoryAccounts::new(&["gear_justborn"]);

        let job = usecase(accounts.clone(), fs);
        job.execute(false);

        assert_eq!(accounts.removed(), vec!["gear_justborn".to_string()]);
    }
}
