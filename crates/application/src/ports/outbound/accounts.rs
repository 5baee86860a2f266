//! Host user account port.

use crate::error::Result;

/// One entry of the host user database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountEntry {
    /// Account name (first database field).
    pub name: String,
    /// Raw database line, kept for diagnostics.
    pub raw: String,
}

/// Port for enumerating and deleting host user accounts.
pub trait HostAccounts: Send + Sync {
    /// Enumerate the host user database.
    fn list(&self) -> Result<Vec<AccountEntry>>;

    /// Delete the named account. Deleting an absent account succeeds, so
    /// overlapping reconciliation passes stay idempotent.
    fn remove(&self, username: &str) -> Result<()>;
}
