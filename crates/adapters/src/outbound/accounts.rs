//! Host user account adapter.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::Command;

use application::error::{ApplicationError, Result, ToInternal};
use application::ports::outbound::{AccountEntry, HostAccounts};

const DEFAULT_PASSWD_FILE: &str = "/etc/passwd";
const DEFAULT_USERDEL_BIN: &str = "/usr/sbin/userdel";

/// `userdel` exit status when the account is already gone.
const USERDEL_ABSENT: i32 = 6;

/// Account adapter backed by the host user database and `userdel`.
pub struct SystemAccounts {
    passwd_file: PathBuf,
    userdel_bin: PathBuf,
}

impl SystemAccounts {
    /// Create a new [`SystemAccounts`] on the standard host paths.
    pub fn new() -> Self {
        Self {
            passwd_file: DEFAULT_PASSWD_FILE.into(),
            userdel_bin: DEFAULT_USERDEL_BIN.into(),
        }
    }

    /// Override the database file and the deletion binary.
    pub fn with_paths(
        passwd_file: impl Into<PathBuf>,
        userdel_bin: impl Into<PathBuf>,
    ) -> Self {
        Self {
            passwd_file: passwd_file.into(),
            userdel_bin: userdel_bin.into(),
        }
    }
}

impl Default for SystemAccounts {
    fn default() -> Self {
        Self::new()
    }
}

impl HostAccounts for SystemAccounts {
    fn list(&self) -> Result<Vec<AccountEntry>> {
        let database = fs::read_to_string(&self.passwd_file).catch()?;

        Ok(database
            .lines()
            .filter_map(|line| {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    return None;
                }

                let name = line.split(':').next()?.to_string();
                Some(AccountEntry {
                    name,
                    raw: line.to_string(),
                })
            })
            .collect())
    }

    fn remove(&self, username: &str) -> Result<()> {
        let output = Command::new(&self.userdel_bin)
            .arg(username)
            .output()
            .catch()?;

        if output.status.success()
            || output.status.code() == Some(USERDEL_ABSENT)
        {
            tracing::debug!(account = username, "userdel completed");
            return Ok(());
        }

        let mut combined =
            String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Err(ApplicationError::internal(io::Error::other(format!(
            "{} exited with {}: {}",
            self.userdel_bin.display(),
            output.status,
            combined.trim()
        ))))
    }
}
