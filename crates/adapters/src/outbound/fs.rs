//! Host filesystem adapter.

use std::fs;
use std::io::{self, Write};
use std::os::unix::fs::{symlink, PermissionsExt};
use std::path::Path;

use application::error::{ApplicationError, Result, ToInternal};
use application::ports::outbound::HostFilesystem;
use tempfile::NamedTempFile;

/// Permission bits applied to stored key files.
const KEY_FILE_MODE: u32 = 0o660;

/// Filesystem adapter mutating the real host.
#[derive(Debug, Default)]
pub struct SystemFilesystem;

impl SystemFilesystem {
    /// Create a new [`SystemFilesystem`].
    pub fn new() -> Self {
        Self
    }
}

impl HostFilesystem for SystemFilesystem {
    fn store(&self, path: &Path, content: &[u8]) -> Result<()> {
        let parent = path.parent().ok_or_else(|| {
            ApplicationError::internal(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("no parent directory for {}", path.display()),
            ))
        })?;
        fs::create_dir_all(parent).catch()?;

        // Written in the destination directory so the final rename stays on
        // one filesystem and is atomic.
        let mut file = NamedTempFile::new_in(parent).catch()?;
        file.write_all(content).catch()?;
        file.as_file().sync_all().catch()?;
        file.as_file()
            .set_permissions(fs::Permissions::from_mode(KEY_FILE_MODE))
            .catch()?;
        file.persist(path)
            .map_err(|err| ApplicationError::internal(err.error))?;

        Ok(())
    }

    fn link(&self, target: &Path, link: &Path) -> Result<()> {
        match symlink(target, link) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                // Re-grant: an identical link is a success, anything else
                // is a conflict.
                match fs::read_link(link) {
                    Ok(existing) if existing == target => Ok(()),
                    Ok(_) => Err(ApplicationError::internal(io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        format!("{} already points elsewhere", link.display()),
                    ))),
                    Err(err) => Err(ApplicationError::internal(err)),
                }
            },
            Err(err) => Err(ApplicationError::internal(err)),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        path.symlink_metadata().is_ok()
    }

    fn remove(&self, path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(ApplicationError::internal(err)),
        }
    }
}
