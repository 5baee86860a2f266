//! In-memory test doubles for the outbound ports.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{ApplicationError, Result};
use crate::ports::outbound::{AccountEntry, HostAccounts, HostFilesystem};

#[derive(Debug, Default)]
struct FilesystemState {
    files: BTreeMap<PathBuf, Vec<u8>>,
    links: BTreeMap<PathBuf, PathBuf>,
    dirs: BTreeSet<PathBuf>,
}

/// In-memory [`HostFilesystem`] mirroring the adapter semantics: symlinks
/// need an existing parent directory, identical re-links succeed, removes
/// of absent files succeed.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    state: Arc<Mutex<FilesystemState>>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an empty file, e.g. a unit file or a legacy
    /// authorized_keys file.
    pub fn touch(&self, path: PathBuf) {
        self.state.lock().unwrap().files.insert(path, Vec::new());
    }

    /// Register a directory.
    pub fn mkdir(&self, path: PathBuf) {
        self.state.lock().unwrap().dirs.insert(path);
    }

    pub fn is_empty(&self) -> bool {
        let state = self.state.lock().unwrap();
        state.files.is_empty() && state.links.is_empty()
    }

    /// Paths written through `store`, in order.
    pub fn stored_files(&self) -> Vec<PathBuf> {
        let state = self.state.lock().unwrap();
        state
            .files
            .iter()
            .filter(|(_, content)| !content.is_empty())
            .map(|(path, _)| path.clone())
            .collect()
    }

    /// Symlinks placed below `dir`, in order.
    pub fn links_under(&self, dir: &Path) -> Vec<PathBuf> {
        let state = self.state.lock().unwrap();
        state
            .links
            .keys()
            .filter(|path| path.starts_with(dir))
            .cloned()
            .collect()
    }
}

impl HostFilesystem for MemoryFilesystem {
    fn store(&self, path: &Path, content: &[u8]) -> Result<()> {
        self.state
            .lock()
            .unwrap()
            .files
            .insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn link(&self, target: &Path, link: &Path) -> Result<()> {
        let mut state = self.state.lock().unwrap();

        let parent_exists = link
            .parent()
            .is_some_and(|parent| state.dirs.contains(parent));
        if !parent_exists {
            return Err(ApplicationError::internal(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such directory for {}", link.display()),
            )));
        }

        match state.links.get(link) {
            Some(existing) if existing == target => Ok(()),
            Some(_) => Err(ApplicationError::internal(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already points elsewhere", link.display()),
            ))),
            None => {
                state.links.insert(link.to_path_buf(), target.to_path_buf());
                Ok(())
            },
        }
    }

    fn exists(&self, path: &Path) -> bool {
        let state = self.state.lock().unwrap();
        state.files.contains_key(path)
            || state.links.contains_key(path)
            || state.dirs.contains(path)
    }

    fn remove(&self, path: &Path) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.files.remove(path);
        state.links.remove(path);
        Ok(())
    }
}

/// [`HostAccounts`] double over a fixed listing, recording removals.
#[derive(Debug, Clone, Default)]
pub struct MemoryAccounts {
    entries: Vec<AccountEntry>,
    removed: Arc<Mutex<Vec<String>>>,
    failing: Option<String>,
}

impl MemoryAccounts {
    pub fn new(names: &[&str]) -> Self {
        Self {
            entries: names
                .iter()
                .map(|name| AccountEntry {
                    name: (*name).to_string(),
                    raw: format!("{name}:x:1001:1001::/home/{name}:/bin/sh"),
                })
                .collect(),
            removed: Arc::default(),
            failing: None,
        }
    }

    /// Make removal of `name` fail.
    pub fn failing_on(mut self, name: &str) -> Self {
        self.failing = Some(name.to_string());
        self
    }

    pub fn removed(&self) -> Vec<String> {
        self.removed.lock().unwrap().clone()
    }
}

impl HostAccounts for MemoryAccounts {
    fn list(&self) -> Result<Vec<AccountEntry>> {
        Ok(self.entries.clone())
    }

    fn remove(&self, username: &str) -> Result<()> {
        if self.failing.as_deref() == Some(username) {
            return Err(ApplicationError::internal(io::Error::other(
                "userdel exited with 1",
            )));
        }
        self.removed.lock().unwrap().push(username.to_string());
        Ok(())
    }
}
