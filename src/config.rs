//! Configuration manager for gearauth.

use std::fs::File;
use std::path::{Path, PathBuf};

use domain::gear::layout::{DEFAULT_BASE_PATH, HostLayout};
use serde::{Deserialize, Serialize};

const DEFAULT_CONFIG_PATH: &str = "config.yaml";
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Represents the configuration structure expected from the `config.yaml`
/// file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Root directory holding all gear state.
    #[serde(default = "default_base_path")]
    pub base_path: PathBuf,
    /// Host user database consulted by the cleanup pass.
    #[serde(default = "default_passwd_file")]
    pub passwd_file: PathBuf,
    /// Binary invoked to delete host accounts.
    #[serde(default = "default_userdel_bin")]
    pub userdel_bin: PathBuf,
    #[serde(default)]
    version: String,
    #[serde(skip)]
    path: Option<PathBuf>,
}

fn default_base_path() -> PathBuf {
    DEFAULT_BASE_PATH.into()
}

fn default_passwd_file() -> PathBuf {
    "/etc/passwd".into()
}

fn default_userdel_bin() -> PathBuf {
    "/usr/sbin/userdel".into()
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            passwd_file: default_passwd_file(),
            userdel_bin: default_userdel_bin(),
            version: String::default(),
            path: None,
        }
    }
}

impl Configuration {
    /// Set an explicit configuration file path.
    pub fn path(mut self, path: Option<PathBuf>) -> Self {
        self.path = path;
        self
    }

    /// Reads the `config.yaml` file from the specified path or the default
    /// location, falling back to defaults when the file is unusable.
    pub fn read(self) -> Self {
        let file_path = match &self.path {
            Some(path) => path.clone(),
            None => Path::new(DEFAULT_CONFIG_PATH).to_path_buf(),
        };

        match File::open(&file_path) {
            Ok(file) => match serde_yaml::from_reader::<_, Self>(file) {
                Ok(mut config) => {
                    config.version = VERSION.to_owned();
                    config
                },
                Err(err) => self.error(err),
            },
            Err(err) => self.error(err),
        }
    }

    /// Host layout derived from the configured base directory.
    pub fn layout(&self) -> HostLayout {
        HostLayout::new(self.base_path.clone())
    }

    /// Return a default configuration as fallback.
    fn error(&self, err: impl std::error::Error) -> Self {
        tracing::error!(error = %err, "`config.yaml` file not usable, using defaults");
        Self {
            version: VERSION.to_owned(),
            ..Self::default()
        }
    }
}
