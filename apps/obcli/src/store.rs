//! # Config Store
//!
//! Loads and saves the JSON config file.
//!
//! Location, first match wins:
//! 1. `--config <PATH>`
//! 2. `$OBCLI_CONFIG`
//! 3. `$XDG_CONFIG_HOME/obcli/config.json`
//! 4. `$HOME/.config/obcli/config.json`
//! 5. `./obcli.json`

use crate::error::Error;
use obcli_core::Config;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "OBCLI_CONFIG";

const APP_DIR: &str = "obcli";
const FILE_NAME: &str = "config.json";

/// File-backed [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the location picked from the process environment.
    pub fn at_default_location() -> Self {
        Self::new(default_path(|name| std::env::var_os(name)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the config. A missing file yields the defaults.
    pub fn load(&self) -> Result<Config, Error> {
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                debug!(path = %self.path.display(), "loaded config");
                Config::from_json(&text).map_err(|source| Error::ConfigFile {
                    path: self.path.clone(),
                    source,
                })
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no config file, using defaults");
                Ok(Config::default())
            }
            Err(source) => Err(Error::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Like [`ConfigStore::load`], but an unparseable file yields the
    /// defaults so `config set` can overwrite it.
    pub fn load_or_default(&self) -> Result<Config, Error> {
        match self.load() {
            Err(Error::ConfigFile { path, source }) => {
                warn!(path = %path.display(), error = %source, "ignoring unreadable config file");
                Ok(Config::default())
            }
            other => other,
        }
    }

    /// Write the config, creating parent directories as needed.
    ///
    /// The file holds the bearer token, so on Unix it is made owner-only.
    pub fn save(&self, config: &Config) -> Result<(), Error> {
        let io_err = |source| Error::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let mut text = config.to_json_pretty()?;
        text.push('\n');
        fs::write(&self.path, text).map_err(io_err)?;
        restrict_permissions(&self.path).map_err(io_err)?;

        debug!(path = %self.path.display(), "saved config");
        Ok(())
    }
}

/// Resolve the default config path from environment lookups.
pub fn default_path<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<OsString>,
{
    let non_empty = |name: &str| lookup(name).filter(|v| !v.is_empty());

    if let Some(path) = non_empty(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    if let Some(dir) = non_empty("XDG_CONFIG_HOME") {
        return PathBuf::from(dir).join(APP_DIR).join(FILE_NAME);
    }
    if let Some(home) = non_empty("HOME") {
        return PathBuf::from(home).join(".config").join(APP_DIR).join(FILE_NAME);
    }
    PathBuf::from("obcli.json")
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
