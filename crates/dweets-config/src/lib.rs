//! Config file persistence for the dweets demos.
//!
//! Config files are TOML. Each demo that persists settings owns one table;
//! tables belonging to anything else are kept untouched when saving.

mod error;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use error::{ConfigError, Result};

/// Table holding the ring weave parameters.
pub const RING_WEAVE_SECTION: &str = "ringweave";

/// Persisted ring weave parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingWeaveConfig {
    pub base: i64,
    pub closed: i64,
    pub focus: i64,
    pub nsteps: i64,
    pub nwaves: i64,
    pub somevar: i64,
    pub spread: i64,
}

/// A loaded config file.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
    table: toml::Table,
    /// Set when the file exists but could not be read; saving would clobber it.
    unreadable: bool,
}

impl ConfigFile {
    /// Load a config file, treating a missing file as empty.
    pub fn try_load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let table = match fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "config file not found, using defaults");
                toml::Table::new()
            }
            Err(source) => {
                return Err(ConfigError::Io { path, source });
            }
        };
        Ok(Self {
            path,
            table,
            unreadable: false,
        })
    }

    /// Load a config file, falling back to an empty config on any error.
    ///
    /// A config recovered this way refuses to [`save`](Self::save).
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::try_load(path.clone()).unwrap_or_else(|e| {
            warn!(error = %e, "ignoring unreadable config file");
            Self {
                path,
                table: toml::Table::new(),
                unreadable: true,
            }
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file on disk could not be read when loading.
    pub fn is_unreadable(&self) -> bool {
        self.unreadable
    }

    /// Read the ring weave table, taking each missing or malformed key from
    /// `defaults`.
    pub fn ring_weave(&self, defaults: RingWeaveConfig) -> RingWeaveConfig {
        let Some(section) = self.table.get(RING_WEAVE_SECTION) else {
            return defaults;
        };
        let Some(section) = section.as_table() else {
            warn!(section = RING_WEAVE_SECTION, "config section is not a table");
            return defaults;
        };
        let Ok(toml::Value::Table(mut merged)) = toml::Value::try_from(defaults) else {
            return defaults;
        };

        for (key, slot) in merged.iter_mut() {
            match section.get(key) {
                None => {}
                Some(toml::Value::Integer(v)) => *slot = toml::Value::Integer(*v),
                Some(toml::Value::String(s)) => match s.trim().parse::<i64>() {
                    Ok(v) => *slot = toml::Value::Integer(v),
                    Err(_) => warn!(key = %key, value = %s, "ignoring non-integer config value"),
                },
                Some(other) => warn!(key = %key, value = %other, "ignoring non-integer config value"),
            }
        }

        toml::Value::Table(merged).try_into().unwrap_or_else(|e| {
            warn!(error = %e, "invalid ring weave config, using defaults");
            defaults
        })
    }

    /// Store ring weave parameters, keeping unrelated keys in the table.
    pub fn set_ring_weave(&mut self, config: &RingWeaveConfig) -> Result<()> {
        let toml::Value::Table(values) = toml::Value::try_from(config)? else {
            return Ok(());
        };
        let section = self
            .table
            .entry(RING_WEAVE_SECTION)
            .or_insert(toml::Value::Table(toml::Table::new()));
        if !section.is_table() {
            *section = toml::Value::Table(toml::Table::new());
        }
        if let Some(section) = section.as_table_mut() {
            for (key, value) in values {
                section.insert(key, value);
            }
        }
        Ok(())
    }

    /// Write the config back to its path, creating parent directories.
    ///
    /// Fails without touching the file if it could not be read on load.
    pub fn save(&self) -> Result<()> {
        if self.unreadable {
            return Err(ConfigError::Unreadable {
                path: self.path.clone(),
            });
        }
        let content = toml::to_string(&self.table)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&self.path, content).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "config saved");
        Ok(())
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "dweets")
}

/// Default location of the ring weave config file.
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("ringweave.toml"))
}

/// Default location of the log file.
pub fn default_log_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join("dweets.log"))
}
