use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or writing config files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("refusing to overwrite unreadable config file {}", path.display())]
    Unreadable { path: PathBuf },

    #[error("failed to serialize config")]
    Serialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
