//! File logging.
//!
//! The terminal belongs to the demo while it runs, so logs only ever go to a
//! file, and only when asked for with `--log`.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Keeps the non-blocking writer alive; logs are flushed when dropped.
pub struct LogGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

/// Resolve `--log`'s optional argument to a file path.
pub fn log_path(requested: Option<&Path>) -> Result<PathBuf> {
    match requested {
        Some(path) => Ok(path.to_path_buf()),
        None => dweets_config::default_log_path()
            .ok_or_else(|| eyre!("no data directory found, pass --log=PATH")),
    }
}

/// Append logs to `path`, filtered by `RUST_LOG` (default `info`).
pub fn setup_file_logging(path: &Path) -> Result<LogGuard> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .wrap_err("failed to install the log subscriber")?;

    Ok(LogGuard { _guard: guard })
}
