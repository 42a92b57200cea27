//! File-based tracing setup. Stdout belongs to the terminal UI.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::StorageError;

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV: &str = "CRYPTOQUIP_LOG";
pub const LOG_FILE: &str = "cryptoquip.log";

/// Filter from `CRYPTOQUIP_LOG`, falling back to `info`.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber, appending to `<data_dir>/cryptoquip.log`.
///
/// A subscriber installed earlier (tests, embedding) is left in place.
pub fn init_logging(data_dir: &Path) -> Result<PathBuf, StorageError> {
    fs::create_dir_all(data_dir).map_err(|e| StorageError::io(data_dir, e))?;

    let log_path = data_dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .map_err(|e| StorageError::io(&log_path, e))?;

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();

    if installed.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }

    Ok(log_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_logging_creates_log_file() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join("data");

        let path = init_logging(&data_dir).unwrap();
        tracing::info!("logging initialized");

        assert_eq!(path, data_dir.join(LOG_FILE));
        assert!(path.exists());
    }
}
