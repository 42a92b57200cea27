//! Local JSON persistence.
//!
//! - [`session`] - one file per puzzle under `<data_dir>/sessions/`
//! - [`player`] - the player configuration in `<data_dir>/player.json`

pub mod player;
pub mod session;

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::StorageError;

pub use player::{PlayerConfig, PlayerStore};
pub use session::{GameSession, SessionStore, SessionWriter};

/// Serialize `value` into a uniquely named temp file next to `path` and
/// rename it into place.
pub(crate) fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| StorageError::io(parent, e))?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, value)
            .map_err(|e| StorageError::json(path, e))?;
        writer.flush().map_err(|e| StorageError::io(path, e))?;
    }

    tmp.persist(path)
        .map(|_| ())
        .map_err(|e| StorageError::io(path, e.error))
}

/// Read and parse a JSON file. A missing file is `Ok(None)`.
pub(crate) fn read_json<T: serde::de::DeserializeOwned>(
    path: &Path,
) -> Result<Option<T>, StorageError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StorageError::io(path, e)),
    };
    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|e| StorageError::json(path, e))
}
