//! Per-puzzle progress snapshots.

use std::collections::BTreeMap;
use std::fs;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{read_json, write_json_atomic};
use crate::error::StorageError;

const SESSIONS_DIR: &str = "sessions";

/// Snapshot of one puzzle's progress. Hint assignments are never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
    pub game_id: String,
    /// Cipher letter to the player's plaintext guess, `Letter` cells only.
    #[serde(default)]
    pub inputs: BTreeMap<char, char>,
    #[serde(with = "duration_millis", default)]
    pub elapsed_time: Duration,
    #[serde(default)]
    pub solved: bool,
    /// Only meaningful when `solved`.
    #[serde(with = "duration_millis", default)]
    pub completion_time: Duration,
    #[serde(default)]
    pub uploaded: bool,
}

impl GameSession {
    pub fn new(game_id: impl Into<String>) -> Self {
        Self {
            game_id: game_id.into(),
            inputs: BTreeMap::new(),
            elapsed_time: Duration::ZERO,
            solved: false,
            completion_time: Duration::ZERO,
            uploaded: false,
        }
    }

    /// Solved but not yet recorded with the stats backend.
    pub fn needs_upload(&self) -> bool {
        self.solved && !self.uploaded
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// File stem for a puzzle id.
///
/// Characters outside `[A-Za-z0-9_-]` become `_`. When anything was replaced,
/// the hex bytes of the raw id follow a `.` so distinct ids never share a file.
pub fn sanitize_game_id(game_id: &str) -> String {
    let safe: String = game_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if safe == game_id {
        return safe;
    }
    let hex: String = game_id.bytes().map(|b| format!("{:02x}", b)).collect();
    format!("{}.{}", safe, hex)
}

/// Reads and writes session files under `<data_dir>/sessions/`.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            dir: data_dir.as_ref().join(SESSIONS_DIR),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn session_path(&self, game_id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_game_id(game_id)))
    }

    /// Overwrite the stored session for `session.game_id`.
    pub fn save(&self, session: &GameSession) -> Result<(), StorageError> {
        write_json_atomic(&self.session_path(&session.game_id), session)
    }

    /// `Ok(None)` when no session has been stored for this puzzle.
    pub fn load(&self, game_id: &str) -> Result<Option<GameSession>, StorageError> {
        read_json(&self.session_path(game_id))
    }

    /// Every stored session that is solved but not yet uploaded.
    ///
    /// Files that fail to read or parse are skipped.
    pub fn list_unsynced_solves(&self) -> Result<Vec<GameSession>, StorageError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::io(&self.dir, e)),
        };

        let mut sessions: Vec<GameSession> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| match read_json::<GameSession>(&path) {
                Ok(session) => session,
                Err(err) => {
                    tracing::debug!("Skipping unreadable session file: {}", err);
                    None
                }
            })
            .filter(GameSession::needs_upload)
            .collect();

        sessions.sort_by(|a, b| a.game_id.cmp(&b.game_id));
        Ok(sessions)
    }
}

/// Serializes session writes across tasks.
///
/// Every snapshot takes a ticket when it is issued. Writes run one at a time
/// and a snapshot whose ticket is older than the last one written for the
/// same puzzle is dropped, so the newest snapshot always ends up on disk.
#[derive(Debug, Clone)]
pub struct SessionWriter {
    store: SessionStore,
    next_ticket: Arc<AtomicU64>,
    written: Arc<Mutex<HashMap<String, u64>>>,
}

impl SessionWriter {
    pub fn new(store: SessionStore) -> Self {
        Self {
            store,
            next_ticket: Arc::new(AtomicU64::new(0)),
            written: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Reserve the next position in write order.
    pub fn ticket(&self) -> u64 {
        self.next_ticket.fetch_add(1, Ordering::SeqCst)
    }

    /// Write `session` unless a newer ticket for the same puzzle already
    /// landed. Returns whether the file was written.
    pub fn write(&self, ticket: u64, session: &GameSession) -> Result<bool, StorageError> {
        let mut written = self.written.lock().unwrap_or_else(PoisonError::into_inner);
        if written
            .get(&session.game_id)
            .is_some_and(|&last| last > ticket)
        {
            tracing::debug!(game_id = %session.game_id, ticket, "Dropping superseded session snapshot");
            return Ok(false);
        }

        self.store.save(session)?;
        written.insert(session.game_id.clone(), ticket);
        Ok(true)
    }

    /// Take a ticket and write immediately. Any snapshot still in flight is
    /// older and will be dropped.
    pub fn write_latest(&self, session: &GameSession) -> Result<bool, StorageError> {
        self.write(self.ticket(), session)
    }
}
