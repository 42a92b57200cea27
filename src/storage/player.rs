//! Local player configuration.
//!
//! Absence of the file means the player has never been asked to opt in.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{read_json, write_json_atomic};
use crate::error::StorageError;

const PLAYER_FILE: &str = "player.json";

/// Whether the player opted in to stats, and their identity if registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerConfig {
    pub opted_in: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PlayerConfig {
    /// The player declined stats tracking.
    pub fn opted_out() -> Self {
        Self {
            opted_in: false,
            player_id: None,
            claim_code: None,
            created_at: Utc::now(),
        }
    }

    /// A freshly registered player.
    pub fn registered(player_id: impl Into<String>, claim_code: impl Into<String>) -> Self {
        Self {
            opted_in: true,
            player_id: Some(player_id.into()),
            claim_code: Some(claim_code.into()),
            created_at: Utc::now(),
        }
    }

    /// Player id, if the player opted in and registration completed.
    pub fn registered_id(&self) -> Option<&str> {
        if self.opted_in {
            self.player_id.as_deref()
        } else {
            None
        }
    }

    pub fn is_registered(&self) -> bool {
        self.registered_id().is_some()
    }
}

/// Loads and saves `<data_dir>/player.json`.
#[derive(Debug, Clone)]
pub struct PlayerStore {
    path: PathBuf,
}

impl PlayerStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(PLAYER_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<PlayerConfig>, StorageError> {
        read_json(&self.path)
    }

    pub fn save(&self, config: &PlayerConfig) -> Result<(), StorageError> {
        write_json_atomic(&self.path, config)
    }
}
