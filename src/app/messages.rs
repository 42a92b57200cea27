//! AppMessage enum: everything the reducer consumes.

use crossterm::event::{KeyEvent, MouseEvent};

use crate::error::ApiError;
use crate::models::{PlayerStats, Puzzle};
use crate::storage::{GameSession, PlayerConfig};

/// Terminal events and command results, processed one at a time.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// Key press from the terminal
    Key(KeyEvent),
    /// Mouse event from the terminal
    Mouse(MouseEvent),
    /// Terminal was resized
    Resize { width: u16, height: u16 },
    /// One-second timer tick; `seq` identifies the live tick chain
    Tick { seq: u64 },

    /// `None` when no player file exists (first run)
    PlayerConfigLoaded(Option<PlayerConfig>),
    PlayerRegistered { player_id: String, claim_code: String },
    PlayerRegistrationFailed(ApiError),

    PuzzleLoaded { generation: u64, puzzle: Puzzle },
    PuzzleLoadFailed { generation: u64, error: ApiError },
    /// `None` when nothing was stored or the file was unreadable
    SessionLoaded {
        game_id: String,
        session: Option<GameSession>,
    },

    CheckCompleted { game_id: String, correct: bool },
    CheckFailed { game_id: String, error: ApiError },
    /// The stats backend accepted a solve for this puzzle
    SessionRecorded { game_id: String },

    StatsLoaded(PlayerStats),
    StatsLoadFailed(ApiError),
    /// Startup reconciliation finished
    SessionsReconciled { uploaded: usize },
}
