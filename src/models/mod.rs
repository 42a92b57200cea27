//! Data models shared with the puzzle and stats backends.

pub mod puzzle;
pub mod stats;

pub use puzzle::{CheckRequest, CheckResponse, Puzzle, PuzzleHint, PuzzleRequest};
pub use stats::{
    PlayerStats, RecentSolve, RecordSessionRequest, RegisterRequest, RegisterResponse,
    MAX_RECENT_SOLVES,
};
