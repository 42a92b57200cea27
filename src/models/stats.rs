//! Player identity and statistics wire types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of recent solves kept for display.
pub const MAX_RECENT_SOLVES: usize = 10;

/// Body of `POST /api/players`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest<'a> {
    pub player_id: &'a str,
}

/// Response of `POST /api/players`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub claim_code: String,
}

/// Body of `POST /api/players/{id}/sessions`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSessionRequest<'a> {
    pub game_id: &'a str,
    pub completion_time_ms: u64,
}

/// One entry of the recent-history list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentSolve {
    pub date: NaiveDate,
    pub completion_time_ms: u64,
}

/// Aggregate statistics returned by `GET /api/players/{id}/stats`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    #[serde(default)]
    pub solved_count: u32,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
    #[serde(default)]
    pub best_time_ms: Option<u64>,
    #[serde(default)]
    pub average_time_ms: Option<u64>,
    #[serde(default)]
    pub recent: Vec<RecentSolve>,
}

impl PlayerStats {
    /// Keep at most [`MAX_RECENT_SOLVES`] history entries.
    pub fn truncate_recent(mut self) -> Self {
        self.recent.truncate(MAX_RECENT_SOLVES);
        self
    }
}
