//! Puzzle wire types.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A revealed cipher → plain letter pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleHint {
    pub cipher_letter: char,
    pub plain_letter: char,
}

/// A puzzle as served by `GET /api/puzzles/...`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Puzzle {
    pub id: String,
    pub date: NaiveDate,
    pub encrypted_text: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub difficulty: f64,
    #[serde(default)]
    pub hints: Vec<PuzzleHint>,
}

impl Puzzle {
    /// Hints as a cipher → plain lookup.
    pub fn hint_map(&self) -> HashMap<char, char> {
        self.hints
            .iter()
            .map(|h| (h.cipher_letter, h.plain_letter))
            .collect()
    }
}

/// Which puzzle to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PuzzleRequest {
    #[default]
    Today,
    Date(NaiveDate),
    Random,
}

impl PuzzleRequest {
    /// Path segment after `/api/puzzles/`.
    pub fn path_segment(&self) -> String {
        match self {
            PuzzleRequest::Today => "today".to_string(),
            PuzzleRequest::Date(date) => date.format("%Y-%m-%d").to_string(),
            PuzzleRequest::Random => "random".to_string(),
        }
    }
}

impl fmt::Display for PuzzleRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PuzzleRequest::Today => write!(f, "today's puzzle"),
            PuzzleRequest::Date(date) => write!(f, "the puzzle for {}", date),
            PuzzleRequest::Random => write!(f, "a random puzzle"),
        }
    }
}

/// Body of `POST /api/puzzles/{id}/check`.
#[derive(Debug, Clone, Serialize)]
pub struct CheckRequest<'a> {
    pub solution: &'a str,
}

/// Response of `POST /api/puzzles/{id}/check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CheckResponse {
    pub correct: bool,
}
