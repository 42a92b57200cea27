//! Common test utilities for integration tests.
//!
//! Puzzle fixtures, key-event shorthands and an [`App`] driven to the
//! playing screen through the reducer, the way the event loop would.

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use cryptoquip::app::{App, AppMessage, Command};
use cryptoquip::models::{Puzzle, PuzzleHint, PuzzleRequest};
use cryptoquip::startup::LaunchMode;
use cryptoquip::storage::{GameSession, PlayerConfig};

pub const PLAYER_ID: &str = "player-123";

/// A puzzle with the given text and cipher -> plain hints.
pub fn puzzle(id: &str, text: &str, hints: &[(char, char)]) -> Puzzle {
    Puzzle {
        id: id.to_string(),
        date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        encrypted_text: text.to_string(),
        author: "Anon".to_string(),
        category: "Proverb".to_string(),
        difficulty: 2.0,
        hints: hints
            .iter()
            .map(|&(cipher_letter, plain_letter)| PuzzleHint {
                cipher_letter,
                plain_letter,
            })
            .collect(),
    }
}

pub fn registered_player() -> PlayerConfig {
    PlayerConfig::registered(PLAYER_ID, "CLAIM-1")
}

pub fn key(code: KeyCode) -> AppMessage {
    AppMessage::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

pub fn ch(c: char) -> AppMessage {
    key(KeyCode::Char(c))
}

pub fn ctrl(c: char) -> AppMessage {
    AppMessage::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

/// Type a word letter by letter, collecting every command issued.
pub fn type_str(app: &mut App, text: &str) -> Vec<Command> {
    text.chars().flat_map(|c| app.update(ch(c))).collect()
}

/// Generation carried by the `FetchPuzzle` in `commands`.
pub fn fetch_generation(commands: &[Command]) -> u64 {
    commands
        .iter()
        .find_map(|c| match c {
            Command::FetchPuzzle { generation, .. } => Some(*generation),
            _ => None,
        })
        .expect("expected a FetchPuzzle command")
}

/// Drive a fresh app to the point where the puzzle fetch is in flight.
/// Returns the app and the fetch generation.
pub fn app_fetching(player: Option<PlayerConfig>) -> (App, u64) {
    let mut app = App::new(LaunchMode::Play(PuzzleRequest::Today));
    app.init();
    let player = player.unwrap_or_else(PlayerConfig::opted_out);
    let commands = app.update(AppMessage::PlayerConfigLoaded(Some(player)));
    let generation = fetch_generation(&commands);
    (app, generation)
}

/// An app on the playing screen with `puzzle` loaded and no stored session.
pub fn app_playing_with(puzzle: Puzzle, player: Option<PlayerConfig>) -> App {
    let (mut app, generation) = app_fetching(player);
    let game_id = puzzle.id.clone();
    app.update(AppMessage::PuzzleLoaded { generation, puzzle });
    app.update(AppMessage::SessionLoaded {
        game_id,
        session: None,
    });
    app
}

pub fn app_playing(text: &str) -> App {
    app_playing_with(puzzle("p1", text, &[]), None)
}

/// Session fixture with `inputs` given as (cipher, plain) pairs.
pub fn session(game_id: &str, inputs: &[(char, char)]) -> GameSession {
    let mut session = GameSession::new(game_id);
    session.inputs = inputs.iter().copied().collect();
    session
}

pub fn save_commands(commands: &[Command]) -> Vec<&GameSession> {
    commands
        .iter()
        .filter_map(|c| match c {
            Command::SaveSession(session) => Some(session),
            _ => None,
        })
        .collect()
}
