//! Session persistence through the real file store.

mod common;

use std::fs;
use std::time::Duration;

use common::*;
use tempfile::TempDir;

use cryptoquip::app::{AppMessage, Command, Screen};
use cryptoquip::storage::{GameSession, PlayerConfig, PlayerStore, SessionStore};

/// Persist every `SaveSession` in `commands`, the way the runner would.
fn persist(store: &SessionStore, commands: &[Command]) {
    for session in save_commands(commands) {
        store.save(session).unwrap();
    }
}

#[test]
fn test_progress_survives_a_restart() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path());

    let mut app = app_playing("XMT KTQS");
    persist(&store, &type_str(&mut app, "the"));
    drop(app);

    let stored = store.load("p1").unwrap().expect("session written");
    assert_eq!(stored.inputs.get(&'X'), Some(&'T'));
    assert_eq!(stored.inputs.get(&'M'), Some(&'H'));
    assert_eq!(stored.inputs.get(&'T'), Some(&'E'));
    assert!(!stored.solved);

    let (mut app, generation) = app_fetching(None);
    app.update(AppMessage::PuzzleLoaded {
        generation,
        puzzle: puzzle("p1", "XMT KTQS", &[]),
    });
    app.update(AppMessage::SessionLoaded {
        game_id: "p1".to_string(),
        session: store.load("p1").unwrap(),
    });

    let restored: String = app.cells.iter().map(|c| c.display_input()).collect();
    assert_eq!(restored, "THE _E__");
}

#[test]
fn test_solved_session_restores_solved_screen() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path());

    let mut app = app_playing("AB");
    type_str(&mut app, "hi");
    app.update(key(crossterm::event::KeyCode::Enter));
    let commands = app.update(AppMessage::CheckCompleted {
        game_id: "p1".to_string(),
        correct: true,
    });
    persist(&store, &commands);
    let completion = app.completion_time;

    let reopened = app_playing_with_session(&store);
    assert_eq!(reopened.screen, Screen::Solved);
    // Stored with millisecond precision.
    assert_eq!(reopened.elapsed().as_millis(), completion.as_millis());
}

fn app_playing_with_session(store: &SessionStore) -> cryptoquip::app::App {
    let (mut app, generation) = app_fetching(None);
    app.update(AppMessage::PuzzleLoaded {
        generation,
        puzzle: puzzle("p1", "AB", &[]),
    });
    app.update(AppMessage::SessionLoaded {
        game_id: "p1".to_string(),
        session: store.load("p1").unwrap(),
    });
    app
}

#[test]
fn test_unsynced_listing_filters_and_orders() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path());

    let mut solved_b = session("b", &[]);
    solved_b.solved = true;
    let mut solved_a = session("a", &[]);
    solved_a.solved = true;
    let mut uploaded = session("c", &[]);
    uploaded.solved = true;
    uploaded.uploaded = true;

    for s in [&solved_b, &solved_a, &uploaded, &session("d", &[('A', 'B')])] {
        store.save(s).unwrap();
    }
    fs::write(store.dir().join("junk.json"), "not json").unwrap();
    fs::write(store.dir().join("notes.txt"), "ignored").unwrap();

    let pending: Vec<String> = store
        .list_unsynced_solves()
        .unwrap()
        .into_iter()
        .map(|s| s.game_id)
        .collect();
    assert_eq!(pending, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn test_hostile_game_ids_stay_inside_the_sessions_dir() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path());

    let session = GameSession::new("../../escape/me");
    store.save(&session).unwrap();

    let path = store.session_path(&session.game_id);
    assert_eq!(path.parent(), Some(store.dir()));
    assert_eq!(store.load("../../escape/me").unwrap(), Some(session));
}

#[test]
fn test_session_json_uses_millisecond_durations() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path());

    let mut session = session("p1", &[('Q', 'E')]);
    session.elapsed_time = Duration::from_millis(90_500);
    store.save(&session).unwrap();

    let raw = fs::read_to_string(store.session_path("p1")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["elapsedTime"], 90_500);
    assert_eq!(json["completionTime"], 0);
    assert_eq!(json["solved"], false);
}

#[test]
fn test_player_store_round_trips_registration() {
    let dir = TempDir::new().unwrap();
    let store = PlayerStore::new(dir.path());
    assert!(store.load().unwrap().is_none());

    store.save(&PlayerConfig::opted_out()).unwrap();
    assert!(!store.load().unwrap().unwrap().is_registered());

    store.save(&registered_player()).unwrap();
    let loaded = store.load().unwrap().unwrap();
    assert_eq!(loaded.registered_id(), Some(PLAYER_ID));
    assert_eq!(loaded.claim_code.as_deref(), Some("CLAIM-1"));
}
