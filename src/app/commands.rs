//! Asynchronous units of work issued by the reducer.
//!
//! Each [`Command`] runs on the tokio runtime and resolves to at most one
//! [`AppMessage`]. Commands never see the [`App`](super::App); failures of
//! best-effort work are logged here and produce no message.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use super::messages::AppMessage;
use crate::api::PuzzleClient;
use crate::models::PuzzleRequest;
use crate::storage::{GameSession, PlayerConfig, PlayerStore, SessionStore, SessionWriter};

/// Interval between timer ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    LoadPlayerConfig,
    SavePlayerConfig(PlayerConfig),
    RegisterPlayer { player_id: String },
    FetchPuzzle { request: PuzzleRequest, generation: u64 },
    LoadSession { game_id: String },
    SaveSession(GameSession),
    CheckSolution { game_id: String, solution: String },
    RecordSession {
        player_id: String,
        game_id: String,
        completion_time: Duration,
    },
    FetchStats { player_id: String },
    /// Upload every solved-but-unsynced session on disk
    ReconcileSessions { player_id: String },
    ScheduleTick { seq: u64 },
}

impl Command {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::LoadPlayerConfig => "load_player_config",
            Command::SavePlayerConfig(_) => "save_player_config",
            Command::RegisterPlayer { .. } => "register_player",
            Command::FetchPuzzle { .. } => "fetch_puzzle",
            Command::LoadSession { .. } => "load_session",
            Command::SaveSession(_) => "save_session",
            Command::CheckSolution { .. } => "check_solution",
            Command::RecordSession { .. } => "record_session",
            Command::FetchStats { .. } => "fetch_stats",
            Command::ReconcileSessions { .. } => "reconcile_sessions",
            Command::ScheduleTick { .. } => "schedule_tick",
        }
    }
}

/// Runs commands against the backend and the local stores.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    api: PuzzleClient,
    sessions: SessionWriter,
    players: PlayerStore,
    tx: UnboundedSender<AppMessage>,
    tick_interval: Duration,
}

/// Run blocking file I/O off the async worker threads.
async fn blocking<T, F>(f: F) -> Option<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(error = %err, "Blocking storage task failed");
            None
        }
    }
}

impl CommandRunner {
    pub fn new(
        api: PuzzleClient,
        sessions: SessionStore,
        players: PlayerStore,
        tx: UnboundedSender<AppMessage>,
    ) -> Self {
        Self {
            api,
            sessions: SessionWriter::new(sessions),
            players,
            tx,
            tick_interval: TICK_INTERVAL,
        }
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    pub fn sessions(&self) -> &SessionStore {
        self.sessions.store()
    }

    /// Ordered writer shared by every session save, including the one on exit.
    pub fn session_writer(&self) -> &SessionWriter {
        &self.sessions
    }

    /// Spawn `command`; its message, if any, is sent on the channel.
    ///
    /// Session saves take their write ticket here, in dispatch order.
    pub fn dispatch(&self, command: Command) {
        let runner = self.clone();
        let ticket = self.ticket_for(&command);
        tokio::spawn(async move {
            if let Some(msg) = runner.run(command, ticket).await {
                // The receiver is gone only during shutdown.
                let _ = runner.tx.send(msg);
            }
        });
    }

    pub fn dispatch_all(&self, commands: Vec<Command>) {
        for command in commands {
            self.dispatch(command);
        }
    }

    fn ticket_for(&self, command: &Command) -> Option<u64> {
        match command {
            Command::SaveSession(_) => Some(self.sessions.ticket()),
            _ => None,
        }
    }

    /// Run one command to completion.
    pub async fn execute(&self, command: Command) -> Option<AppMessage> {
        let ticket = self.ticket_for(&command);
        self.run(command, ticket).await
    }

    async fn run(&self, command: Command, ticket: Option<u64>) -> Option<AppMessage> {
        debug!(command = command.name(), "Executing command");
        match command {
            Command::LoadPlayerConfig => {
                let players = self.players.clone();
                let loaded = blocking(move || players.load()).await?;
                let config = loaded.unwrap_or_else(|err| {
                    warn!(error = %err, "Ignoring unreadable player config");
                    None
                });
                Some(AppMessage::PlayerConfigLoaded(config))
            }

            Command::SavePlayerConfig(config) => {
                let players = self.players.clone();
                if let Some(Err(err)) = blocking(move || players.save(&config)).await {
                    warn!(error = %err, "Failed to save player config");
                }
                None
            }

            Command::RegisterPlayer { player_id } => {
                match self.api.register_player(&player_id).await {
                    Ok(claim_code) => {
                        info!(player_id = %player_id, "Registered player");
                        Some(AppMessage::PlayerRegistered {
                            player_id,
                            claim_code,
                        })
                    }
                    Err(err) => {
                        warn!(code = err.error_code(), error = %err, "Player registration failed");
                        Some(AppMessage::PlayerRegistrationFailed(err))
                    }
                }
            }

            Command::FetchPuzzle {
                request,
                generation,
            } => match self.api.fetch_puzzle(&request).await {
                Ok(puzzle) => {
                    info!(game_id = %puzzle.id, generation, "Puzzle loaded");
                    Some(AppMessage::PuzzleLoaded { generation, puzzle })
                }
                Err(err) => {
                    warn!(
                        code = err.error_code(),
                        retryable = err.is_retryable(),
                        error = %err,
                        generation,
                        "Puzzle fetch failed"
                    );
                    Some(AppMessage::PuzzleLoadFailed {
                        generation,
                        error: err,
                    })
                }
            },

            Command::LoadSession { game_id } => {
                let sessions = self.sessions.store().clone();
                let id = game_id.clone();
                let loaded = blocking(move || sessions.load(&id)).await;
                let session = match loaded {
                    Some(Ok(session)) => session,
                    Some(Err(err)) => {
                        warn!(game_id = %game_id, error = %err, "Treating unreadable session as absent");
                        None
                    }
                    None => None,
                };
                Some(AppMessage::SessionLoaded { game_id, session })
            }

            Command::SaveSession(session) => {
                let writer = self.sessions.clone();
                let ticket = ticket.unwrap_or_else(|| writer.ticket());
                let game_id = session.game_id.clone();
                if let Some(Err(err)) = blocking(move || writer.write(ticket, &session)).await {
                    warn!(game_id = %game_id, error = %err, "Failed to save session");
                }
                None
            }

            Command::CheckSolution { game_id, solution } => {
                match self.api.check_solution(&game_id, &solution).await {
                    Ok(correct) => {
                        info!(game_id = %game_id, correct, "Solution checked");
                        Some(AppMessage::CheckCompleted { game_id, correct })
                    }
                    Err(err) => {
                        warn!(
                            game_id = %game_id,
                            code = err.error_code(),
                            retryable = err.is_retryable(),
                            error = %err,
                            "Solution check failed"
                        );
                        Some(AppMessage::CheckFailed {
                            game_id,
                            error: err,
                        })
                    }
                }
            }

            Command::RecordSession {
                player_id,
                game_id,
                completion_time,
            } => match self
                .api
                .record_session(&player_id, &game_id, completion_time)
                .await
            {
                Ok(()) => Some(AppMessage::SessionRecorded { game_id }),
                Err(err) => {
                    warn!(game_id = %game_id, code = err.error_code(), error = %err, "Failed to record session");
                    None
                }
            },

            Command::FetchStats { player_id } => match self.api.fetch_stats(&player_id).await {
                Ok(stats) => Some(AppMessage::StatsLoaded(stats)),
                Err(err) => {
                    warn!(code = err.error_code(), retryable = err.is_retryable(), error = %err, "Stats fetch failed");
                    Some(AppMessage::StatsLoadFailed(err))
                }
            },

            Command::ReconcileSessions { player_id } => {
                let uploaded = self.reconcile(&player_id).await;
                Some(AppMessage::SessionsReconciled { uploaded })
            }

            Command::ScheduleTick { seq } => {
                tokio::time::sleep(self.tick_interval).await;
                Some(AppMessage::Tick { seq })
            }
        }
    }

    /// Record every unsynced solve and mark the successful ones uploaded.
    async fn reconcile(&self, player_id: &str) -> usize {
        let sessions = self.sessions.store().clone();
        let pending = match blocking(move || sessions.list_unsynced_solves()).await {
            Some(Ok(pending)) => pending,
            Some(Err(err)) => {
                warn!(error = %err, "Could not list stored sessions");
                return 0;
            }
            None => return 0,
        };

        let mut uploaded = 0;
        for mut session in pending {
            if let Err(err) = self
                .api
                .record_session(player_id, &session.game_id, session.completion_time)
                .await
            {
                warn!(
                    game_id = %session.game_id,
                    code = err.error_code(),
                    error = %err,
                    "Reconciliation upload failed"
                );
                continue;
            }

            session.uploaded = true;
            let writer = self.sessions.clone();
            let game_id = session.game_id.clone();
            match blocking(move || writer.write_latest(&session)).await {
                Some(Ok(_)) => uploaded += 1,
                Some(Err(err)) => {
                    warn!(game_id = %game_id, error = %err, "Failed to mark session uploaded")
                }
                None => {}
            }
        }

        info!(uploaded, "Session reconciliation finished");
        uploaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::traits::HttpError;
    use serde_json::json;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tokio::sync::mpsc;

    fn runner(dir: &TempDir, mock: &MockHttpClient) -> (CommandRunner, mpsc::UnboundedReceiver<AppMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let api = PuzzleClient::new("http://test", Arc::new(mock.clone()));
        let runner = CommandRunner::new(
            api,
            SessionStore::new(dir.path()),
            PlayerStore::new(dir.path()),
            tx,
        )
        .with_tick_interval(Duration::from_millis(1));
        (runner, rx)
    }

    fn solved(game_id: &str) -> GameSession {
        let mut session = GameSession::new(game_id);
        session.solved = true;
        session.completion_time = Duration::from_secs(61);
        session
    }

    #[tokio::test]
    async fn test_load_player_config_absent() {
        let dir = TempDir::new().unwrap();
        let (runner, _rx) = runner(&dir, &MockHttpClient::new());

        let msg = runner.execute(Command::LoadPlayerConfig).await;
        assert!(matches!(msg, Some(AppMessage::PlayerConfigLoaded(None))));
    }

    #[tokio::test]
    async fn test_corrupt_session_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let (runner, _rx) = runner(&dir, &MockHttpClient::new());
        std::fs::create_dir_all(runner.sessions().dir()).unwrap();
        std::fs::write(runner.sessions().session_path("p1"), "garbage").unwrap();

        let msg = runner
            .execute(Command::LoadSession {
                game_id: "p1".to_string(),
            })
            .await;
        match msg {
            Some(AppMessage::SessionLoaded { game_id, session }) => {
                assert_eq!(game_id, "p1");
                assert!(session.is_none());
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_save_session_yields_no_message() {
        let dir = TempDir::new().unwrap();
        let (runner, _rx) = runner(&dir, &MockHttpClient::new());

        let msg = runner
            .execute(Command::SaveSession(GameSession::new("p1")))
            .await;
        assert!(msg.is_none());
        assert!(runner.sessions().load("p1").unwrap().is_some());
    }

    #[tokio::test]
    async fn test_record_failure_is_silent() {
        let dir = TempDir::new().unwrap();
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Error(HttpError::ConnectionFailed(
            "refused".to_string(),
        )));
        let (runner, _rx) = runner(&dir, &mock);

        let msg = runner
            .execute(Command::RecordSession {
                player_id: "abc".to_string(),
                game_id: "p1".to_string(),
                completion_time: Duration::from_secs(5),
            })
            .await;
        assert!(msg.is_none());
    }

    #[tokio::test]
    async fn test_reconcile_marks_uploaded_and_skips_failures() {
        let dir = TempDir::new().unwrap();
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Success(crate::traits::Response::new(
            204,
            bytes::Bytes::new(),
        )));
        let (runner, _rx) = runner(&dir, &mock);

        runner.sessions().save(&solved("a")).unwrap();
        runner.sessions().save(&GameSession::new("b")).unwrap();
        let mut done = solved("c");
        done.uploaded = true;
        runner.sessions().save(&done).unwrap();

        let msg = runner
            .execute(Command::ReconcileSessions {
                player_id: "abc".to_string(),
            })
            .await;

        assert!(matches!(msg, Some(AppMessage::SessionsReconciled { uploaded: 1 })));
        assert!(runner.sessions().load("a").unwrap().unwrap().uploaded);
        assert!(runner.sessions().list_unsynced_solves().unwrap().is_empty());

        let requests = mock.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].json_body().unwrap(),
            json!({"gameId": "a", "completionTimeMs": 61_000})
        );
    }

    #[tokio::test]
    async fn test_dispatch_sends_tick() {
        let dir = TempDir::new().unwrap();
        let (runner, mut rx) = runner(&dir, &MockHttpClient::new());

        runner.dispatch(Command::ScheduleTick { seq: 7 });
        let msg = rx.recv().await;
        assert!(matches!(msg, Some(AppMessage::Tick { seq: 7 })));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_back_to_back_saves_leave_the_last_snapshot() {
        let dir = TempDir::new().unwrap();
        let (runner, _rx) = runner(&dir, &MockHttpClient::new());

        let mut session = GameSession::new("p1");
        for cipher in 'A'..='Z' {
            session.inputs.insert(cipher, 'E');
            runner.dispatch(Command::SaveSession(session.clone()));
        }

        let mut on_disk = None;
        for _ in 0..200 {
            on_disk = runner.sessions().load("p1").unwrap();
            if on_disk.as_ref() == Some(&session) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(on_disk.as_ref(), Some(&session));

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(runner.sessions().load("p1").unwrap(), Some(session));
    }

    #[tokio::test]
    async fn test_exit_save_wins_over_pending_save() {
        let dir = TempDir::new().unwrap();
        let (runner, _rx) = runner(&dir, &MockHttpClient::new());

        let stale = GameSession::new("p1");
        let ticket = runner.session_writer().ticket();
        let mut last = stale.clone();
        last.solved = true;
        runner.session_writer().write_latest(&last).unwrap();

        assert!(!runner.session_writer().write(ticket, &stale).unwrap());
        assert_eq!(runner.sessions().load("p1").unwrap(), Some(last));
    }
}
