//! Message handling for command results.

use tracing::{debug, info, warn};

use super::{App, AppMessage, Command, Screen, StatsOrigin};
use crate::grid::{self, CellKind};
use crate::models::{Puzzle, PuzzleRequest};
use crate::startup::LaunchMode;
use crate::storage::{GameSession, PlayerConfig};

impl App {
    /// Handle a command result. Terminal events are routed elsewhere.
    pub(super) fn handle_message(&mut self, msg: AppMessage) -> Vec<Command> {
        match msg {
            AppMessage::PlayerConfigLoaded(config) => self.on_player_config(config),
            AppMessage::PlayerRegistered {
                player_id,
                claim_code,
            } => self.on_registered(player_id, claim_code),
            AppMessage::PlayerRegistrationFailed(error) => {
                if !self.registering {
                    return Vec::new();
                }
                self.registering = false;
                self.status = Some(format!(
                    "Could not register ({}). Playing without stats this time.",
                    error.user_message()
                ));
                self.start_launch()
            }
            AppMessage::PuzzleLoaded { generation, puzzle } => {
                if generation != self.fetch_generation {
                    debug!(generation, latest = self.fetch_generation, "Dropping stale puzzle");
                    return Vec::new();
                }
                self.on_puzzle_loaded(puzzle)
            }
            AppMessage::PuzzleLoadFailed { generation, error } => {
                if generation != self.fetch_generation {
                    return Vec::new();
                }
                let request = self.launch_request();
                self.show_error(
                    error.user_message(),
                    Some(Command::FetchPuzzle {
                        request,
                        generation,
                    }),
                );
                Vec::new()
            }
            AppMessage::SessionLoaded { game_id, session } => {
                if self.game_id() != Some(game_id.as_str()) || !self.awaiting_session {
                    debug!(game_id = %game_id, "Dropping session for another puzzle");
                    return Vec::new();
                }
                self.awaiting_session = false;
                match session {
                    Some(session) => self.restore_session(session),
                    None => Vec::new(),
                }
            }
            AppMessage::CheckCompleted { game_id, correct } => {
                if self.game_id() != Some(game_id.as_str()) || self.screen != Screen::Checking {
                    return Vec::new();
                }
                if correct {
                    self.on_solved()
                } else {
                    self.screen = Screen::Playing;
                    self.status = Some("Not quite. Keep trying!".to_string());
                    vec![self.restart_ticks()]
                }
            }
            AppMessage::CheckFailed { game_id, error } => {
                if self.game_id() != Some(game_id.as_str()) || self.screen != Screen::Checking {
                    return Vec::new();
                }
                let solution = grid::assemble_solution(&self.cells);
                self.show_error(
                    error.user_message(),
                    Some(Command::CheckSolution { game_id, solution }),
                );
                Vec::new()
            }
            AppMessage::SessionRecorded { game_id } => {
                if self.game_id() != Some(game_id.as_str()) || !self.solved {
                    return Vec::new();
                }
                self.uploaded = true;
                self.save_command().into_iter().collect()
            }
            AppMessage::StatsLoaded(stats) => {
                if !self.awaiting_stats {
                    return Vec::new();
                }
                self.awaiting_stats = false;
                self.stats = Some(stats);
                self.screen = Screen::Stats;
                Vec::new()
            }
            AppMessage::StatsLoadFailed(error) => {
                if !self.awaiting_stats {
                    return Vec::new();
                }
                self.awaiting_stats = false;
                match self.stats_origin {
                    StatsOrigin::Solved => {
                        self.screen = Screen::Solved;
                        self.status = Some(error.user_message());
                    }
                    StatsOrigin::Standalone => {
                        let retry = self
                            .player_id()
                            .map(|id| Command::FetchStats {
                                player_id: id.to_string(),
                            });
                        self.show_error(error.user_message(), retry);
                    }
                }
                Vec::new()
            }
            AppMessage::SessionsReconciled { uploaded } => {
                if uploaded > 0 {
                    info!(uploaded, "Uploaded earlier solves");
                }
                Vec::new()
            }
            AppMessage::Key(_)
            | AppMessage::Mouse(_)
            | AppMessage::Resize { .. }
            | AppMessage::Tick { .. } => Vec::new(),
        }
    }

    /// Keep a tick chain alive only while playing with the current `seq`.
    pub(super) fn handle_tick(&mut self, seq: u64) -> Vec<Command> {
        if self.screen != Screen::Playing || seq != self.tick_seq {
            return Vec::new();
        }
        self.mark_dirty();
        vec![Command::ScheduleTick { seq }]
    }

    /// Re-issue the command behind the error screen.
    pub(super) fn retry(&mut self) -> Vec<Command> {
        let Some(retry) = self.error.as_ref().and_then(|e| e.retry.clone()) else {
            return Vec::new();
        };
        info!(command = retry.name(), "Retrying");
        match retry {
            Command::FetchPuzzle { request, .. } => vec![self.begin_fetch(request)],
            Command::FetchStats { player_id } => vec![self.begin_stats_fetch(player_id)],
            Command::CheckSolution { .. } => {
                self.error = None;
                self.screen = Screen::Checking;
                vec![retry]
            }
            other => {
                self.error = None;
                vec![other]
            }
        }
    }

    fn launch_request(&self) -> PuzzleRequest {
        match self.launch {
            LaunchMode::Play(request) => request,
            LaunchMode::Stats => PuzzleRequest::Today,
        }
    }

    fn on_player_config(&mut self, config: Option<PlayerConfig>) -> Vec<Command> {
        let Some(config) = config else {
            info!("No player configuration, starting onboarding");
            self.screen = Screen::Onboarding;
            return Vec::new();
        };

        self.player = Some(config);
        let mut commands = Vec::new();
        if let Some(player_id) = self.player_id() {
            commands.push(Command::ReconcileSessions {
                player_id: player_id.to_string(),
            });
        }
        commands.extend(self.start_launch());
        commands
    }

    fn on_registered(&mut self, player_id: String, claim_code: String) -> Vec<Command> {
        if !self.registering {
            return Vec::new();
        }
        self.registering = false;
        let config = PlayerConfig::registered(player_id, claim_code.clone());
        self.player = Some(config.clone());
        self.claim_code = Some(claim_code);
        self.screen = Screen::ClaimCodeDisplay;
        vec![Command::SavePlayerConfig(config)]
    }

    /// Opting in or out from the onboarding prompt.
    pub(super) fn answer_onboarding(&mut self, opt_in: bool) -> Vec<Command> {
        if opt_in {
            let player_id = uuid::Uuid::new_v4().to_string();
            info!(player_id = %player_id, "Player opted in");
            self.registering = true;
            self.screen = Screen::Loading;
            self.loading_message = "Registering...".to_string();
            vec![Command::RegisterPlayer { player_id }]
        } else {
            info!("Player opted out");
            let config = PlayerConfig::opted_out();
            self.player = Some(config.clone());
            let mut commands = vec![Command::SavePlayerConfig(config)];
            commands.extend(self.start_launch());
            commands
        }
    }

    fn on_puzzle_loaded(&mut self, puzzle: Puzzle) -> Vec<Command> {
        info!(game_id = %puzzle.id, "Starting puzzle");
        self.cells = grid::build_cells(&puzzle.encrypted_text, &puzzle.hint_map());
        self.cursor = grid::first_letter_cell(&self.cells);
        self.timer.restart();
        self.solved = false;
        self.completion_time = std::time::Duration::ZERO;
        self.uploaded = false;
        self.has_session = false;
        self.awaiting_session = true;
        self.error = None;
        self.screen = Screen::Playing;

        let game_id = puzzle.id.clone();
        self.puzzle = Some(puzzle);
        vec![Command::LoadSession { game_id }, self.restart_ticks()]
    }

    fn restore_session(&mut self, session: GameSession) -> Vec<Command> {
        info!(game_id = %session.game_id, solved = session.solved, "Restoring session");
        self.has_session = true;
        for (&cipher, &plain) in &session.inputs {
            let target = self
                .cells
                .iter()
                .position(|c| c.kind == CellKind::Letter && c.ch == cipher);
            if let Some(index) = target {
                grid::set_input(&mut self.cells, index, plain);
            }
        }

        if !session.solved {
            self.timer.add(session.elapsed_time);
            return Vec::new();
        }

        self.solved = true;
        self.completion_time = session.completion_time;
        self.uploaded = session.uploaded;
        self.timer.freeze_at(session.completion_time);
        self.screen = Screen::Solved;

        if session.needs_upload() {
            self.record_command().into_iter().collect()
        } else {
            Vec::new()
        }
    }

    fn on_solved(&mut self) -> Vec<Command> {
        self.completion_time = self.timer.stop();
        self.solved = true;
        self.screen = Screen::Solved;
        self.status = None;
        info!(
            game_id = ?self.game_id(),
            completion_ms = self.completion_time.as_millis() as u64,
            "Puzzle solved"
        );

        let mut commands: Vec<Command> = self.save_command().into_iter().collect();
        match self.record_command() {
            Some(record) => commands.push(record),
            None => debug!("Not registered, solve stays local"),
        }
        commands
    }

    pub(super) fn open_stats(&mut self) -> Vec<Command> {
        match self.player_id().map(str::to_string) {
            Some(player_id) => {
                self.stats_origin = StatsOrigin::Solved;
                self.status = None;
                vec![self.begin_stats_fetch(player_id)]
            }
            None => {
                warn!("Stats requested without a registered player");
                self.status = Some("Statistics are only available to players who opted in.".to_string());
                Vec::new()
            }
        }
    }
}
