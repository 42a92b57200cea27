//! Application state and the reducer.
//!
//! - [`App`] - the single owner of all mutable state
//! - [`AppMessage`] - terminal events and command results
//! - [`Command`] / [`CommandRunner`] - asynchronous work issued by the reducer
//! - [`Screen`] - which screen is currently displayed
//!
//! The event loop feeds one message at a time into [`App::update`] and
//! dispatches the returned commands.

pub mod commands;
mod handlers;
mod input;
mod messages;
pub mod timer;
mod types;

pub use commands::{Command, CommandRunner, TICK_INTERVAL};
pub use messages::AppMessage;
pub use timer::GameTimer;
pub use types::{ErrorState, Screen, StatsOrigin};

use std::collections::BTreeSet;
use std::time::Duration;

use crate::grid::{self, Cell};
use crate::models::{PlayerStats, Puzzle, PuzzleRequest};
use crate::startup::{LaunchMode, DEFAULT_MAX_WIDTH};
use crate::storage::{GameSession, PlayerConfig};
use crate::ui::interaction::HitAreaRegistry;

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Current screen being displayed
    pub screen: Screen,
    /// Flag to track if the app should quit
    pub should_quit: bool,
    /// Set by every state change; cleared by the event loop after drawing
    pub needs_redraw: bool,
    /// What to do once the player configuration is settled
    pub launch: LaunchMode,
    /// Upper bound on the grid width in columns
    pub max_width: u16,

    /// Loaded player configuration (`None` on first run or unregistered fallback)
    pub player: Option<PlayerConfig>,
    /// Claim code shown after a successful registration
    pub claim_code: Option<String>,

    pub puzzle: Option<Puzzle>,
    pub cells: Vec<Cell>,
    /// Always indexes a `Letter` cell when set
    pub cursor: Option<usize>,
    pub timer: GameTimer,
    pub solved: bool,
    /// Frozen elapsed time of the solve
    pub completion_time: Duration,
    /// The solve has been recorded with the stats backend
    pub uploaded: bool,

    /// Transient one-line feedback (rejections, failures)
    pub status: Option<String>,
    /// Caption of the loading screen
    pub loading_message: String,
    pub error: Option<ErrorState>,
    pub stats: Option<PlayerStats>,
    pub stats_origin: StatsOrigin,

    /// Clickable cells registered by the last render
    pub hit_areas: HitAreaRegistry,

    /// Generation of the latest puzzle fetch; older results are dropped
    fetch_generation: u64,
    /// Sequence of the live tick chain
    tick_seq: u64,
    /// The stored session for the current puzzle has not been read yet
    awaiting_session: bool,
    /// A session exists on disk (or is about to) for the current puzzle
    has_session: bool,
    /// A stats fetch is in flight
    awaiting_stats: bool,
    /// A registration request is in flight
    registering: bool,
}

impl App {
    pub fn new(launch: LaunchMode) -> Self {
        Self {
            screen: Screen::Loading,
            should_quit: false,
            needs_redraw: true,
            launch,
            max_width: DEFAULT_MAX_WIDTH,
            player: None,
            claim_code: None,
            puzzle: None,
            cells: Vec::new(),
            cursor: None,
            timer: GameTimer::new(),
            solved: false,
            completion_time: Duration::ZERO,
            uploaded: false,
            status: None,
            loading_message: "Loading...".to_string(),
            error: None,
            stats: None,
            stats_origin: StatsOrigin::Solved,
            hit_areas: HitAreaRegistry::new(),
            fetch_generation: 0,
            tick_seq: 0,
            awaiting_session: false,
            has_session: false,
            awaiting_stats: false,
            registering: false,
        }
    }

    pub fn with_max_width(mut self, max_width: u16) -> Self {
        self.max_width = max_width;
        self
    }

    /// Commands to issue at startup.
    pub fn init(&mut self) -> Vec<Command> {
        self.screen = Screen::Loading;
        self.loading_message = "Loading player profile...".to_string();
        vec![Command::LoadPlayerConfig]
    }

    /// Consume one message and return the commands it triggers.
    pub fn update(&mut self, msg: AppMessage) -> Vec<Command> {
        match msg {
            AppMessage::Tick { seq } => self.handle_tick(seq),
            AppMessage::Key(key) => {
                self.mark_dirty();
                self.handle_key(key)
            }
            AppMessage::Mouse(mouse) => self.handle_mouse(mouse),
            AppMessage::Resize { .. } => {
                self.mark_dirty();
                Vec::new()
            }
            other => {
                self.mark_dirty();
                self.handle_message(other)
            }
        }
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn quit(&mut self) {
        tracing::info!(screen = ?self.screen, "Quit requested");
        self.should_quit = true;
    }

    /// Registered player id, if any.
    pub fn player_id(&self) -> Option<&str> {
        self.player.as_ref().and_then(PlayerConfig::registered_id)
    }

    pub fn is_registered(&self) -> bool {
        self.player_id().is_some()
    }

    pub fn game_id(&self) -> Option<&str> {
        self.puzzle.as_ref().map(|p| p.id.as_str())
    }

    pub fn elapsed(&self) -> Duration {
        if self.solved {
            self.completion_time
        } else {
            self.timer.elapsed()
        }
    }

    /// Plaintext letters assigned to more than one cipher letter.
    pub fn duplicates(&self) -> BTreeSet<char> {
        grid::find_duplicate_inputs(&self.cells)
    }

    /// Edits are accepted only while playing a puzzle whose stored session
    /// has already been read.
    pub fn edits_allowed(&self) -> bool {
        self.screen == Screen::Playing && self.puzzle.is_some() && !self.awaiting_session
    }

    /// Snapshot of the current puzzle's progress, once a session exists.
    pub fn session_snapshot(&self) -> Option<GameSession> {
        let puzzle = self.puzzle.as_ref()?;
        if !self.has_session || self.awaiting_session {
            return None;
        }
        Some(GameSession {
            game_id: puzzle.id.clone(),
            inputs: grid::letter_inputs(&self.cells),
            elapsed_time: self.elapsed(),
            solved: self.solved,
            completion_time: if self.solved {
                self.completion_time
            } else {
                Duration::ZERO
            },
            uploaded: self.uploaded,
        })
    }

    /// Route to the launch target once the player configuration is settled.
    fn start_launch(&mut self) -> Vec<Command> {
        match self.launch {
            LaunchMode::Play(request) => vec![self.begin_fetch(request)],
            LaunchMode::Stats => match self.player_id().map(str::to_string) {
                Some(player_id) => {
                    self.stats_origin = StatsOrigin::Standalone;
                    vec![self.begin_stats_fetch(player_id)]
                }
                None => {
                    self.show_error(
                        "Statistics are only available to players who opted in.",
                        None,
                    );
                    Vec::new()
                }
            },
        }
    }

    fn begin_fetch(&mut self, request: PuzzleRequest) -> Command {
        self.fetch_generation += 1;
        self.screen = Screen::Loading;
        self.loading_message = format!("Fetching {}...", request);
        self.error = None;
        Command::FetchPuzzle {
            request,
            generation: self.fetch_generation,
        }
    }

    fn begin_stats_fetch(&mut self, player_id: String) -> Command {
        self.screen = Screen::Loading;
        self.loading_message = "Loading your statistics...".to_string();
        self.awaiting_stats = true;
        self.error = None;
        Command::FetchStats { player_id }
    }

    /// Start a new tick chain, superseding any older one.
    fn restart_ticks(&mut self) -> Command {
        self.tick_seq += 1;
        Command::ScheduleTick { seq: self.tick_seq }
    }

    fn show_error(&mut self, message: impl Into<String>, retry: Option<Command>) {
        let error = ErrorState::new(message, retry);
        tracing::info!(message = %error.message, retryable = error.retry.is_some(), "Showing error screen");
        self.error = Some(error);
        self.screen = Screen::Error;
    }

    /// Persist the current progress, creating the session if needed.
    fn save_command(&mut self) -> Option<Command> {
        self.has_session = true;
        self.session_snapshot().map(Command::SaveSession)
    }

    fn record_command(&self) -> Option<Command> {
        let player_id = self.player_id()?;
        let game_id = self.game_id()?;
        Some(Command::RecordSession {
            player_id: player_id.to_string(),
            game_id: game_id.to_string(),
            completion_time: self.completion_time,
        })
    }
}
