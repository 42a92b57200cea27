//! Type definitions for the application state.
//!
//! - [`Screen`] - which screen is currently displayed
//! - [`StatsOrigin`] - where the stats screen returns to
//! - [`ErrorState`] - message and retry for the error screen

use super::commands::Command;

/// Represents which screen is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Loading,
    Playing,
    Checking,
    Solved,
    Error,
    Onboarding,
    ClaimCodeDisplay,
    Stats,
}

/// Where the stats view was opened from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatsOrigin {
    /// From the solved screen; leaving returns there
    #[default]
    Solved,
    /// Launched with `--stats`; leaving exits
    Standalone,
}

/// What the error screen shows and what `r` re-issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorState {
    pub message: String,
    pub retry: Option<Command>,
}

impl ErrorState {
    pub fn new(message: impl Into<String>, retry: Option<Command>) -> Self {
        Self {
            message: message.into(),
            retry,
        }
    }
}
