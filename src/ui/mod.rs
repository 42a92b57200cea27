//! Terminal UI rendering.
//!
//! [`render`] draws the current screen and rebuilds the click hit-test table
//! on every frame.

pub mod grid;
pub mod helpers;
pub mod interaction;
mod screens;
pub mod theme;

pub use grid::{render_grid, CELL_WIDTH};
pub use helpers::format_duration;
pub use interaction::{HitArea, HitAreaRegistry};

use ratatui::Frame;

use crate::app::{App, Screen};

/// Render the UI based on current screen
pub fn render(frame: &mut Frame, app: &mut App) {
    app.hit_areas.clear();
    let area = frame.area();

    match app.screen {
        Screen::Loading => screens::render_loading(frame, area, app),
        Screen::Playing | Screen::Checking | Screen::Solved => {
            screens::render_puzzle(frame, area, app)
        }
        Screen::Error => screens::render_error(frame, area, app),
        Screen::Onboarding => screens::render_onboarding(frame, area),
        Screen::ClaimCodeDisplay => screens::render_claim_code(frame, area, app),
        Screen::Stats => screens::render_stats(frame, area, app),
    }
}
