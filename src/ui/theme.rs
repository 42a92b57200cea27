//! Color theme for the puzzle UI.
//!
//! Fixed dark palette; styles for each grid cell state live here.

use ratatui::style::{Color, Modifier, Style};

use crate::grid::CellStyle;

/// Frame borders
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Titles and emphasized text
pub const COLOR_ACCENT: Color = Color::White;

/// Dim text for less important info
pub const COLOR_DIM: Color = Color::DarkGray;

/// Cursor cell background
pub const COLOR_CURSOR: Color = Color::Yellow;

/// Letter assigned to two cipher letters
pub const COLOR_DUPLICATE: Color = Color::Red;

/// Cells sharing the cursor's cipher letter
pub const COLOR_RELATED: Color = Color::Cyan;

/// Revealed hint letters
pub const COLOR_HINT: Color = Color::Green;

pub const COLOR_SUCCESS: Color = Color::Rgb(4, 181, 117); // green #04B575

pub const COLOR_ERROR: Color = Color::Red;

/// Status line feedback
pub const COLOR_STATUS: Color = Color::Yellow;

/// Style of one input-row cell.
pub fn cell_style(style: CellStyle) -> Style {
    match style {
        CellStyle::Active => Style::default()
            .fg(Color::Black)
            .bg(COLOR_CURSOR)
            .add_modifier(Modifier::BOLD),
        CellStyle::Duplicate => Style::default()
            .fg(COLOR_DUPLICATE)
            .add_modifier(Modifier::BOLD),
        CellStyle::Related => Style::default()
            .fg(COLOR_RELATED)
            .add_modifier(Modifier::UNDERLINED),
        CellStyle::Hint => Style::default().fg(COLOR_HINT),
        CellStyle::Default => Style::default().fg(COLOR_ACCENT),
        CellStyle::Literal => Style::default().fg(Color::Gray),
    }
}

/// Style of the cipher row.
pub fn cipher_style() -> Style {
    Style::default().fg(COLOR_DIM)
}

pub fn title_style() -> Style {
    Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD)
}

pub fn key_hint_style() -> Style {
    Style::default().fg(COLOR_DIM)
}
