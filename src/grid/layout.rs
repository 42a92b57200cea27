//! Word-preserving line layout and input-row styling.
//!
//! Layout is two passes over the cell sequence:
//!
//! 1. [`group_words`] splits the cells into atomic word groups. A group ends
//!    at, and includes, its trailing whitespace.
//! 2. [`wrap_lines`] greedily packs whole groups into lines no wider than the
//!    configured maximum. A group that alone exceeds the maximum gets a line
//!    of its own and is never split.

use std::collections::BTreeSet;
use std::ops::Range;

use super::cell::{Cell, CellKind};

/// Partition the cells into word groups (as index ranges).
pub fn group_words(cells: &[Cell]) -> Vec<Range<usize>> {
    let mut groups = Vec::new();
    let mut start = 0;
    let mut in_trailing_space = false;

    for (i, cell) in cells.iter().enumerate() {
        if cell.is_whitespace() {
            in_trailing_space = true;
        } else if in_trailing_space {
            groups.push(start..i);
            start = i;
            in_trailing_space = false;
        }
    }
    if start < cells.len() {
        groups.push(start..cells.len());
    }
    groups
}

/// Pack word groups into lines of at most `max_width` columns, where every
/// cell occupies `cell_width` columns.
pub fn wrap_lines(groups: &[Range<usize>], cell_width: u16, max_width: u16) -> Vec<Range<usize>> {
    let cell_width = usize::from(cell_width.max(1));
    let max_width = usize::from(max_width);
    let mut lines: Vec<Range<usize>> = Vec::new();
    let mut current: Option<Range<usize>> = None;

    for group in groups {
        current = match current {
            None => Some(group.clone()),
            Some(line) => {
                let cells_in_line = line.len() + group.len();
                if cells_in_line * cell_width <= max_width {
                    Some(line.start..group.end)
                } else {
                    lines.push(line);
                    Some(group.clone())
                }
            }
        };
    }
    if let Some(line) = current {
        lines.push(line);
    }
    lines
}

/// Group and wrap in one call.
pub fn layout_lines(cells: &[Cell], cell_width: u16, max_width: u16) -> Vec<Range<usize>> {
    wrap_lines(&group_words(cells), cell_width, max_width)
}

/// Visual treatment of a cell on the input row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    /// The cell under the cursor
    Active,
    /// The cell's input is assigned to more than one cipher letter
    Duplicate,
    /// Same cipher letter as the cursor cell
    Related,
    /// A revealed hint
    Hint,
    Default,
    /// Punctuation and whitespace, drawn as-is
    Literal,
}

/// Resolve the style of `cells[index]`. First match wins: active, duplicate,
/// related, hint, default.
pub fn cell_style(
    cells: &[Cell],
    index: usize,
    cursor: Option<usize>,
    duplicates: &BTreeSet<char>,
) -> CellStyle {
    let Some(cell) = cells.get(index) else {
        return CellStyle::Literal;
    };
    if cell.kind == CellKind::Punctuation {
        return CellStyle::Literal;
    }
    if cursor == Some(index) {
        return CellStyle::Active;
    }
    if cell.input.is_some_and(|input| duplicates.contains(&input)) {
        return CellStyle::Duplicate;
    }
    let cursor_char = cursor.and_then(|c| cells.get(c)).map(|c| c.ch);
    if cursor_char == Some(cell.ch) {
        return CellStyle::Related;
    }
    if cell.kind == CellKind::Hint {
        return CellStyle::Hint;
    }
    CellStyle::Default
}
