//! Puzzle grid rendering.
//!
//! Each layout line becomes an input row, a cipher row and a blank spacer.
//! Letter cells are registered as hit areas spanning both rows.

use std::collections::BTreeSet;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::interaction::HitAreaRegistry;
use super::theme;
use crate::grid::{self, Cell, CellKind};

/// Columns per cell: the glyph plus a gap.
pub const CELL_WIDTH: u16 = 2;

/// Rows per layout line: input, cipher, spacer.
pub const ROWS_PER_LINE: u16 = 3;

/// Width the grid may use inside `area`.
pub fn grid_width(area: Rect, max_width: u16) -> u16 {
    area.width.min(max_width).max(CELL_WIDTH)
}

/// Rows needed to show every line of the grid at `width`.
pub fn grid_height(cells: &[Cell], width: u16) -> u16 {
    let lines = grid::layout_lines(cells, CELL_WIDTH, width).len() as u16;
    lines.saturating_mul(ROWS_PER_LINE).saturating_sub(1)
}

/// First item to show so that `focus` stays inside a window of `visible`
/// items out of `len`.
pub fn scroll_offset(focus: Option<usize>, len: usize, visible: usize) -> usize {
    if visible == 0 || len <= visible {
        return 0;
    }
    match focus {
        Some(focus) if focus >= visible => (focus + 1 - visible).min(len - visible),
        _ => 0,
    }
}

/// Draw the grid and register letter-cell hit areas.
///
/// `cursor` is `None` when no cell should be highlighted (e.g. solved).
/// Lines that do not fit are scrolled so the cursor's line stays on screen,
/// and a word wider than the grid scrolls horizontally around the cursor.
/// Only cells that are actually drawn get a hit area.
pub fn render_grid(
    frame: &mut Frame,
    area: Rect,
    cells: &[Cell],
    cursor: Option<usize>,
    max_width: u16,
    hit_areas: &mut HitAreaRegistry,
) {
    let width = grid_width(area, max_width).min(area.width);
    let lines = grid::layout_lines(cells, CELL_WIDTH, width);
    let duplicates: BTreeSet<char> = grid::find_duplicate_inputs(cells);
    let left = area.x + (area.width.saturating_sub(width)) / 2;

    let visible_lines = (area.height.saturating_add(1) / ROWS_PER_LINE) as usize;
    let visible_cells = (width.saturating_add(1) / CELL_WIDTH) as usize;
    let cursor_line = cursor.and_then(|c| lines.iter().position(|range| range.contains(&c)));
    let first_line = scroll_offset(cursor_line, lines.len(), visible_lines);

    for (row, range) in lines.iter().skip(first_line).take(visible_lines).enumerate() {
        let top = area.y + (row as u16) * ROWS_PER_LINE;

        let focus = cursor
            .filter(|c| range.contains(c))
            .map(|c| c - range.start);
        let first_cell = range.start + scroll_offset(focus, range.len(), visible_cells);
        let shown = first_cell..range.end.min(first_cell + visible_cells);

        let mut input_spans = Vec::with_capacity(shown.len() * 2);
        let mut cipher_spans = Vec::with_capacity(shown.len() * 2);

        for (offset, index) in shown.clone().enumerate() {
            let cell = &cells[index];
            let style = theme::cell_style(grid::cell_style(cells, index, cursor, &duplicates));

            input_spans.push(Span::styled(cell.display_input().to_string(), style));
            input_spans.push(Span::raw(" "));
            cipher_spans.push(Span::styled(
                cell.display_cipher().to_string(),
                theme::cipher_style(),
            ));
            cipher_spans.push(Span::raw(" "));

            if cell.kind == CellKind::Letter {
                let x = left + offset as u16 * CELL_WIDTH;
                hit_areas.register(Rect::new(x, top, 1, 2), index);
            }
        }

        frame.render_widget(
            Paragraph::new(Line::from(input_spans)),
            Rect::new(left, top, width, 1),
        );
        frame.render_widget(
            Paragraph::new(Line::from(cipher_spans)),
            Rect::new(left, top + 1, width, 1),
        );
    }
}
