//! Puzzle grid: cell model, layout and the editing engine.
//!
//! - [`cell`] - [`Cell`], [`CellKind`] and [`build_cells`]
//! - [`layout`] - word grouping, wrapping and input-row styles
//! - [`edit`] - letter-cell navigation, propagating edits, duplicate detection

pub mod cell;
pub mod edit;
pub mod layout;

pub use cell::{build_cells, Cell, CellKind, PLACEHOLDER};
pub use edit::{
    assemble_solution, clear_all_input, clear_input, find_duplicate_inputs,
    first_letter_cell, first_unfilled_letter_cell, is_complete, last_letter_cell, letter_inputs,
    next_letter_cell, next_unfilled_letter_cell, prev_letter_cell, set_input,
};
pub use layout::{cell_style, group_words, layout_lines, wrap_lines, CellStyle};
