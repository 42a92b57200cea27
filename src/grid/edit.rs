//! Navigation and editing over a cell slice.
//!
//! Navigation only ever lands on [`CellKind::Letter`] cells. Editing keeps the
//! propagation invariant: every cell sharing a cipher character carries the
//! same input.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use super::cell::{Cell, CellKind, PLACEHOLDER};

fn is_letter(cell: &Cell) -> bool {
    cell.kind == CellKind::Letter
}

/// Index of the first letter cell.
pub fn first_letter_cell(cells: &[Cell]) -> Option<usize> {
    cells.iter().position(is_letter)
}

/// Index of the last letter cell.
pub fn last_letter_cell(cells: &[Cell]) -> Option<usize> {
    cells.iter().rposition(is_letter)
}

/// Nearest letter cell strictly after `from`. No wraparound.
pub fn next_letter_cell(cells: &[Cell], from: usize) -> Option<usize> {
    let start = from.checked_add(1)?;
    cells
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, c)| is_letter(c))
        .map(|(i, _)| i)
}

/// Nearest letter cell strictly before `from`. No wraparound.
pub fn prev_letter_cell(cells: &[Cell], from: usize) -> Option<usize> {
    let end = from.min(cells.len());
    cells[..end].iter().rposition(is_letter)
}

/// Nearest letter cell strictly after `from` that has no input yet.
pub fn next_unfilled_letter_cell(cells: &[Cell], from: usize) -> Option<usize> {
    let start = from.checked_add(1)?;
    cells
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, c)| is_letter(c) && c.input.is_none())
        .map(|(i, _)| i)
}

/// First letter cell without input, scanning from the start.
pub fn first_unfilled_letter_cell(cells: &[Cell]) -> Option<usize> {
    cells
        .iter()
        .position(|c| is_letter(c) && c.input.is_none())
}

/// Assign `letter` to the cell at `index` and every cell sharing its cipher
/// character. Returns `false` without touching anything unless the target is
/// a letter cell.
pub fn set_input(cells: &mut [Cell], index: usize, letter: char) -> bool {
    let Some(target) = cells.get(index) else {
        return false;
    };
    if !is_letter(target) {
        return false;
    }
    let cipher = target.ch;
    let letter = letter.to_ascii_uppercase();
    for cell in cells.iter_mut().filter(|c| c.ch == cipher && is_letter(c)) {
        cell.input = Some(letter);
    }
    true
}

/// Clear the input of the cell at `index` and every cell sharing its cipher
/// character. Same guard as [`set_input`].
pub fn clear_input(cells: &mut [Cell], index: usize) -> bool {
    let Some(target) = cells.get(index) else {
        return false;
    };
    if !is_letter(target) {
        return false;
    }
    let cipher = target.ch;
    for cell in cells.iter_mut().filter(|c| c.ch == cipher && is_letter(c)) {
        cell.input = None;
    }
    true
}

/// Clear every letter cell. Hint cells keep their revealed input.
pub fn clear_all_input(cells: &mut [Cell]) {
    for cell in cells.iter_mut().filter(|c| is_letter(c)) {
        cell.input = None;
    }
}

/// Plaintext letters the player has assigned to two or more distinct cipher
/// letters. Hint cells are ignored.
pub fn find_duplicate_inputs(cells: &[Cell]) -> BTreeSet<char> {
    let mut assigned: HashMap<char, HashSet<char>> = HashMap::new();
    for cell in cells.iter().filter(|c| is_letter(c)) {
        if let Some(input) = cell.input {
            assigned.entry(input).or_default().insert(cell.ch);
        }
    }
    assigned
        .into_iter()
        .filter(|(_, ciphers)| ciphers.len() >= 2)
        .map(|(input, _)| input)
        .collect()
}

/// True when every letter cell has an input.
pub fn is_complete(cells: &[Cell]) -> bool {
    cells
        .iter()
        .filter(|c| is_letter(c))
        .all(|c| c.input.is_some())
}

/// Candidate solution string, in index order.
pub fn assemble_solution(cells: &[Cell]) -> String {
    cells
        .iter()
        .map(|c| match c.kind {
            CellKind::Punctuation => c.ch,
            CellKind::Letter | CellKind::Hint => c.input.unwrap_or(PLACEHOLDER),
        })
        .collect()
}

/// Current letter-cell assignments keyed by cipher character.
///
/// Hint assignments are left out; they are re-derived from the puzzle.
pub fn letter_inputs(cells: &[Cell]) -> BTreeMap<char, char> {
    cells
        .iter()
        .filter(|c| is_letter(c))
        .filter_map(|c| c.input.map(|input| (c.ch, input)))
        .collect()
}
