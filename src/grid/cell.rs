//! Cell model for a cryptoquip grid.
//!
//! A puzzle's encrypted text is turned into one [`Cell`] per character. The
//! cell's [`CellKind`] is decided exactly once, in [`build_cells`], and never
//! changes afterwards.

use std::collections::HashMap;

/// Placeholder shown (and assembled) for a letter cell without input.
pub const PLACEHOLDER: char = '_';

/// Classification of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Whitespace, punctuation, digits: anything the player never fills in.
    Punctuation,
    /// A cipher letter the player substitutes.
    Letter,
    /// A cipher letter whose plaintext was revealed by the puzzle.
    Hint,
}

/// One character position of the puzzle text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Position in the source text
    pub index: usize,
    /// Source character (cipher letter, punctuation or whitespace)
    pub ch: char,
    /// Fixed classification
    pub kind: CellKind,
    /// Current plaintext assignment
    pub input: Option<char>,
}

impl Cell {
    /// True for whitespace cells, which end a word group.
    pub fn is_whitespace(&self) -> bool {
        self.ch.is_whitespace()
    }

    /// Character shown on the input row.
    pub fn display_input(&self) -> char {
        match self.kind {
            CellKind::Punctuation => self.ch,
            CellKind::Letter | CellKind::Hint => self.input.unwrap_or(PLACEHOLDER),
        }
    }

    /// Character shown on the cipher row (blank under punctuation).
    pub fn display_cipher(&self) -> char {
        match self.kind {
            CellKind::Punctuation => ' ',
            CellKind::Letter | CellKind::Hint => self.ch,
        }
    }
}

/// Build the cell vector for a puzzle.
///
/// `hints` maps a cipher letter to its revealed plaintext letter. Keys and
/// values are matched case-insensitively and stored uppercase.
pub fn build_cells(text: &str, hints: &HashMap<char, char>) -> Vec<Cell> {
    let hints: HashMap<char, char> = hints
        .iter()
        .map(|(cipher, plain)| (cipher.to_ascii_uppercase(), plain.to_ascii_uppercase()))
        .collect();

    text.chars()
        .enumerate()
        .map(|(index, ch)| {
            if !ch.is_alphabetic() {
                return Cell {
                    index,
                    ch,
                    kind: CellKind::Punctuation,
                    input: None,
                };
            }
            match hints.get(&ch.to_ascii_uppercase()) {
                Some(&plain) => Cell {
                    index,
                    ch,
                    kind: CellKind::Hint,
                    input: Some(plain),
                },
                None => Cell {
                    index,
                    ch,
                    kind: CellKind::Letter,
                    input: None,
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_cells_classifies_letters_and_spaces() {
        let cells = build_cells("XMT KTQS", &HashMap::new());

        assert_eq!(cells.len(), 8);
        assert_eq!(cells[3].kind, CellKind::Punctuation);
        assert_eq!(cells[3].ch, ' ');
        assert!(cells
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 3)
            .all(|(_, c)| c.kind == CellKind::Letter && c.input.is_none()));
    }

    #[test]
    fn test_build_cells_indices_follow_source_positions() {
        let cells = build_cells("AB, C", &HashMap::new());
        for (i, cell) in cells.iter().enumerate() {
            assert_eq!(cell.index, i);
        }
        assert_eq!(cells[2].kind, CellKind::Punctuation);
    }

    #[test]
    fn test_build_cells_marks_hint_cells() {
        let hints = HashMap::from([('A', 'X')]);
        let cells = build_cells("AB CDA", &hints);

        assert_eq!(cells[0].kind, CellKind::Hint);
        assert_eq!(cells[0].input, Some('X'));
        assert_eq!(cells[5].kind, CellKind::Hint);
        assert_eq!(cells[5].input, Some('X'));
        assert_eq!(cells[1].kind, CellKind::Letter);
        assert_eq!(cells[1].input, None);
    }

    #[test]
    fn test_build_cells_hint_keys_are_case_insensitive() {
        let hints = HashMap::from([('q', 'e')]);
        let cells = build_cells("Q", &hints);
        assert_eq!(cells[0].kind, CellKind::Hint);
        assert_eq!(cells[0].input, Some('E'));
    }

    #[test]
    fn test_display_chars() {
        let hints = HashMap::from([('A', 'X')]);
        let cells = build_cells("AB!", &hints);

        assert_eq!(cells[0].display_input(), 'X');
        assert_eq!(cells[1].display_input(), PLACEHOLDER);
        assert_eq!(cells[2].display_input(), '!');
        assert_eq!(cells[1].display_cipher(), 'B');
        assert_eq!(cells[2].display_cipher(), ' ');
    }
}
