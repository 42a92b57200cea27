//! Keyboard and mouse handling per screen.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::{App, Command, Screen, StatsOrigin};
use crate::grid;

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char(k) if k.eq_ignore_ascii_case(&c))
}

impl App {
    pub(super) fn handle_key(&mut self, key: KeyEvent) -> Vec<Command> {
        if key.kind == KeyEventKind::Release {
            return Vec::new();
        }
        if is_ctrl(&key, 'c') {
            self.quit();
            return Vec::new();
        }

        match self.screen {
            Screen::Playing => self.handle_playing_key(key),
            Screen::Solved => match key.code {
                KeyCode::Char('s') | KeyCode::Char('S') => self.open_stats(),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    self.quit();
                    Vec::new()
                }
                _ => Vec::new(),
            },
            Screen::Stats => match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') => {
                    match self.stats_origin {
                        StatsOrigin::Solved => self.screen = Screen::Solved,
                        StatsOrigin::Standalone => self.quit(),
                    }
                    Vec::new()
                }
                _ => Vec::new(),
            },
            Screen::Error => match key.code {
                KeyCode::Char('r') | KeyCode::Char('R') => self.retry(),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    self.quit();
                    Vec::new()
                }
                _ => Vec::new(),
            },
            Screen::Onboarding => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.answer_onboarding(true),
                KeyCode::Char('n') | KeyCode::Char('N') => self.answer_onboarding(false),
                KeyCode::Esc => {
                    self.quit();
                    Vec::new()
                }
                _ => Vec::new(),
            },
            Screen::ClaimCodeDisplay => self.start_launch(),
            Screen::Loading | Screen::Checking => {
                if key.code == KeyCode::Esc {
                    self.quit();
                }
                Vec::new()
            }
        }
    }

    fn handle_playing_key(&mut self, key: KeyEvent) -> Vec<Command> {
        if key.code == KeyCode::Esc {
            self.quit();
            return Vec::new();
        }
        if is_ctrl(&key, 'r') {
            return self.clear_all();
        }

        let Some(cursor) = self.cursor else {
            // A grid without letter cells can still be submitted.
            return match key.code {
                KeyCode::Enter => self.submit(),
                _ => Vec::new(),
            };
        };

        match key.code {
            KeyCode::Char(c)
                if c.is_ascii_alphabetic()
                    && !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.type_letter(cursor, c)
            }
            KeyCode::Backspace | KeyCode::Delete => self.erase(cursor),
            KeyCode::Left => {
                self.move_cursor(grid::prev_letter_cell(&self.cells, cursor));
                Vec::new()
            }
            KeyCode::Right => {
                self.move_cursor(grid::next_letter_cell(&self.cells, cursor));
                Vec::new()
            }
            KeyCode::Home => {
                self.move_cursor(grid::first_letter_cell(&self.cells));
                Vec::new()
            }
            KeyCode::End => {
                self.move_cursor(grid::last_letter_cell(&self.cells));
                Vec::new()
            }
            KeyCode::Tab => {
                let target = grid::next_unfilled_letter_cell(&self.cells, cursor)
                    .or_else(|| grid::first_unfilled_letter_cell(&self.cells));
                self.move_cursor(target);
                Vec::new()
            }
            KeyCode::Enter => self.submit(),
            _ => Vec::new(),
        }
    }

    /// Move to `target` if it exists; stay put at a boundary.
    fn move_cursor(&mut self, target: Option<usize>) {
        if target.is_some() {
            self.cursor = target;
        }
    }

    fn type_letter(&mut self, cursor: usize, letter: char) -> Vec<Command> {
        if !self.edits_allowed() || !grid::set_input(&mut self.cells, cursor, letter) {
            return Vec::new();
        }
        self.status = None;
        self.move_cursor(grid::next_unfilled_letter_cell(&self.cells, cursor));
        self.save_command().into_iter().collect()
    }

    fn erase(&mut self, cursor: usize) -> Vec<Command> {
        if !self.edits_allowed() || !grid::clear_input(&mut self.cells, cursor) {
            return Vec::new();
        }
        self.status = None;
        self.move_cursor(grid::prev_letter_cell(&self.cells, cursor));
        self.save_command().into_iter().collect()
    }

    fn clear_all(&mut self) -> Vec<Command> {
        if !self.edits_allowed() {
            return Vec::new();
        }
        grid::clear_all_input(&mut self.cells);
        self.status = Some("Cleared all letters.".to_string());
        self.cursor = grid::first_letter_cell(&self.cells);
        self.save_command().into_iter().collect()
    }

    fn submit(&mut self) -> Vec<Command> {
        if !self.edits_allowed() {
            return Vec::new();
        }
        if !grid::is_complete(&self.cells) {
            self.status = Some("Fill in every letter before submitting.".to_string());
            return Vec::new();
        }
        let Some(game_id) = self.game_id().map(str::to_string) else {
            return Vec::new();
        };
        self.status = None;
        self.screen = Screen::Checking;
        vec![Command::CheckSolution {
            game_id,
            solution: grid::assemble_solution(&self.cells),
        }]
    }

    pub(super) fn handle_mouse(&mut self, mouse: MouseEvent) -> Vec<Command> {
        if self.screen != Screen::Playing
            || mouse.kind != MouseEventKind::Down(MouseButton::Left)
        {
            return Vec::new();
        }
        if let Some(index) = self.hit_areas.hit_test(mouse.column, mouse.row) {
            if self.cells.get(index).is_some_and(|c| c.kind == grid::CellKind::Letter) {
                self.cursor = Some(index);
                self.mark_dirty();
            }
        }
        Vec::new()
    }
}
