//! Clickable grid cells.
//!
//! The grid renderer registers one area per letter cell on every frame and
//! the mouse handler asks the registry which cell, if any, was clicked.

use ratatui::layout::Rect;

/// A clickable region covering one letter cell's input and cipher rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitArea {
    pub rect: Rect,
    /// Index into the puzzle's cell vector
    pub cell: usize,
}

impl HitArea {
    pub fn new(rect: Rect, cell: usize) -> Self {
        Self { rect, cell }
    }

    /// Check if a point is within this hit area.
    #[inline]
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.rect.x
            && x < self.rect.x.saturating_add(self.rect.width)
            && y >= self.rect.y
            && y < self.rect.y.saturating_add(self.rect.height)
    }
}

/// Hit areas registered during the most recent render.
#[derive(Debug, Clone, Default)]
pub struct HitAreaRegistry {
    areas: Vec<HitArea>,
}

impl HitAreaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call at the start of each render cycle.
    pub fn clear(&mut self) {
        self.areas.clear();
    }

    pub fn register(&mut self, rect: Rect, cell: usize) {
        self.areas.push(HitArea::new(rect, cell));
    }

    /// Cell index under `(x, y)`. Later registrations win on overlap.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<usize> {
        self.areas
            .iter()
            .rev()
            .find(|area| area.contains(x, y))
            .map(|area| area.cell)
    }

    pub fn areas(&self) -> &[HitArea] {
        &self.areas
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}
