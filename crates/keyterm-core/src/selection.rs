//! Rectangular copy selection over the terminal buffer.
//!
//! Selection happens in two phases.  While [`SelectionArea::is_selecting_origin`]
//! is `true`, directional moves drag the origin corner (and the end corner
//! with it).  After [`SelectionArea::finish_selecting_origin`] only the end
//! corner moves.  Coordinates are clamped to the buffer size set with
//! [`SelectionArea::set_bounds`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionArea {
    top: usize,
    bottom: usize,
    left: usize,
    right: usize,
    max_columns: usize,
    max_rows: usize,
    selecting_origin: bool,
}

impl Default for SelectionArea {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionArea {
    pub fn new() -> Self {
        Self {
            top: 0,
            bottom: 0,
            left: 0,
            right: 0,
            max_columns: 0,
            max_rows: 0,
            selecting_origin: true,
        }
    }

    /// Collapses the selection to the top-left corner and restarts origin
    /// selection.  The bounds are kept.
    pub fn reset(&mut self) {
        self.top = 0;
        self.bottom = 0;
        self.left = 0;
        self.right = 0;
        self.selecting_origin = true;
    }

    /// Sets the buffer size the selection is clamped to.
    pub fn set_bounds(&mut self, columns: usize, rows: usize) {
        self.max_columns = columns.saturating_sub(1);
        self.max_rows = rows.saturating_sub(1);
        self.top = self.top.min(self.max_rows);
        self.bottom = self.bottom.min(self.max_rows);
        self.left = self.left.min(self.max_columns);
        self.right = self.right.min(self.max_columns);
    }

    pub fn is_selecting_origin(&self) -> bool {
        self.selecting_origin
    }

    pub fn finish_selecting_origin(&mut self) {
        self.selecting_origin = false;
    }

    pub fn increment_row(&mut self) {
        self.move_row(|row| row.saturating_add(1));
    }

    pub fn decrement_row(&mut self) {
        self.move_row(|row| row.saturating_sub(1));
    }

    pub fn increment_column(&mut self) {
        self.move_column(|col| col.saturating_add(1));
    }

    pub fn decrement_column(&mut self) {
        self.move_column(|col| col.saturating_sub(1));
    }

    fn move_row(&mut self, step: impl Fn(usize) -> usize) {
        if self.selecting_origin {
            self.top = step(self.top).min(self.max_rows);
            self.bottom = self.top;
        } else {
            self.bottom = step(self.bottom).min(self.max_rows);
        }
    }

    fn move_column(&mut self, step: impl Fn(usize) -> usize) {
        if self.selecting_origin {
            self.left = step(self.left).min(self.max_columns);
            self.right = self.left;
        } else {
            self.right = step(self.right).min(self.max_columns);
        }
    }

    /// Upper row of the normalized rectangle.
    pub fn top(&self) -> usize {
        self.top.min(self.bottom)
    }

    /// Lower row of the normalized rectangle (inclusive).
    pub fn bottom(&self) -> usize {
        self.top.max(self.bottom)
    }

    /// Left column of the normalized rectangle.
    pub fn left(&self) -> usize {
        self.left.min(self.right)
    }

    /// Right column of the normalized rectangle (inclusive).
    pub fn right(&self) -> usize {
        self.left.max(self.right)
    }

    /// The corner currently being moved, as `(row, column)`.
    pub fn cursor(&self) -> (usize, usize) {
        if self.selecting_origin {
            (self.top, self.left)
        } else {
            (self.bottom, self.right)
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
