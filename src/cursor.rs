//! Sequential browsing over the current match result.
use serde::{Deserialize, Serialize};

/// Step direction for the cursor.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Previous,
    Next,
}

/// Selected position in a result of `len` entries. `None` means nothing is
/// selected yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationCursor {
    index: Option<usize>,
    len: usize,
}

impl NavigationCursor {
    pub fn new(len: usize) -> Self {
        Self { index: None, len }
    }

    /// Forget the selection and adopt a freshly computed result length.
    pub fn reset(&mut self, len: usize) {
        self.index = None;
        self.len = len;
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Move one entry, clamped to the ends. With nothing selected either
    /// direction lands on the first entry. Returns whether the index changed.
    pub fn step(&mut self, direction: Direction) -> bool {
        if self.len == 0 {
            return false;
        }
        let last = self.len - 1;
        let next = match (self.index, direction) {
            (None, _) => 0,
            (Some(current), Direction::Previous) => current.saturating_sub(1),
            (Some(current), Direction::Next) => (current + 1).min(last),
        };
        let changed = self.index != Some(next);
        self.index = Some(next);
        changed
    }

    /// Jump straight to `index` if it is in bounds.
    pub fn select_index(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.index = Some(index);
        true
    }
}
