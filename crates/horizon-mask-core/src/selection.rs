//! Caret and highlighted ranges over a value.

/// A `(start, end)` range over a value's character positions.
///
/// A collapsed selection (`start == end`) is a plain caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Selection {
    /// First selected position.
    pub start: usize,
    /// One past the last selected position.
    pub end: usize,
}

impl Selection {
    /// Create a selection, normalizing a reversed range.
    pub fn new(start: usize, end: usize) -> Self {
        if end < start {
            Self { start: end, end: start }
        } else {
            Self { start, end }
        }
    }

    /// A collapsed selection at `pos`.
    pub fn caret(pos: usize) -> Self {
        Self { start: pos, end: pos }
    }

    /// Number of selected positions.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if nothing is highlighted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
