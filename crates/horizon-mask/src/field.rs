//! The host's editable text field.

use horizon_mask_core::Selection;

/// A live editable text field owned by the host.
///
/// A [`MaskedInput`](crate::MaskedInput) never keeps a reference to the field;
/// the host passes it into every call that reads or updates it.
pub trait TextField {
    /// Current text of the field.
    fn value(&self) -> String;

    /// Replace the text of the field.
    fn set_value(&mut self, value: &str);

    /// Current caret or highlighted range.
    fn selection(&self) -> Selection;

    /// Move the caret or highlighted range.
    fn set_selection(&mut self, selection: Selection);
}

/// An in-memory [`TextField`].
///
/// Besides the trait methods it offers helpers that edit the text the way a
/// native field would before reporting a change, which makes it convenient
/// for driving a masked input without a real UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryField {
    value: String,
    selection: Selection,
}

impl MemoryField {
    /// Create an empty field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a field holding `value` with the caret at its end.
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let end = value.chars().count();
        Self {
            value,
            selection: Selection::caret(end),
        }
    }

    /// Length of the text in characters.
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    /// Returns true if the field holds no text.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Highlight `start..end`.
    pub fn select(&mut self, start: usize, end: usize) {
        self.set_selection(Selection::new(start, end));
    }

    /// Move the caret to `pos`.
    pub fn set_caret(&mut self, pos: usize) {
        self.set_selection(Selection::caret(pos));
    }

    /// Replace the selection with `text`, leaving the caret after it.
    pub fn type_text(&mut self, text: &str) {
        let Selection { start, end } = self.selection;
        let inserted = text.chars().count();
        self.replace(start, end, text);
        self.selection = Selection::caret(start + inserted);
    }

    /// Delete the selection, or the character before the caret.
    pub fn backspace(&mut self) {
        let Selection { start, end } = self.selection;
        if start != end {
            self.replace(start, end, "");
        } else if start > 0 {
            self.replace(start - 1, start, "");
            self.selection = Selection::caret(start - 1);
            return;
        }
        self.selection = Selection::caret(start);
    }

    /// Delete the selection, or the character after the caret.
    pub fn delete_forward(&mut self) {
        let Selection { start, end } = self.selection;
        if start != end {
            self.replace(start, end, "");
        } else if start < self.len() {
            self.replace(start, start + 1, "");
        }
        self.selection = Selection::caret(start);
    }

    fn replace(&mut self, start: usize, end: usize, text: &str) {
        let mut chars: Vec<char> = self.value.chars().collect();
        let end = end.min(chars.len());
        let start = start.min(end);
        chars.splice(start..end, text.chars());
        self.value = chars.into_iter().collect();
    }

    fn clamp(&self, selection: Selection) -> Selection {
        let len = self.len();
        Selection::new(selection.start.min(len), selection.end.min(len))
    }
}

impl TextField for MemoryField {
    fn value(&self) -> String {
        self.value.clone()
    }

    /// Keeps the current selection, clamped to the new length.
    fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.selection = self.clamp(self.selection);
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn set_selection(&mut self, selection: Selection) {
        self.selection = self.clamp(selection);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_text_replaces_selection() {
        let mut field = MemoryField::with_value("12-34");
        field.select(0, 2);
        field.type_text("9");
        assert_eq!(field.value(), "9-34");
        assert_eq!(field.selection(), Selection::caret(1));
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut field = MemoryField::with_value("abc");
        field.backspace();
        assert_eq!(field.value(), "ab");
        assert_eq!(field.selection(), Selection::caret(2));

        field.set_caret(0);
        field.delete_forward();
        assert_eq!(field.value(), "b");
        assert_eq!(field.selection(), Selection::caret(0));

        field.backspace();
        assert_eq!(field.value(), "b");
    }

    #[test]
    fn test_selection_clamped() {
        let mut field = MemoryField::with_value("abc");
        field.set_caret(10);
        assert_eq!(field.selection(), Selection::caret(3));
        field.set_value("a");
        assert_eq!(field.selection(), Selection::caret(1));
    }
}
