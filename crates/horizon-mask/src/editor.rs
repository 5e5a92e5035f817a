//! Masked editing state driven by host field notifications.
//!
//! [`MaskedInput`] holds everything a masked field needs between events and
//! updates it only through the pure engine in `horizon_mask_core`. The host
//! forwards its field's notifications:
//!
//! | Host notification | Method |
//! |-------------------|--------|
//! | mounted / re-rendered | [`mount`](MaskedInput::mount), [`sync`](MaskedInput::sync) |
//! | options changed   | [`reconfigure`](MaskedInput::reconfigure) |
//! | key down          | [`key_down`](MaskedInput::key_down) |
//! | value changed     | [`change`](MaskedInput::change) |
//! | paste             | [`paste`](MaskedInput::paste) |
//! | focus / blur      | [`focus`](MaskedInput::focus), [`blur`](MaskedInput::blur) |
//! | next tick         | [`run_deferred`](MaskedInput::run_deferred) |
//!
//! Backspace and Delete are resolved from the selection captured at key-down,
//! because the field has already applied its own deletion by the time the
//! change arrives.

use std::fmt;

use horizon_mask_core::engine::{self, InvalidChar};
use horizon_mask_core::logging::targets;
use horizon_mask_core::{MaskSpec, Selection, Signal};

use crate::deferred::{Deferred, DeferredQueue};
use crate::field::TextField;
use crate::key::{EditKey, KeyPress};
use crate::options::MaskOptions;
use crate::quirks::PlatformQuirks;

/// Stringify an optional host value.
///
/// Only a true absence becomes empty; anything present, including `0`,
/// becomes its literal text.
pub fn string_value<T: fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// A Backspace or Delete seen at key-down, waiting for the matching change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingRemoval {
    from_right: bool,
    selection: Selection,
}

/// Field state captured when a paste is buffered.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PasteSnapshot {
    value: String,
    selection: Selection,
}

/// Editing state of one masked field.
///
/// # Signals
///
/// - `invalid_char`: a typed or pasted character was rejected by its slot
/// - `value_changed`: the value was changed by the user or by focus/blur handling
pub struct MaskedInput {
    options: MaskOptions,
    spec: MaskSpec,
    quirks: PlatformQuirks,
    value: String,
    controlled: bool,
    focused: bool,
    pending_removal: Option<PendingRemoval>,
    last_cursor: Option<usize>,
    paste: Option<PasteSnapshot>,
    deferred: DeferredQueue,

    /// Emitted once per character rejected during an edit.
    pub invalid_char: Signal<InvalidChar>,
    /// Emitted with the new value after an edit changes the field.
    pub value_changed: Signal<String>,
}

impl MaskedInput {
    /// Create the editing state.
    ///
    /// The input is controlled when `value` is present; its initial text is
    /// `value`, else `default_value`, else empty. It is formatted right away
    /// when masking is enabled and it is non-empty or the skeleton is always shown.
    pub fn new(
        options: MaskOptions,
        quirks: PlatformQuirks,
        value: Option<String>,
        default_value: Option<String>,
    ) -> Self {
        let spec = options.compile();
        let controlled = value.is_some();
        let mut initial = value.or(default_value).unwrap_or_default();

        let mut input = Self {
            options,
            spec,
            quirks,
            value: String::new(),
            controlled,
            focused: false,
            pending_removal: None,
            last_cursor: None,
            paste: None,
            deferred: DeferredQueue::new(),
            invalid_char: Signal::new(),
            value_changed: Signal::new(),
        };

        if input.is_masking() && (input.options.always_show_mask || !initial.is_empty()) {
            initial = engine::format_value(&input.spec, &initial);
        }
        input.value = initial;
        input
    }

    /// Current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Compiled mask in effect.
    pub fn spec(&self) -> &MaskSpec {
        &self.spec
    }

    /// Options in effect.
    pub fn options(&self) -> &MaskOptions {
        &self.options
    }

    /// Platform flags in effect.
    pub fn quirks(&self) -> PlatformQuirks {
        self.quirks
    }

    /// Returns true if the value is supplied by the host on every reconfigure.
    pub fn is_controlled(&self) -> bool {
        self.controlled
    }

    /// Returns true between focus and blur.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Last caret position placed by the input.
    pub fn last_cursor(&self) -> Option<usize> {
        self.last_cursor
    }

    /// Returns true if a pattern with at least one editable slot is in effect.
    pub fn is_masking(&self) -> bool {
        self.spec.is_active() && self.spec.has_editable()
    }

    /// Returns true if caret reassertions are waiting for the next tick.
    pub fn has_deferred(&self) -> bool {
        self.deferred.has_pending()
    }

    /// Push the value onto a newly attached field.
    pub fn mount<F: TextField + ?Sized>(&mut self, field: &mut F) {
        self.sync(field);
    }

    /// Make the field show the current value if masking and they differ.
    pub fn sync<F: TextField + ?Sized>(&mut self, field: &mut F) {
        if self.is_masking() && field.value() != self.value {
            field.set_value(&self.value);
        }
    }

    /// Apply new options, and for a controlled input a new value.
    ///
    /// When the pattern text changes the caret is moved to the filled
    /// boundary, or to the nearest editable slot after it.
    pub fn reconfigure<F: TextField + ?Sized>(
        &mut self,
        options: MaskOptions,
        value: Option<String>,
        field: &mut F,
    ) {
        let was_masking = self.is_masking();
        let old_literal = self.spec.literal_str();

        self.controlled = value.is_some();
        self.spec = options.compile();
        self.options = options;

        if !self.is_masking() {
            tracing::debug!(target: targets::EDITOR, "masking disabled");
            self.pending_removal = None;
            self.last_cursor = None;
            return;
        }

        let mask_changed = self.spec.literal_str() != old_literal;
        let show_empty = self.options.always_show_mask || self.focused;
        let value_blank = value.as_deref().is_none_or(str::is_empty);

        let mut new_value = match value {
            Some(value) => value,
            None if !was_masking => field.value(),
            None => self.value.clone(),
        };

        let mut cursor = None;
        if mask_changed || !new_value.is_empty() || show_empty {
            new_value = engine::format_value(&self.spec, &new_value);

            if mask_changed {
                tracing::debug!(target: targets::EDITOR, mask = %self.spec, "mask changed");
                let filled = engine::filled_length(&self.spec, &new_value);
                if self.last_cursor.is_none_or(|pos| filled < pos) {
                    cursor = Some(if engine::is_filled(&self.spec, &new_value) {
                        filled
                    } else {
                        engine::right_editable_pos(&self.spec, filled).unwrap_or(filled)
                    });
                }
            }
        }

        if engine::is_empty(&self.spec, &new_value) && !show_empty && value_blank {
            new_value.clear();
        }

        self.value = new_value;
        self.sync(field);
        if let Some(pos) = cursor {
            self.set_cursor_pos(field, pos);
        }
    }

    /// Record a Backspace or Delete before the field applies it.
    pub fn key_down<F: TextField + ?Sized>(&mut self, key: KeyPress, field: &F) {
        self.pending_removal = None;

        if key.modifiers.has_shortcut_modifier() || key.default_prevented {
            return;
        }

        let from_right = match key.key {
            EditKey::Backspace => false,
            EditKey::Delete => true,
            EditKey::Other => return,
        };

        let selection = field.selection();
        let can_remove = if from_right {
            char_len(&self.value) > selection.start
        } else {
            selection.end > 0
        };

        if can_remove {
            self.pending_removal = Some(PendingRemoval {
                from_right,
                selection,
            });
        }
    }

    /// Handle a change of the field's text.
    pub fn change<F: TextField + ?Sized>(&mut self, field: &mut F) {
        if !self.is_masking() {
            self.value = field.value();
            self.value_changed.emit(self.value.clone());
            return;
        }

        let mut value = field.value();

        if let Some(paste) = self.paste.take() {
            self.paste_text(paste.value, &value, paste.selection, field);
            return;
        }

        let old_value = self.value.clone();
        let mut selection = field.selection();
        let mut cursor = selection.end;

        let mask_len = self.spec.len();
        let prefix_len = self.spec.prefix_len();
        let last_editable = self.spec.last_editable_pos().unwrap_or(0);
        let value_len = char_len(&value);
        let old_len = char_len(&old_value);

        if let Some(removal) = self.pending_removal.take() {
            value = old_value;
            selection = removal.selection;
            cursor = selection.start;

            if !selection.is_empty() {
                value = engine::clear_range(&self.spec, &value, selection.start, selection.len());
            } else if selection.start < prefix_len
                || (!removal.from_right && selection.start == prefix_len)
            {
                cursor = prefix_len;
            } else {
                let editable = if removal.from_right {
                    engine::right_editable_pos(&self.spec, cursor)
                } else {
                    engine::left_editable_pos(&self.spec, cursor - 1)
                };
                if let Some(pos) = editable {
                    value = engine::clear_range(&self.spec, &value, pos, 1);
                    cursor = pos;
                }
            }
            tracing::trace!(
                target: targets::EDITOR,
                from_right = removal.from_right,
                cursor,
                "removal"
            );
        } else if value_len > old_len {
            let entered_len = value_len - old_len;
            let start = selection.end.saturating_sub(entered_len);
            let entered = char_slice(&value, start, entered_len);

            let lone_literal =
                entered_len == 1 && self.spec.literal_at(start) == entered.chars().next();
            cursor = if start < last_editable && !lone_literal {
                engine::right_editable_pos(&self.spec, start).unwrap_or(start)
            } else {
                start
            };

            let remaining =
                char_slice(&value, 0, start) + &char_slice(&value, start + entered_len, usize::MAX);
            let cleared =
                engine::clear_range(&self.spec, &remaining, start, mask_len.saturating_sub(start));
            let cleared = engine::insert_string(&self.spec, &cleared, &entered, cursor, None);

            value = self.insert_reporting(&old_value, &entered, cursor);

            if entered_len != 1 || (cursor >= prefix_len && cursor < last_editable) {
                cursor = cursor.max(engine::filled_length(&self.spec, &cleared));
                if cursor < last_editable {
                    cursor = engine::right_editable_pos(&self.spec, cursor).unwrap_or(cursor);
                }
            } else if cursor < last_editable {
                cursor += 1;
            }
            tracing::trace!(target: targets::EDITOR, entered = %entered, cursor, "insertion");
        } else if value_len < old_len {
            let removed_len = mask_len.saturating_sub(value_len);
            let entered = char_slice(&value, 0, selection.end);
            let clear_only = entered == char_slice(&old_value, 0, selection.end);

            let mut cleared =
                engine::clear_range(&self.spec, &old_value, selection.end, removed_len);
            if self.spec.placeholder().is_some() {
                value = self.insert_reporting(&cleared, &entered, 0);
            }
            cleared = engine::clear_range(
                &self.spec,
                &cleared,
                selection.end,
                mask_len.saturating_sub(selection.end),
            );
            cleared = engine::insert_string(&self.spec, &cleared, &entered, 0, None);

            if !clear_only {
                cursor = cursor.max(engine::filled_length(&self.spec, &cleared));
                if cursor < last_editable {
                    cursor = engine::right_editable_pos(&self.spec, cursor).unwrap_or(cursor);
                }
            } else if cursor < prefix_len {
                cursor = prefix_len;
            }
            tracing::trace!(target: targets::EDITOR, clear_only, cursor, "shrink");
        }

        let value = engine::format_value(&self.spec, &value);
        self.set_field_value(field, &value);
        self.value_changed.emit(value);

        if self.quirks.defer_cursor_restore {
            self.deferred
                .post(Deferred::RestoreSelection(Selection::caret(cursor)));
        } else {
            self.set_cursor_pos(field, cursor);
        }
    }

    /// Handle a paste notification, before the field inserts the text.
    ///
    /// With [`PlatformQuirks::buffer_paste`] the current state is captured and
    /// the field blanked, so the following [`change`](Self::change) sees only
    /// the pasted text and applies it to the captured state.
    pub fn paste<F: TextField + ?Sized>(&mut self, field: &mut F, default_prevented: bool) {
        if !self.is_masking() || !self.quirks.buffer_paste || default_prevented {
            return;
        }
        let snapshot = PasteSnapshot {
            value: field.value(),
            selection: field.selection(),
        };
        tracing::debug!(target: targets::EDITOR, selection = ?snapshot.selection, "buffering paste");
        self.paste = Some(snapshot);
        self.set_field_value(field, "");
    }

    /// Handle the field gaining focus.
    ///
    /// An empty field is seeded with the empty skeleton; the caret moves to
    /// the first unfilled slot.
    pub fn focus<F: TextField + ?Sized>(&mut self, field: &mut F) {
        self.focused = true;

        if !self.is_masking() {
            return;
        }

        if self.value.is_empty() {
            let seeded = engine::format_value(&self.spec, self.spec.prefix());
            let seeded = engine::format_value(&self.spec, &seeded);
            let changed = seeded != field.value();
            if changed {
                field.set_value(&seeded);
            }
            self.value = seeded;
            if changed {
                self.value_changed.emit(self.value.clone());
            }
            self.set_cursor_to_end(field);
        } else if engine::filled_length(&self.spec, &self.value) < self.spec.len() {
            self.set_cursor_to_end(field);
        }
    }

    /// Handle the field losing focus.
    ///
    /// A value without any entered character is cleared unless the skeleton
    /// is always shown.
    pub fn blur<F: TextField + ?Sized>(&mut self, field: &mut F) {
        self.focused = false;

        if self.is_masking()
            && !self.options.always_show_mask
            && engine::is_empty(&self.spec, &self.value)
        {
            let changed = !field.value().is_empty();
            self.value.clear();
            if changed {
                tracing::debug!(target: targets::EDITOR, "clearing empty value on blur");
                field.set_value("");
                self.value_changed.emit(String::new());
            }
        }
    }

    /// Run the work queued for the next tick.
    ///
    /// Pass `None` when the field no longer exists; the queue is then just
    /// drained. Returns the number of tasks processed.
    pub fn run_deferred<F: TextField + ?Sized>(&mut self, mut field: Option<&mut F>) -> usize {
        let tasks = self.deferred.take_all();
        let count = tasks.len();
        for task in tasks {
            match task {
                Deferred::RestoreSelection(selection) => {
                    if let Some(field) = field.as_deref_mut()
                        && field.selection() != selection
                    {
                        field.set_selection(selection);
                    }
                }
            }
        }
        count
    }

    fn paste_text<F: TextField + ?Sized>(
        &mut self,
        value: String,
        text: &str,
        selection: Selection,
        field: &mut F,
    ) {
        let mut cursor = selection.start;
        let mut value = value;
        if !selection.is_empty() {
            value = engine::clear_range(&self.spec, &value, cursor, selection.len());
        }
        let text_len = engine::insert_string_length(&self.spec, &value, text, cursor);
        let value = self.insert_reporting(&value, text, cursor);
        cursor += text_len;
        cursor = engine::right_editable_pos(&self.spec, cursor).unwrap_or(cursor);
        tracing::trace!(target: targets::EDITOR, text_len, cursor, "applied buffered paste");

        if value != field.value() {
            self.set_field_value(field, &value);
            self.value_changed.emit(value);
        } else {
            self.value = value;
        }

        self.set_cursor_pos(field, cursor);
    }

    fn insert_reporting(&self, value: &str, insert: &str, pos: usize) -> String {
        let signal = &self.invalid_char;
        let mut report = |invalid: InvalidChar| signal.emit(invalid);
        engine::insert_string(&self.spec, value, insert, pos, Some(&mut report))
    }

    fn set_field_value<F: TextField + ?Sized>(&mut self, field: &mut F, value: &str) {
        self.value = value.to_string();
        field.set_value(value);
    }

    fn set_cursor_to_end<F: TextField + ?Sized>(&mut self, field: &mut F) {
        let filled = engine::filled_length(&self.spec, &self.value);
        if let Some(pos) = engine::right_editable_pos(&self.spec, filled) {
            self.set_cursor_pos(field, pos);
        }
    }

    fn set_cursor_pos<F: TextField + ?Sized>(&mut self, field: &mut F, pos: usize) {
        let selection = Selection::caret(pos);
        field.set_selection(selection);
        if self.quirks.reassert_cursor {
            self.deferred.post(Deferred::RestoreSelection(selection));
        }
        self.last_cursor = Some(pos);
    }
}

impl fmt::Debug for MaskedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaskedInput")
            .field("mask", &self.spec.literal_str())
            .field("value", &self.value)
            .field("focused", &self.focused)
            .field("last_cursor", &self.last_cursor)
            .finish_non_exhaustive()
    }
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn char_slice(value: &str, start: usize, len: usize) -> String {
    value.chars().skip(start).take(len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::MemoryField;

    fn card_input() -> MaskedInput {
        MaskedInput::new(
            MaskOptions::new().mask("9999-9999-9999"),
            PlatformQuirks::none(),
            None,
            None,
        )
    }

    #[test]
    fn test_string_value() {
        assert_eq!(string_value(None::<i32>), "");
        assert_eq!(string_value(Some(0)), "0");
        assert_eq!(string_value(Some("")), "");
        assert_eq!(string_value(Some(12.5)), "12.5");
    }

    #[test]
    fn test_new_formats_non_empty() {
        let input = MaskedInput::new(
            MaskOptions::new().mask("99-99"),
            PlatformQuirks::none(),
            Some("1234".to_string()),
            None,
        );
        assert_eq!(input.value(), "12-34");
        assert!(input.is_controlled());
    }

    #[test]
    fn test_new_keeps_empty_hidden() {
        let input = card_input();
        assert_eq!(input.value(), "");
        assert!(!input.is_controlled());
    }

    #[test]
    fn test_new_always_show_mask() {
        let input = MaskedInput::new(
            MaskOptions::new().mask("99-99").always_show_mask(true),
            PlatformQuirks::none(),
            None,
            Some(String::new()),
        );
        assert_eq!(input.value(), "__-__");
    }

    #[test]
    fn test_new_without_mask_keeps_text() {
        let input = MaskedInput::new(
            MaskOptions::new(),
            PlatformQuirks::none(),
            None,
            Some("free text".to_string()),
        );
        assert!(!input.is_masking());
        assert_eq!(input.value(), "free text");
    }

    #[test]
    fn test_pattern_without_slots_disables_masking() {
        let input = MaskedInput::new(
            MaskOptions::new().mask("---"),
            PlatformQuirks::none(),
            None,
            None,
        );
        assert!(input.spec().is_active());
        assert!(!input.is_masking());
    }

    #[test]
    fn test_key_down_ignores_shortcuts() {
        let mut input = card_input();
        let mut field = MemoryField::new();
        input.focus(&mut field);
        field.set_caret(3);

        input.key_down(
            KeyPress::backspace().with_modifiers(crate::key::KeyboardModifiers::CONTROL),
            &field,
        );
        assert!(input.pending_removal.is_none());

        input.key_down(KeyPress::backspace().prevented(), &field);
        assert!(input.pending_removal.is_none());

        input.key_down(KeyPress::backspace(), &field);
        assert_eq!(
            input.pending_removal,
            Some(PendingRemoval {
                from_right: false,
                selection: Selection::caret(3),
            })
        );

        input.key_down(KeyPress::new(EditKey::Other), &field);
        assert!(input.pending_removal.is_none());
    }

    #[test]
    fn test_key_down_nothing_to_remove() {
        let mut input = card_input();
        let mut field = MemoryField::new();
        input.focus(&mut field);

        field.set_caret(0);
        input.key_down(KeyPress::backspace(), &field);
        assert!(input.pending_removal.is_none());

        field.set_caret(14);
        input.key_down(KeyPress::delete(), &field);
        assert!(input.pending_removal.is_none());
    }

    #[test]
    fn test_reconfigure_without_slots_drops_pending_removal() {
        let mut input = card_input();
        let mut field = MemoryField::new();
        input.focus(&mut field);
        field.set_caret(3);
        input.key_down(KeyPress::backspace(), &field);
        assert!(input.pending_removal.is_some());

        input.reconfigure(MaskOptions::new().mask("---"), None, &mut field);
        assert!(input.pending_removal.is_none());
        assert_eq!(input.last_cursor(), None);
    }

    #[test]
    fn test_reassert_queues_deferred() {
        let mut input = MaskedInput::new(
            MaskOptions::new().mask("99-99"),
            PlatformQuirks::default(),
            None,
            None,
        );
        let mut field = MemoryField::new();
        input.focus(&mut field);
        assert!(input.has_deferred());

        field.set_caret(4);
        assert_eq!(input.run_deferred(Some(&mut field)), 1);
        assert_eq!(field.selection(), Selection::caret(0));
        assert!(!input.has_deferred());
    }

    #[test]
    fn test_run_deferred_without_field() {
        let mut input = MaskedInput::new(
            MaskOptions::new().mask("99-99"),
            PlatformQuirks::default(),
            None,
            None,
        );
        let mut field = MemoryField::new();
        input.focus(&mut field);
        assert_eq!(input.run_deferred(None::<&mut MemoryField>), 1);
        assert!(!input.has_deferred());
    }
}
