//! Engine transformations.
//!
//! [`insert_string`] and [`insert_string_length`] run the same scan, so the
//! reported advance always matches what an insertion actually consumes.

use super::query::{self, chars};
use super::{InvalidChar, InvalidCharHook};
use crate::logging::targets;
use crate::spec::MaskSpec;

/// Produce the canonical form of `value`.
///
/// With a placeholder the result always spans the whole pattern: `value` is
/// laid over the empty skeleton from position 0. Without one the result is
/// cut to its filled length and never shorter than the prefix.
pub fn format_value(spec: &MaskSpec, value: &str) -> String {
    if !spec.is_active() {
        return value.to_string();
    }
    format_chars(spec, &chars(value)).into_iter().collect()
}

/// The value of an untouched field: the full skeleton with a placeholder,
/// the prefix alone without.
pub fn empty_value(spec: &MaskSpec) -> String {
    format_value(spec, "")
}

/// Clear `len` positions starting at `start`.
///
/// With a placeholder, editable slots in the range revert to the placeholder
/// and permanent ones to their literal. Without one the range is removed and
/// the remainder reformatted; the prefix is never removed.
pub fn clear_range(spec: &MaskSpec, value: &str, start: usize, len: usize) -> String {
    if !spec.is_active() {
        return value.to_string();
    }

    let end = start.saturating_add(len);
    let mut value = chars(value);

    let Some(placeholder) = spec.placeholder() else {
        let start = start.max(spec.prefix_len());
        if start < end && start < value.len() {
            value.drain(start..end.min(value.len()));
        }
        return format_chars(spec, &value).into_iter().collect();
    };

    let literal = spec.literal();
    value
        .iter()
        .enumerate()
        .map(|(i, &ch)| {
            if i < start || i >= end {
                ch
            } else if spec.is_permanent(i) {
                literal[i]
            } else {
                placeholder
            }
        })
        .collect()
}

/// Insert `insert` into `value` at `pos`.
///
/// Characters are placed left to right. A character that does not match a
/// permanent position makes the write cursor skip over it; a character its
/// slot's rule rejects is dropped and reported to `on_invalid`. Insertion
/// stops when the write cursor reaches the end of the pattern, so excess
/// input is ignored.
///
/// Without a placeholder, a `pos` beyond the end of `value` first back-fills
/// the gap with the pattern's literal characters.
pub fn insert_string(
    spec: &MaskSpec,
    value: &str,
    insert: &str,
    pos: usize,
    on_invalid: InvalidCharHook<'_>,
) -> String {
    if !spec.is_active() {
        return value.to_string();
    }
    let (value, advance) = insert_chars(spec, chars(value), &chars(insert), pos, on_invalid);
    tracing::trace!(target: targets::ENGINE, pos, advance, "inserted string");
    value.into_iter().collect()
}

/// Number of pattern positions an [`insert_string`] call would advance the
/// write cursor by. Nothing is reported for rejected characters.
pub fn insert_string_length(spec: &MaskSpec, value: &str, insert: &str, pos: usize) -> usize {
    if !spec.is_active() {
        return 0;
    }
    insert_chars(spec, chars(value), &chars(insert), pos, None).1
}

pub(crate) fn format_chars(spec: &MaskSpec, value: &[char]) -> Vec<char> {
    match spec.placeholder() {
        None => {
            let (mut formatted, _) = insert_chars(spec, Vec::new(), value, 0, None);
            formatted.truncate(query::filled_len(spec, &formatted));
            if formatted.len() < spec.prefix_len() {
                formatted = spec.prefix().chars().collect();
            }
            formatted
        }
        Some(placeholder) => {
            let skeleton = skeleton(spec, placeholder);
            if value.is_empty() {
                skeleton
            } else {
                insert_chars(spec, skeleton, value, 0, None).0
            }
        }
    }
}

fn skeleton(spec: &MaskSpec, placeholder: char) -> Vec<char> {
    spec.literal()
        .iter()
        .enumerate()
        .map(|(i, &ch)| if spec.is_permanent(i) { ch } else { placeholder })
        .collect()
}

/// Shared scan behind insertion and its dry run. Returns the new value and
/// how far the write cursor moved.
fn insert_chars(
    spec: &MaskSpec,
    mut value: Vec<char>,
    insert: &[char],
    mut pos: usize,
    mut on_invalid: InvalidCharHook<'_>,
) -> (Vec<char>, usize) {
    let literal = spec.literal();
    let mask_len = literal.len();
    let placeholder = spec.placeholder();
    let start = pos;

    if pos >= mask_len {
        return (value, 0);
    }

    let input_filled = query::is_filled_chars(spec, &value);
    let prefix_len = spec.prefix_len();

    if placeholder.is_none() && pos > value.len() {
        value.extend_from_slice(&literal[value.len()..pos]);
    }

    'input: for &ch in insert {
        while spec.is_permanent(pos) && literal[pos] != ch {
            if value.len() <= pos {
                value.extend_from_slice(&literal[value.len()..=pos]);
            }
            // A placeholder can never land on fixed text.
            if placeholder == Some(ch) {
                continue 'input;
            }
            pos += 1;
            if pos >= mask_len {
                break 'input;
            }
        }

        let allowed = query::allowed_at(spec, pos, Some(ch)) || placeholder == Some(ch);
        if !allowed {
            tracing::trace!(target: targets::ENGINE, %ch, pos, "rejected character");
            if let Some(hook) = on_invalid.as_deref_mut() {
                hook(InvalidChar { ch, pos });
            }
            continue;
        }

        if pos < value.len() {
            if placeholder.is_some() || input_filled || pos < prefix_len {
                value[pos] = ch;
            } else {
                value.insert(pos, ch);
                value = format_chars(spec, &value);
            }
        } else if placeholder.is_none() {
            value.push(ch);
        }

        pos += 1;
        if pos >= mask_len {
            break;
        }
    }

    (value, pos - start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::CharRuleTable;
    use crate::spec::compile;

    fn no_placeholder(pattern: &str) -> MaskSpec {
        compile(Some(pattern), None, CharRuleTable::default())
    }

    #[test]
    fn test_format_empty_value() {
        let spec = MaskSpec::new("9999-9999-9999");
        assert_eq!(format_value(&spec, ""), "____-____-____");
        assert_eq!(empty_value(&spec), "____-____-____");
    }

    #[test]
    fn test_format_raw_digits() {
        let spec = MaskSpec::new("(999) 999-9999");
        assert_eq!(format_value(&spec, "5551234567"), "(555) 123-4567");
        assert_eq!(format_value(&spec, "555"), "(555) ___-____");
    }

    #[test]
    fn test_format_drops_invalid() {
        let spec = MaskSpec::new("99-99");
        assert_eq!(format_value(&spec, "1x2y3"), "12-3_");
    }

    #[test]
    fn test_format_inactive_passthrough() {
        let spec = MaskSpec::inactive();
        assert_eq!(format_value(&spec, "anything"), "anything");
        assert_eq!(insert_string(&spec, "abc", "x", 1, None), "abc");
        assert_eq!(clear_range(&spec, "abc", 0, 2), "abc");
        assert_eq!(insert_string_length(&spec, "abc", "x", 1), 0);
    }

    #[test]
    fn test_format_without_placeholder() {
        let spec = no_placeholder("99/99");
        assert_eq!(format_value(&spec, ""), "");
        assert_eq!(format_value(&spec, "12"), "12");
        assert_eq!(format_value(&spec, "123"), "12/3");
        assert_eq!(format_value(&spec, "12/34"), "12/34");
    }

    #[test]
    fn test_format_without_placeholder_keeps_prefix() {
        let spec = no_placeholder("+1 999");
        assert_eq!(format_value(&spec, ""), "+1 ");
        assert_eq!(format_value(&spec, "5"), "+1 5");
    }

    #[test]
    fn test_clear_range_with_placeholder() {
        let spec = MaskSpec::new("aa-99");
        assert_eq!(clear_range(&spec, "AB-12", 0, 2), "__-12");
        assert_eq!(clear_range(&spec, "AB-12", 1, 3), "A_-_2");
    }

    #[test]
    fn test_clear_range_zero_length() {
        let spec = MaskSpec::new("aa-99");
        assert_eq!(clear_range(&spec, "AB-12", 2, 0), "AB-12");
    }

    #[test]
    fn test_clear_range_without_placeholder() {
        let spec = no_placeholder("99/99");
        assert_eq!(clear_range(&spec, "12/34", 3, 1), "12/4");
        assert_eq!(clear_range(&spec, "12/34", 0, 5), "");
    }

    #[test]
    fn test_clear_range_without_placeholder_protects_prefix() {
        let spec = no_placeholder("+1 999");
        assert_eq!(clear_range(&spec, "+1 234", 0, 4), "+1 34");
    }

    #[test]
    fn test_insert_typing() {
        let spec = MaskSpec::new("9999-9999-9999");
        let value = insert_string(&spec, "____-____-____", "5", 0, None);
        assert_eq!(value, "5___-____-____");
    }

    #[test]
    fn test_insert_skips_permanent() {
        let spec = MaskSpec::new("99-99");
        assert_eq!(insert_string(&spec, "12-__", "3", 2, None), "12-3_");
        assert_eq!(insert_string_length(&spec, "12-__", "3", 2), 2);
    }

    #[test]
    fn test_insert_matching_literal_consumes_slot() {
        let spec = MaskSpec::new("99-99");
        assert_eq!(insert_string(&spec, "12-__", "-3", 2, None), "12-3_");
        assert_eq!(insert_string_length(&spec, "12-__", "-3", 2), 2);
    }

    #[test]
    fn test_insert_reports_invalid() {
        let spec = MaskSpec::new("99");
        let mut rejected = Vec::new();
        let mut hook = |c: InvalidChar| rejected.push(c);
        let value = insert_string(&spec, "__", "1a", 0, Some(&mut hook));
        assert_eq!(value, "1_");
        assert_eq!(rejected, vec![InvalidChar { ch: 'a', pos: 1 }]);
    }

    #[test]
    fn test_insert_placeholder_char_clears() {
        let spec = MaskSpec::new("999");
        assert_eq!(insert_string(&spec, "123", "_", 1, None), "1_3");
    }

    #[test]
    fn test_insert_placeholder_on_literal_skipped() {
        let spec = MaskSpec::new("9-9");
        // The placeholder cannot move past fixed text, so it is discarded.
        assert_eq!(insert_string(&spec, "1-_", "_2", 1, None), "1-2");
        assert_eq!(insert_string_length(&spec, "1-_", "_2", 1), 2);
    }

    #[test]
    fn test_insert_at_end_is_noop() {
        let spec = MaskSpec::new("99");
        let mut calls = 0;
        let mut hook = |_: InvalidChar| calls += 1;
        assert_eq!(insert_string(&spec, "12", "3", 2, Some(&mut hook)), "12");
        assert_eq!(calls, 0);
        assert_eq!(insert_string_length(&spec, "12", "3", 2), 0);
    }

    #[test]
    fn test_insert_without_placeholder_backfills() {
        let spec = no_placeholder("99/99");
        let value = insert_string(&spec, "", "12", 0, None);
        assert_eq!(value, "12");
        assert_eq!(insert_string(&spec, &value, "3", 2, None), "12/3");
        assert_eq!(insert_string(&spec, &value, "3", 3, None), "12/3");
    }

    #[test]
    fn test_insert_without_placeholder_shifts_tail() {
        let spec = no_placeholder("99/99");
        // Inserting into the middle pushes the following digits right.
        assert_eq!(insert_string(&spec, "12/3", "9", 0, None), "91/23");
    }

    #[test]
    fn test_insert_without_placeholder_overwrites_when_filled() {
        let spec = no_placeholder("99/99");
        assert_eq!(insert_string(&spec, "12/34", "9", 0, None), "92/34");
    }

    #[test]
    fn test_insert_into_prefix_overwrites() {
        let spec = no_placeholder("+1 999");
        assert_eq!(insert_string(&spec, "+1 ", "+1 5", 0, None), "+1 5");
    }
}
