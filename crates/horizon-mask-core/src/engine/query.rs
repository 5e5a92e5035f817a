//! Engine queries.

use crate::spec::MaskSpec;

/// Returns true if `pos` holds fixed pattern text.
pub fn is_permanent(spec: &MaskSpec, pos: usize) -> bool {
    spec.is_permanent(pos)
}

/// Check if `ch` can occupy `pos`.
///
/// A permanent position accepts only its own literal character; an editable
/// slot accepts what its rule matches. Positions past the pattern accept
/// nothing. With an inactive spec every character is allowed.
pub fn is_allowed_char(spec: &MaskSpec, pos: usize, ch: char) -> bool {
    if !spec.is_active() {
        return true;
    }
    allowed_at(spec, pos, Some(ch))
}

/// Returns true if no editable position holds a real entered character.
///
/// Permanent positions are ignored.
pub fn is_empty(spec: &MaskSpec, value: &str) -> bool {
    if !spec.is_active() {
        return value.is_empty();
    }
    is_empty_chars(spec, &chars(value))
}

/// Length of the filled region of `value`.
///
/// With a placeholder this is one past the rightmost entered character, never
/// less than the prefix length. Without one, trailing permanent characters are
/// ignored down to the prefix and the rest of the value counts as filled.
pub fn filled_length(spec: &MaskSpec, value: &str) -> usize {
    if !spec.is_active() {
        return value.chars().count();
    }
    filled_len(spec, &chars(value))
}

/// Returns true if every position up to the end of the pattern is filled.
///
/// Always false with an inactive spec.
pub fn is_filled(spec: &MaskSpec, value: &str) -> bool {
    spec.is_active() && is_filled_chars(spec, &chars(value))
}

/// Find the nearest editable slot at or after `pos`.
pub fn right_editable_pos(spec: &MaskSpec, pos: usize) -> Option<usize> {
    (pos..spec.len()).find(|&i| !spec.is_permanent(i))
}

/// Find the nearest editable slot at or before `pos`.
pub fn left_editable_pos(spec: &MaskSpec, pos: usize) -> Option<usize> {
    if spec.is_empty() {
        return None;
    }
    (0..=pos.min(spec.len() - 1))
        .rev()
        .find(|&i| !spec.is_permanent(i))
}

/// Find the first editable slot.
pub fn first_editable_pos(spec: &MaskSpec) -> Option<usize> {
    right_editable_pos(spec, 0)
}

pub(crate) fn chars(value: &str) -> Vec<char> {
    value.chars().collect()
}

/// Absent characters are never allowed.
pub(crate) fn allowed_at(spec: &MaskSpec, pos: usize, ch: Option<char>) -> bool {
    let (Some(ch), Some(symbol)) = (ch, spec.literal_at(pos)) else {
        return false;
    };
    if spec.is_permanent(pos) {
        symbol == ch
    } else {
        spec.rules().matches(symbol, ch)
    }
}

pub(crate) fn is_entered(spec: &MaskSpec, pos: usize, ch: Option<char>) -> bool {
    !spec.is_permanent(pos) && allowed_at(spec, pos, ch)
}

pub(crate) fn is_empty_chars(spec: &MaskSpec, value: &[char]) -> bool {
    value
        .iter()
        .enumerate()
        .all(|(i, &ch)| !is_entered(spec, i, Some(ch)))
}

pub(crate) fn filled_len(spec: &MaskSpec, value: &[char]) -> usize {
    let prefix_len = spec.prefix_len();

    if spec.placeholder().is_none() {
        let mut len = value.len();
        while len > prefix_len && spec.is_permanent(len - 1) {
            len -= 1;
        }
        return len;
    }

    (prefix_len..=value.len())
        .rev()
        .find(|&i| is_entered(spec, i, value.get(i).copied()))
        .map_or(prefix_len, |i| i + 1)
}

pub(crate) fn is_filled_chars(spec: &MaskSpec, value: &[char]) -> bool {
    filled_len(spec, value) == spec.len()
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
    fn test_is_allowed_char() {
        let spec = MaskSpec::new("aa-99");
        assert!(is_allowed_char(&spec, 0, 'Q'));
        assert!(!is_allowed_char(&spec, 0, '1'));
        assert!(is_allowed_char(&spec, 2, '-'));
        assert!(!is_allowed_char(&spec, 2, '1'));
        assert!(is_allowed_char(&spec, 3, '7'));
        assert!(!is_allowed_char(&spec, 5, '7'));
    }

    #[test]
    fn test_is_allowed_char_inactive() {
        let spec = MaskSpec::inactive();
        assert!(is_allowed_char(&spec, 10, '?'));
    }

    #[test]
    fn test_is_empty() {
        let spec = MaskSpec::new("+7 (999)");
        assert!(is_empty(&spec, "+7 (___)"));
        assert!(is_empty(&spec, ""));
        assert!(!is_empty(&spec, "+7 (1__)"));
        // Permanent text alone is not input.
        assert!(is_empty(&spec, "+7 ("));
    }

    #[test]
    fn test_filled_length_with_placeholder() {
        let spec = MaskSpec::new("9999-9999-9999");
        assert_eq!(filled_length(&spec, "____-____-____"), 0);
        assert_eq!(filled_length(&spec, "5___-____-____"), 1);
        assert_eq!(filled_length(&spec, "1234-____-____"), 4);
        assert_eq!(filled_length(&spec, "1234-5___-____"), 6);
        assert_eq!(filled_length(&spec, "____-____-___1"), 14);
    }

    #[test]
    fn test_filled_length_never_below_prefix() {
        let spec = MaskSpec::new("+7 (999)");
        assert_eq!(filled_length(&spec, "+7 (___)"), 4);
        assert_eq!(filled_length(&spec, "+7 (12_)"), 6);
    }

    #[test]
    fn test_filled_length_without_placeholder() {
        let spec = no_placeholder("99/99");
        assert_eq!(filled_length(&spec, "12/"), 2);
        assert_eq!(filled_length(&spec, "12/3"), 4);
        assert_eq!(filled_length(&spec, ""), 0);

        let spec = no_placeholder("(99)");
        assert_eq!(filled_length(&spec, "("), 1);
        assert_eq!(filled_length(&spec, "(12)"), 3);
    }

    #[test]
    fn test_is_filled() {
        let spec = MaskSpec::new("99-99");
        assert!(is_filled(&spec, "12-34"));
        assert!(!is_filled(&spec, "12-3_"));
        assert!(!is_filled(&MaskSpec::inactive(), ""));
    }

    #[test]
    fn test_editable_pos_search() {
        let spec = MaskSpec::new("(999) 999");
        assert_eq!(first_editable_pos(&spec), Some(1));
        assert_eq!(right_editable_pos(&spec, 4), Some(6));
        assert_eq!(right_editable_pos(&spec, 9), None);
        assert_eq!(left_editable_pos(&spec, 5), Some(3));
        assert_eq!(left_editable_pos(&spec, 0), None);
        assert_eq!(left_editable_pos(&spec, 100), Some(8));
    }

    #[test]
    fn test_editable_pos_search_inactive() {
        let spec = MaskSpec::inactive();
        assert_eq!(right_editable_pos(&spec, 0), None);
        assert_eq!(left_editable_pos(&spec, 3), None);
    }
}
