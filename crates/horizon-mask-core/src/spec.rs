//! Compiled mask patterns.
//!
//! A pattern is a template string. Characters that are keys of the
//! [`CharRuleTable`] become editable slots; everything else is permanent
//! literal text displayed as-is.
//!
//! # Meta Characters
//!
//! | Char | Meaning |
//! |------|---------|
//! | `\`  | Escape the following character so it is used as literal text |
//!
//! # Example
//!
//! ```
//! use horizon_mask_core::MaskSpec;
//!
//! // Card number with `_` shown in unfilled slots.
//! let spec = MaskSpec::new("9999-9999-9999");
//! assert_eq!(spec.len(), 14);
//! assert_eq!(spec.editable_count(), 12);
//!
//! // A leading escaped `9` is fixed text and forms the prefix.
//! let spec = MaskSpec::new("\\9999");
//! assert_eq!(spec.prefix(), "9");
//! assert!(spec.is_permanent(0));
//! ```

use std::collections::BTreeSet;
use std::fmt;

use crate::logging::targets;
use crate::rules::{CharRuleTable, ESCAPE_CHAR};

/// Placeholder character used when none is specified.
pub const DEFAULT_PLACEHOLDER: char = '_';

/// An immutable masking specification compiled from a pattern.
///
/// Build one with [`compile`] (or [`MaskSpec::new`] for the defaults) and pass
/// it to the engine functions. A spec compiled from an empty or absent
/// pattern is *inactive*: engine functions then pass values through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskSpec {
    /// Character shown in unfilled editable slots, or `None` for variable-length values.
    placeholder: Option<char>,
    /// Rules governing the editable slots.
    rules: CharRuleTable,
    /// De-escaped pattern. `None` when masking is inactive.
    literal: Option<Vec<char>>,
    /// Fixed positions within `literal`.
    permanents: BTreeSet<usize>,
    /// Leading run of permanent characters.
    prefix: String,
    /// One past the last editable slot.
    last_editable_pos: Option<usize>,
}

/// Compile a pattern into a [`MaskSpec`].
///
/// Walks the pattern left to right. A backslash makes the next character
/// permanent even when it is a rule symbol; a trailing backslash is dropped.
/// Compilation never fails: an absent or empty pattern yields an inactive spec.
pub fn compile(pattern: Option<&str>, placeholder: Option<char>, rules: CharRuleTable) -> MaskSpec {
    let pattern = match pattern {
        Some(pattern) if !pattern.is_empty() => pattern,
        _ => {
            tracing::trace!(target: targets::COMPILE, "no pattern, masking inactive");
            return MaskSpec {
                placeholder,
                rules,
                literal: None,
                permanents: BTreeSet::new(),
                prefix: String::new(),
                last_editable_pos: None,
            };
        }
    };

    let mut literal = Vec::with_capacity(pattern.len());
    let mut permanents = BTreeSet::new();
    let mut prefix = String::new();
    let mut last_editable_pos = None;
    let mut escaped = false;

    for ch in pattern.chars() {
        if !escaped && ch == ESCAPE_CHAR {
            escaped = true;
            continue;
        }

        let pos = literal.len();
        if escaped || !rules.contains(ch) {
            permanents.insert(pos);
            // Every position so far is permanent.
            if permanents.len() == pos + 1 {
                prefix.push(ch);
            }
        } else {
            last_editable_pos = Some(pos + 1);
        }
        literal.push(ch);
        escaped = false;
    }

    tracing::trace!(
        target: targets::COMPILE,
        len = literal.len(),
        permanent_count = permanents.len(),
        prefix = %prefix,
        ?last_editable_pos,
        "compiled mask"
    );

    MaskSpec {
        placeholder,
        rules,
        literal: Some(literal),
        permanents,
        prefix,
        last_editable_pos,
    }
}

impl MaskSpec {
    /// Compile `pattern` with the default `_` placeholder and default rules.
    pub fn new(pattern: &str) -> Self {
        compile(Some(pattern), Some(DEFAULT_PLACEHOLDER), CharRuleTable::default())
    }

    /// A spec with masking disabled.
    pub fn inactive() -> Self {
        compile(None, Some(DEFAULT_PLACEHOLDER), CharRuleTable::default())
    }

    /// Returns true if a pattern is in effect.
    pub fn is_active(&self) -> bool {
        self.literal.is_some()
    }

    /// Get the placeholder character.
    pub fn placeholder(&self) -> Option<char> {
        self.placeholder
    }

    /// Get the rule table.
    pub fn rules(&self) -> &CharRuleTable {
        &self.rules
    }

    /// Get the de-escaped pattern characters. Empty when inactive.
    pub fn literal(&self) -> &[char] {
        self.literal.as_deref().unwrap_or(&[])
    }

    /// Get the de-escaped pattern as a string, or `None` when inactive.
    pub fn literal_str(&self) -> Option<String> {
        self.literal.as_ref().map(|chars| chars.iter().collect())
    }

    /// Get the pattern character at `pos`.
    pub fn literal_at(&self, pos: usize) -> Option<char> {
        self.literal().get(pos).copied()
    }

    /// Length of the de-escaped pattern.
    pub fn len(&self) -> usize {
        self.literal().len()
    }

    /// Returns true if the pattern has no positions.
    pub fn is_empty(&self) -> bool {
        self.literal().is_empty()
    }

    /// Get the set of permanent positions.
    pub fn permanent_positions(&self) -> &BTreeSet<usize> {
        &self.permanents
    }

    /// Returns true if `pos` holds fixed text.
    pub fn is_permanent(&self, pos: usize) -> bool {
        self.permanents.contains(&pos)
    }

    /// Get the unremovable leading literal text.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Length of the prefix in characters.
    pub fn prefix_len(&self) -> usize {
        self.prefix.chars().count()
    }

    /// Index one past the last editable slot, or `None` when there is none.
    pub fn last_editable_pos(&self) -> Option<usize> {
        self.last_editable_pos
    }

    /// Returns true if the pattern has at least one editable slot.
    pub fn has_editable(&self) -> bool {
        self.last_editable_pos.is_some()
    }

    /// Number of editable slots.
    pub fn editable_count(&self) -> usize {
        self.len() - self.permanents.len()
    }
}

impl Default for MaskSpec {
    fn default() -> Self {
        Self::inactive()
    }
}

impl fmt::Display for MaskSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &ch in self.literal() {
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}
