//! Character-class rules for mask patterns.
//!
//! A [`CharRuleTable`] maps a pattern symbol to a regular-expression fragment
//! describing which input characters an editable slot accepts.
//!
//! # Default Rules
//!
//! | Symbol | Fragment      | Accepts                 |
//! |--------|---------------|-------------------------|
//! | `9`    | `[0-9]`       | Digit                   |
//! | `a`    | `[A-Za-z]`    | Letter                  |
//! | `*`    | `[A-Za-z0-9]` | Alphanumeric            |
//!
//! # Example
//!
//! ```
//! use horizon_mask_core::CharRuleTable;
//!
//! // Extend the defaults with a hex digit symbol.
//! let rules = CharRuleTable::default().with_rule('h', "[0-9a-fA-F]").unwrap();
//! assert!(rules.matches('h', 'F'));
//! assert!(rules.matches('9', '4'));
//! assert!(!rules.matches('h', 'g'));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::logging::targets;

/// The escape character of mask patterns. It can never be a rule symbol.
pub const ESCAPE_CHAR: char = '\\';

const DEFAULT_RULES: [(char, &str); 3] = [('9', "[0-9]"), ('a', "[A-Za-z]"), ('*', "[A-Za-z0-9]")];

/// A single compiled rule.
#[derive(Clone)]
struct CharRule {
    fragment: String,
    regex: Regex,
}

impl CharRule {
    fn compile(symbol: char, fragment: &str) -> Result<Self> {
        if symbol == ESCAPE_CHAR {
            return Err(Error::invalid_symbol(symbol));
        }
        let regex =
            Regex::new(fragment).map_err(|e| Error::invalid_rule(symbol, fragment, e))?;
        Ok(Self {
            fragment: fragment.to_string(),
            regex,
        })
    }

    fn accepts(&self, ch: char) -> bool {
        let mut buf = [0u8; 4];
        self.regex.is_match(ch.encode_utf8(&mut buf))
    }
}

/// Mapping from pattern symbol to the class of characters it accepts.
///
/// Fragments are compiled once when the rule is added; the table is immutable
/// afterwards and cheap to clone.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<char, String>", into = "BTreeMap<char, String>")]
pub struct CharRuleTable {
    rules: BTreeMap<char, CharRule>,
}

impl CharRuleTable {
    /// Create a table with no rules. Every pattern character is then literal.
    pub fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Build a table from `(symbol, fragment)` pairs, replacing the defaults entirely.
    pub fn from_rules<I, S>(rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = (char, S)>,
        S: AsRef<str>,
    {
        rules
            .into_iter()
            .try_fold(Self::empty(), |table, (symbol, fragment)| {
                table.with_rule(symbol, fragment.as_ref())
            })
    }

    /// Add or replace the rule for `symbol`.
    pub fn with_rule(mut self, symbol: char, fragment: &str) -> Result<Self> {
        let rule = CharRule::compile(symbol, fragment)?;
        tracing::trace!(target: targets::RULES, %symbol, fragment, "compiled rule");
        self.rules.insert(symbol, rule);
        Ok(self)
    }

    /// Remove the rule for `symbol`, making it a literal character.
    pub fn without_rule(mut self, symbol: char) -> Self {
        self.rules.remove(&symbol);
        self
    }

    /// Returns true if `symbol` governs an editable slot.
    pub fn contains(&self, symbol: char) -> bool {
        self.rules.contains_key(&symbol)
    }

    /// Get the regular-expression fragment for `symbol`.
    pub fn fragment(&self, symbol: char) -> Option<&str> {
        self.rules.get(&symbol).map(|r| r.fragment.as_str())
    }

    /// Iterate over the rule symbols in order.
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.rules.keys().copied()
    }

    /// Number of rules in the table.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Check whether `ch` satisfies the rule bound to `symbol`.
    ///
    /// Returns false when `symbol` has no rule.
    pub fn matches(&self, symbol: char, ch: char) -> bool {
        self.rules.get(&symbol).is_some_and(|rule| rule.accepts(ch))
    }
}

impl Default for CharRuleTable {
    fn default() -> Self {
        // Every fragment in `DEFAULT_RULES` compiles, so the fallback is unreachable.
        Self::from_rules(DEFAULT_RULES).unwrap_or_else(|_| Self::empty())
    }
}

impl PartialEq for CharRuleTable {
    fn eq(&self, other: &Self) -> bool {
        self.rules.len() == other.rules.len()
            && self
                .rules
                .iter()
                .zip(other.rules.iter())
                .all(|((a, ra), (b, rb))| a == b && ra.fragment == rb.fragment)
    }
}

impl Eq for CharRuleTable {}

impl fmt::Debug for CharRuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.rules.iter().map(|(symbol, rule)| (symbol, &rule.fragment)))
            .finish()
    }
}

impl TryFrom<BTreeMap<char, String>> for CharRuleTable {
    type Error = Error;

    fn try_from(rules: BTreeMap<char, String>) -> Result<Self> {
        Self::from_rules(rules)
    }
}

impl From<CharRuleTable> for BTreeMap<char, String> {
    fn from(table: CharRuleTable) -> Self {
        table
            .rules
            .into_iter()
            .map(|(symbol, rule)| (symbol, rule.fragment))
            .collect()
    }
}

static_assertions::assert_impl_all!(CharRuleTable: Send, Sync);
