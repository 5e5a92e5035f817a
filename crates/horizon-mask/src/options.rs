//! Configuration for masked inputs.

use horizon_mask_core::{CharRuleTable, DEFAULT_PLACEHOLDER, MaskSpec, compile};
use serde::{Deserialize, Serialize};

/// Options recognized by a [`MaskedInput`](crate::MaskedInput).
///
/// # Example
///
/// ```
/// use horizon_mask::MaskOptions;
///
/// let options = MaskOptions::new()
///     .mask("99/99")
///     .no_mask_char()
///     .always_show_mask(true);
/// assert_eq!(options.compile().len(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskOptions {
    /// The pattern. `None` disables masking.
    pub mask: Option<String>,
    /// Placeholder shown in unfilled slots. `None` means values only hold the filled part.
    pub mask_char: Option<char>,
    /// Rules for the pattern's editable symbols.
    pub format_chars: CharRuleTable,
    /// Keep the skeleton visible even while the field is empty and unfocused.
    pub always_show_mask: bool,
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self {
            mask: None,
            mask_char: Some(DEFAULT_PLACEHOLDER),
            format_chars: CharRuleTable::default(),
            always_show_mask: false,
        }
    }
}

impl MaskOptions {
    /// Create options with default settings and no mask.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pattern.
    pub fn mask(mut self, pattern: impl Into<String>) -> Self {
        self.mask = Some(pattern.into());
        self
    }

    /// Remove the pattern, disabling masking.
    pub fn no_mask(mut self) -> Self {
        self.mask = None;
        self
    }

    /// Set the placeholder character.
    pub fn mask_char(mut self, placeholder: char) -> Self {
        self.mask_char = Some(placeholder);
        self
    }

    /// Use no placeholder; unfilled trailing slots are left out of the value.
    pub fn no_mask_char(mut self) -> Self {
        self.mask_char = None;
        self
    }

    /// Set the rule table.
    pub fn format_chars(mut self, rules: CharRuleTable) -> Self {
        self.format_chars = rules;
        self
    }

    /// Keep the skeleton visible when empty and unfocused.
    pub fn always_show_mask(mut self, enabled: bool) -> Self {
        self.always_show_mask = enabled;
        self
    }

    /// Compile these options into a [`MaskSpec`].
    pub fn compile(&self) -> MaskSpec {
        compile(self.mask.as_deref(), self.mask_char, self.format_chars.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = MaskOptions::default();
        assert_eq!(options.mask, None);
        assert_eq!(options.mask_char, Some('_'));
        assert!(!options.always_show_mask);
        assert!(!options.compile().is_active());
    }

    #[test]
    fn test_builder() {
        let rules = CharRuleTable::default().with_rule('#', "[0-9A-F]").unwrap();
        let options = MaskOptions::new()
            .mask("##-##")
            .mask_char('*')
            .format_chars(rules);
        let spec = options.compile();
        assert_eq!(spec.placeholder(), Some('*'));
        assert_eq!(spec.editable_count(), 4);
        assert!(!options.clone().no_mask().compile().is_active());
    }

    #[test]
    fn test_serde_round_trip() {
        let options = MaskOptions::new().mask("aa-99").no_mask_char();
        let json = serde_json::to_string(&options).unwrap();
        let back: MaskOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
    }

    #[test]
    fn test_serde_defaults_missing_fields() {
        let options: MaskOptions = serde_json::from_str(r#"{"mask":"9999"}"#).unwrap();
        assert_eq!(options.mask.as_deref(), Some("9999"));
        assert_eq!(options.mask_char, Some('_'));
        assert_eq!(options.format_chars, CharRuleTable::default());

        let options: MaskOptions =
            serde_json::from_str(r#"{"mask":"9999","mask_char":null}"#).unwrap();
        assert_eq!(options.mask_char, None);
    }
}
