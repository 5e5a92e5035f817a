//! Error types for Horizon Mask.
//!
//! Compiling a pattern and running the engine never fail. The only fallible
//! step is building a [`CharRuleTable`](crate::CharRuleTable), since every
//! rule fragment is compiled as a regular expression up front.

/// Result type alias for rule table operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a character rule table.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The rule fragment is not a valid regular expression.
    #[error("Invalid rule for symbol '{symbol}' ({fragment}): {source}")]
    InvalidRule {
        symbol: char,
        fragment: String,
        #[source]
        source: regex::Error,
    },

    /// The symbol cannot be used as a rule key.
    #[error("Symbol '{symbol}' cannot be used as a mask rule")]
    InvalidSymbol { symbol: char },
}

impl Error {
    /// Create a rule compilation error.
    pub fn invalid_rule(symbol: char, fragment: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidRule {
            symbol,
            fragment: fragment.into(),
            source,
        }
    }

    /// Create a reserved symbol error.
    pub fn invalid_symbol(symbol: char) -> Self {
        Self::InvalidSymbol { symbol }
    }

    /// The symbol the error refers to.
    pub fn symbol(&self) -> char {
        match self {
            Self::InvalidRule { symbol, .. } | Self::InvalidSymbol { symbol } => *symbol,
        }
    }
}
