//! Core systems for Horizon Mask.
//!
//! This crate provides the masking engine behind masked text inputs:
//!
//! - **Rule Table**: Pattern symbols mapped to the characters they accept
//! - **Pattern Compiler**: Patterns compiled into an immutable [`MaskSpec`]
//! - **Engine**: Pure queries and transformations over `(MaskSpec, value)`
//! - **Signals**: Notifications for rejected characters and value changes
//!
//! # Example
//!
//! ```
//! use horizon_mask_core::{CharRuleTable, compile, engine};
//!
//! let spec = compile(Some("aa-99"), Some('_'), CharRuleTable::default());
//!
//! let value = engine::format_value(&spec, "AB12");
//! assert_eq!(value, "AB-12");
//!
//! let cleared = engine::clear_range(&spec, &value, 0, 2);
//! assert_eq!(cleared, "__-12");
//! assert_eq!(engine::filled_length(&spec, &cleared), 5);
//! ```
//!
//! # Without a Placeholder
//!
//! ```
//! use horizon_mask_core::{CharRuleTable, compile, engine};
//!
//! let spec = compile(Some("99/99"), None, CharRuleTable::default());
//! let value = engine::insert_string(&spec, "", "12", 0, None);
//! assert_eq!(value, "12");
//! assert_eq!(engine::insert_string(&spec, &value, "3", 2, None), "12/3");
//! ```

pub mod engine;
mod error;
pub mod logging;
pub mod rules;
mod selection;
pub mod signal;
mod spec;

pub use engine::{InvalidChar, InvalidCharHook};
pub use error::{Error, Result};
pub use rules::CharRuleTable;
pub use selection::Selection;
pub use signal::{ConnectionId, Signal};
pub use spec::{DEFAULT_PLACEHOLDER, MaskSpec, compile};
