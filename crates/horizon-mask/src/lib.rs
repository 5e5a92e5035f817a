//! Masked text input editing for Horizon Mask.
//!
//! This crate drives a host text field through a compiled input mask. The
//! host keeps ownership of the field and forwards its notifications to a
//! [`MaskedInput`], which rewrites the field's value and caret so that the
//! text always conforms to the pattern.
//!
//! The pure masking engine lives in `horizon_mask_core` and is re-exported
//! here.
//!
//! # Example
//!
//! ```
//! use horizon_mask::{MaskOptions, MaskedInput, MemoryField, PlatformQuirks, TextField};
//!
//! let options = MaskOptions::new().mask("+7 (999) 999-99-99");
//! let mut input = MaskedInput::new(options, PlatformQuirks::none(), None, None);
//! let mut field = MemoryField::new();
//!
//! input.mount(&mut field);
//! input.focus(&mut field);
//! assert_eq!(field.value(), "+7 (___) ___-__-__");
//!
//! field.type_text("9");
//! input.change(&mut field);
//! assert_eq!(field.value(), "+7 (9__) ___-__-__");
//! assert_eq!(field.selection().start, 5);
//! ```
//!
//! # Platform Quirks
//!
//! Some hosts apply caret changes late or deliver pasted text in ways the
//! editing logic cannot interpret. [`PlatformQuirks`] selects the
//! workarounds; queued caret work is executed by
//! [`MaskedInput::run_deferred`] on the host's next tick.

mod deferred;
mod editor;
mod field;
mod key;
mod options;
mod quirks;

pub use editor::{MaskedInput, string_value};
pub use field::{MemoryField, TextField};
pub use key::{EditKey, KeyPress, KeyboardModifiers};
pub use options::MaskOptions;
pub use quirks::PlatformQuirks;

pub use horizon_mask_core::{
    CharRuleTable, Error, InvalidChar, MaskSpec, Result, Selection, Signal, compile, engine,
};
