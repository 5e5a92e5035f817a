//! The masking engine.
//!
//! Every function here is pure: it takes a [`MaskSpec`](crate::MaskSpec) and a
//! value and returns a result without retaining either. The caller owns the
//! live value and caret and threads results back through successive calls.
//!
//! - **Queries**: [`is_permanent`], [`is_allowed_char`], [`is_empty`],
//!   [`filled_length`], [`is_filled`] and the editable-slot searches
//! - **Transformations**: [`format_value`], [`clear_range`], [`insert_string`],
//!   [`insert_string_length`]
//!
//! Positions are `char` indices. With an inactive spec every transformation
//! returns its input value unchanged.
//!
//! # Example
//!
//! ```
//! use horizon_mask_core::{MaskSpec, engine};
//!
//! let spec = MaskSpec::new("9999-9999-9999");
//! let empty = engine::format_value(&spec, "");
//! assert_eq!(empty, "____-____-____");
//!
//! let value = engine::insert_string(&spec, &empty, "1234567812345678", 0, None);
//! assert_eq!(value, "1234-5678-1234");
//! assert!(engine::is_filled(&spec, &value));
//! ```

mod query;
mod transform;

pub use query::{
    filled_length, first_editable_pos, is_allowed_char, is_empty, is_filled, is_permanent,
    left_editable_pos, right_editable_pos,
};
pub use transform::{clear_range, empty_value, format_value, insert_string, insert_string_length};

/// A character rejected by its slot's rule during an insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidChar {
    /// The rejected input character.
    pub ch: char,
    /// The write position it was rejected at.
    pub pos: usize,
}

/// Optional hook invoked once per rejected character.
pub type InvalidCharHook<'a> = Option<&'a mut dyn FnMut(InvalidChar)>;
