//! # masked_input
//!
//! UI-agnostic masked text fields built on `mask_core`.
//!
//! - [`FieldId`]: opaque field identifier
//! - [`MaskedInputStore`]: per-field display text, caret, selection and mask
//!   session, edited the way a single-line widget would
//! - [`MaskedInput`]: the store's interface, for alternative implementations
//! - [`SelectionRange`]: a character-offset selection
//!
//! All carets and selections are character offsets. Use
//! [`char_to_byte_offset`] and [`byte_to_char_offset`] when talking to a
//! widget that indexes UTF-8 bytes.

mod id;
mod selection;
mod state;
mod store;
mod text;
mod traits;

pub use id::FieldId;
pub use selection::SelectionRange;
pub use store::{FieldChange, MaskedInputStore};
pub use traits::MaskedInput;

pub use text::{
    byte_to_char_offset, char_count, char_to_byte_offset, clamp_to_char_boundary,
    filter_single_line,
};
