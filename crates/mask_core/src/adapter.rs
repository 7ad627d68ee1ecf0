//! Adapter contract between a session and a text widget.
//!
//! A widget integration implements [`CaretAdapter`] so that
//! [`MaskSession::handle_change`](crate::MaskSession::handle_change) can read
//! the caret the widget ended up with after an edit, write back the
//! reconciled caret and forward the new logical value.
//!
//! Offsets are character offsets into the displayed text. Integrations whose
//! widgets index UTF-8 bytes convert at this boundary.
//!
//! ```
//! use mask_core::{CaretAdapter, MaskGenerator, MaskSession};
//!
//! #[derive(Default)]
//! struct Field {
//!     caret: usize,
//!     reported: Vec<String>,
//! }
//!
//! impl CaretAdapter for Field {
//!     fn caret_offset(&self) -> usize {
//!         self.caret
//!     }
//!     fn set_caret_offset(&mut self, offset: usize) {
//!         self.caret = offset;
//!     }
//!     fn on_change(&mut self, value: &str) {
//!         self.reported.push(value.to_owned());
//!     }
//! }
//!
//! let mut session = MaskSession::new(Some(MaskGenerator::fixed("999-999")));
//! let mut field = Field { caret: 4, ..Field::default() };
//! session.handle_change(&mut field, "1234");
//! assert_eq!(session.display(), "123-4");
//! assert_eq!(field.caret, 5);
//! assert_eq!(field.reported, vec!["1234".to_owned()]);
//! ```

pub trait CaretAdapter {
    /// Caret offset in the widget's current text.
    fn caret_offset(&self) -> usize;

    /// Move the widget caret.
    fn set_caret_offset(&mut self, offset: usize);

    /// The logical value changed.
    fn on_change(&mut self, value: &str);
}

impl<T: CaretAdapter + ?Sized> CaretAdapter for &mut T {
    #[inline]
    fn caret_offset(&self) -> usize {
        (**self).caret_offset()
    }

    #[inline]
    fn set_caret_offset(&mut self, offset: usize) {
        (**self).set_caret_offset(offset)
    }

    #[inline]
    fn on_change(&mut self, value: &str) {
        (**self).on_change(value)
    }
}
