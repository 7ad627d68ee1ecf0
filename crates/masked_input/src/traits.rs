//! Masked field store interface.
//!
//! [`MaskedInput`] is the surface an integration layer drives: field
//! lifecycle, widget-style edits, caret and selection, and read access for
//! rendering. [`MaskedInputStore`] is the implementation shipped here; tests
//! and alternative frontends can provide their own.

use crate::id::FieldId;
use crate::selection::SelectionRange;
use crate::store::{FieldChange, MaskedInputStore};
use mask_core::{EditOutcome, MaskGenerator};

pub trait MaskedInput {
    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Ensure a field exists; if missing, create it with `generator` and the
    /// programmatic value `initial`.
    fn ensure_field(&mut self, id: FieldId, generator: Option<MaskGenerator>, initial: &str);

    /// Swap the generator and re-mask the current value.
    fn set_generator(&mut self, id: FieldId, generator: Option<MaskGenerator>) -> bool;

    /// Programmatic value. Caret to the end, no change notification.
    fn set_value(&mut self, id: FieldId, value: &str) -> bool;

    /// Drop all fields.
    fn clear(&mut self);

    // =========================================================================
    // Editing
    // =========================================================================

    /// Insert text at the caret, replacing any selection.
    fn insert_text(&mut self, id: FieldId, s: &str) -> Option<EditOutcome>;

    fn backspace(&mut self, id: FieldId) -> Option<EditOutcome>;

    fn delete(&mut self, id: FieldId) -> Option<EditOutcome>;

    /// Changes reported by edits since the last call.
    fn take_changes(&mut self) -> Vec<FieldChange>;

    // =========================================================================
    // Caret & Selection
    // =========================================================================

    fn set_caret(&mut self, id: FieldId, caret: usize, selecting: bool);

    fn select(&mut self, id: FieldId, start: usize, end: usize);

    fn select_all(&mut self, id: FieldId);

    // =========================================================================
    // Read Access
    // =========================================================================

    fn display(&self, id: FieldId) -> Option<&str>;

    fn value(&self, id: FieldId) -> Option<&str>;

    fn caret(&self, id: FieldId) -> Option<usize>;

    fn selection(&self, id: FieldId) -> Option<SelectionRange>;

    fn went_back(&self, id: FieldId) -> bool;

    fn value_revision(&self, id: FieldId) -> u64;
}

impl MaskedInput for MaskedInputStore {
    #[inline]
    fn ensure_field(&mut self, id: FieldId, generator: Option<MaskGenerator>, initial: &str) {
        MaskedInputStore::ensure_field(self, id, generator, initial)
    }

    #[inline]
    fn set_generator(&mut self, id: FieldId, generator: Option<MaskGenerator>) -> bool {
        MaskedInputStore::set_generator(self, id, generator)
    }

    #[inline]
    fn set_value(&mut self, id: FieldId, value: &str) -> bool {
        MaskedInputStore::set_value(self, id, value)
    }

    #[inline]
    fn clear(&mut self) {
        MaskedInputStore::clear(self)
    }

    #[inline]
    fn insert_text(&mut self, id: FieldId, s: &str) -> Option<EditOutcome> {
        MaskedInputStore::insert_text(self, id, s)
    }

    #[inline]
    fn backspace(&mut self, id: FieldId) -> Option<EditOutcome> {
        MaskedInputStore::backspace(self, id)
    }

    #[inline]
    fn delete(&mut self, id: FieldId) -> Option<EditOutcome> {
        MaskedInputStore::delete(self, id)
    }

    #[inline]
    fn take_changes(&mut self) -> Vec<FieldChange> {
        MaskedInputStore::take_changes(self)
    }

    #[inline]
    fn set_caret(&mut self, id: FieldId, caret: usize, selecting: bool) {
        MaskedInputStore::set_caret(self, id, caret, selecting)
    }

    #[inline]
    fn select(&mut self, id: FieldId, start: usize, end: usize) {
        MaskedInputStore::select(self, id, start, end)
    }

    #[inline]
    fn select_all(&mut self, id: FieldId) {
        MaskedInputStore::select_all(self, id)
    }

    #[inline]
    fn display(&self, id: FieldId) -> Option<&str> {
        MaskedInputStore::display(self, id)
    }

    #[inline]
    fn value(&self, id: FieldId) -> Option<&str> {
        MaskedInputStore::value(self, id)
    }

    #[inline]
    fn caret(&self, id: FieldId) -> Option<usize> {
        MaskedInputStore::caret(self, id)
    }

    #[inline]
    fn selection(&self, id: FieldId) -> Option<SelectionRange> {
        MaskedInputStore::selection(self, id)
    }

    #[inline]
    fn went_back(&self, id: FieldId) -> bool {
        MaskedInputStore::went_back(self, id)
    }

    #[inline]
    fn value_revision(&self, id: FieldId) -> u64 {
        MaskedInputStore::value_revision(self, id)
    }
}
