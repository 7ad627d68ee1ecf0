//! Central store for masked text fields.
//!
//! The store emulates a single-line text widget. Every edit first changes the
//! display text the way a plain widget would (insert at the caret, replace the
//! selection, drop one character), then hands the edited text to the field's
//! [`MaskSession`], which masks it and moves the caret to where it belongs.
//! The store does no layout or text measurement.

use crate::id::FieldId;
use crate::selection::SelectionRange;
use crate::state::FieldState;
use crate::text::{char_count, filter_single_line, insert_at, remove_range};
use mask_core::{CaretAdapter, EditOutcome, MaskGenerator, MaskSession};
use std::collections::HashMap;

/// A logical value reported by a user edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldChange {
    pub id: FieldId,
    pub value: String,
}

/// Store of masked field state keyed by [`FieldId`].
///
/// User edits (`insert_text`, `backspace`, `delete`) go through the mask and
/// queue a [`FieldChange`] when the logical value changes. Programmatic
/// updates (`set_value`, `set_generator`) never queue a change.
///
/// # Example
///
/// ```
/// use masked_input::{FieldId, MaskedInputStore};
/// use mask_core::MaskGenerator;
///
/// let mut store = MaskedInputStore::new();
/// let id = FieldId::from_raw(1);
///
/// store.ensure_field(id, Some(MaskGenerator::fixed("(99) 9999-9999")), "");
/// for ch in ["1", "2", "3"] {
///     store.insert_text(id, ch);
/// }
///
/// assert_eq!(store.display(id), Some("(12) 3"));
/// assert_eq!(store.caret(id), Some(6));
/// assert_eq!(store.value(id), Some("123"));
/// assert_eq!(store.take_changes().len(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MaskedInputStore {
    fields: HashMap<FieldId, FieldState>,
    changes: Vec<FieldChange>,
}

/// One field's caret and the change queue, borrowed for a single edit.
struct FieldAdapter<'a> {
    id: FieldId,
    caret: &'a mut usize,
    changes: &'a mut Vec<FieldChange>,
}

impl CaretAdapter for FieldAdapter<'_> {
    fn caret_offset(&self) -> usize {
        *self.caret
    }

    fn set_caret_offset(&mut self, offset: usize) {
        *self.caret = offset;
    }

    fn on_change(&mut self, value: &str) {
        self.changes.push(FieldChange {
            id: self.id,
            value: value.to_owned(),
        });
    }
}

impl MaskedInputStore {
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
            changes: Vec::new(),
        }
    }

    pub fn has(&self, id: FieldId) -> bool {
        self.fields.contains_key(&id)
    }

    /// Ensure a field exists; if missing, it is created with `generator` and
    /// `initial` as its programmatic value.
    pub fn ensure_field(&mut self, id: FieldId, generator: Option<MaskGenerator>, initial: &str) {
        self.fields
            .entry(id)
            .or_insert_with(|| FieldState::new(MaskSession::with_value(generator, initial)));
    }

    /// Swap the field's generator and re-mask its current value. The caret
    /// keeps its offset, clamped to the new display.
    ///
    /// Returns `true` if the logical value changed.
    pub fn set_generator(&mut self, id: FieldId, generator: Option<MaskGenerator>) -> bool {
        let st = self.fields.entry(id).or_default();
        let previous = st.display().to_owned();
        let changed = st.session.set_generator(generator);
        st.caret = st.caret.min(char_count(st.display()));
        finish_programmatic(st, &previous);
        changed
    }

    /// Set the value programmatically. The caret moves to the end and the
    /// selection is cleared.
    ///
    /// Returns `true` if the logical value changed.
    pub fn set_value(&mut self, id: FieldId, value: &str) -> bool {
        let st = self.fields.entry(id).or_default();
        let previous = st.display().to_owned();
        let changed = st.session.set_value(value);
        st.caret = st.session.caret();
        finish_programmatic(st, &previous);
        changed
    }

    /// Drop every field and any queued changes.
    pub fn clear(&mut self) {
        self.fields.clear();
        self.changes.clear();
    }

    /// Drain the changes queued by user edits, oldest first.
    pub fn take_changes(&mut self) -> Vec<FieldChange> {
        std::mem::take(&mut self.changes)
    }

    // --- Read access ---

    pub fn display(&self, id: FieldId) -> Option<&str> {
        self.fields.get(&id).map(FieldState::display)
    }

    /// Logical value as reported to change listeners.
    pub fn value(&self, id: FieldId) -> Option<&str> {
        self.fields.get(&id).map(|s| s.session.value())
    }

    pub fn caret(&self, id: FieldId) -> Option<usize> {
        self.fields.get(&id).map(|s| s.caret)
    }

    pub fn selection(&self, id: FieldId) -> Option<SelectionRange> {
        let st = self.fields.get(&id)?;
        selection_range(st.display(), st.selection_anchor, st.caret)
    }

    /// Direction flag of the last no-op literal nudge.
    pub fn went_back(&self, id: FieldId) -> bool {
        self.fields.get(&id).is_some_and(|s| s.session.state().went_back)
    }

    /// Monotonic counter bumped whenever the display text changes.
    pub fn value_revision(&self, id: FieldId) -> u64 {
        self.fields.get(&id).map(|s| s.value_rev).unwrap_or(0)
    }

    pub fn session(&self, id: FieldId) -> Option<&MaskSession> {
        self.fields.get(&id).map(|s| &s.session)
    }

    // --- Editing ---

    /// Insert text at the caret as one widget edit. Newlines are stripped and
    /// a selection is replaced.
    ///
    /// Returns `None` when nothing was edited.
    pub fn insert_text(&mut self, id: FieldId, s: &str) -> Option<EditOutcome> {
        let st = self.fields.entry(id).or_default();
        clamp_state(st);
        let s = filter_single_line(s);

        let mut buffer = st.display().to_owned();
        let replaced = delete_selection_if_any(st, &mut buffer);
        if s.is_empty() && !replaced {
            return None;
        }

        insert_at(&mut buffer, st.caret, &s);
        st.caret += char_count(&s);
        Some(commit_edit(id, st, &mut self.changes, &buffer))
    }

    /// Delete the selection, or the character before the caret.
    pub fn backspace(&mut self, id: FieldId) -> Option<EditOutcome> {
        let st = self.fields.entry(id).or_default();
        clamp_state(st);

        let mut buffer = st.display().to_owned();
        if !delete_selection_if_any(st, &mut buffer) {
            if st.caret == 0 {
                return None;
            }
            remove_range(&mut buffer, st.caret - 1, st.caret);
            st.caret -= 1;
        }
        Some(commit_edit(id, st, &mut self.changes, &buffer))
    }

    /// Delete the selection, or the character after the caret.
    pub fn delete(&mut self, id: FieldId) -> Option<EditOutcome> {
        let st = self.fields.entry(id).or_default();
        clamp_state(st);

        let mut buffer = st.display().to_owned();
        if !delete_selection_if_any(st, &mut buffer) {
            if st.caret >= char_count(&buffer) {
                return None;
            }
            remove_range(&mut buffer, st.caret, st.caret + 1);
        }
        Some(commit_edit(id, st, &mut self.changes, &buffer))
    }

    // --- Caret & selection ---

    /// Set the caret to a character offset.
    ///
    /// If `selecting` is true, extends/modifies the selection.
    pub fn set_caret(&mut self, id: FieldId, caret: usize, selecting: bool) {
        let st = self.fields.entry(id).or_default();
        clamp_state(st);
        set_caret_in_state(st, caret, selecting);
    }

    pub fn move_caret_left(&mut self, id: FieldId, selecting: bool) {
        let st = self.fields.entry(id).or_default();
        clamp_state(st);

        if !selecting
            && let Some(sel) = selection_range(st.display(), st.selection_anchor, st.caret)
        {
            st.caret = sel.start;
            clear_selection(st);
            return;
        }
        let caret = st.caret.saturating_sub(1);
        set_caret_in_state(st, caret, selecting);
    }

    pub fn move_caret_right(&mut self, id: FieldId, selecting: bool) {
        let st = self.fields.entry(id).or_default();
        clamp_state(st);

        if !selecting
            && let Some(sel) = selection_range(st.display(), st.selection_anchor, st.caret)
        {
            st.caret = sel.end;
            clear_selection(st);
            return;
        }
        let caret = st.caret + 1;
        set_caret_in_state(st, caret, selecting);
    }

    /// Select `start..end`, leaving the caret at `end`.
    pub fn select(&mut self, id: FieldId, start: usize, end: usize) {
        let st = self.fields.entry(id).or_default();
        clamp_state(st);
        let len = char_count(st.display());
        st.selection_anchor = Some(start.min(len));
        st.caret = end.min(len);
        normalize_selection_anchor(st);
    }

    pub fn select_all(&mut self, id: FieldId) {
        let st = self.fields.entry(id).or_default();
        clamp_state(st);
        st.caret = char_count(st.display());
        st.selection_anchor = Some(0);
        normalize_selection_anchor(st);
    }
}

// --- Internal helper functions ---

fn commit_edit(
    id: FieldId,
    st: &mut FieldState,
    changes: &mut Vec<FieldChange>,
    edited: &str,
) -> EditOutcome {
    let FieldState {
        session,
        caret,
        selection_anchor,
        value_rev,
    } = st;
    let previous = session.display().to_owned();

    let mut adapter = FieldAdapter { id, caret, changes };
    let outcome = session.handle_change(&mut adapter, edited);

    *selection_anchor = None;
    if outcome.display != previous {
        *value_rev = value_rev.wrapping_add(1);
    }

    log::trace!(
        target: "masked_input",
        "field {} edit {edited:?} -> {:?}@{} ({:?})",
        id.as_raw(),
        outcome.display,
        outcome.caret,
        outcome.branch
    );
    outcome
}

fn finish_programmatic(st: &mut FieldState, previous: &str) {
    st.selection_anchor = None;
    if st.display() != previous {
        st.value_rev = st.value_rev.wrapping_add(1);
    }
}

fn selection_range(value: &str, anchor: Option<usize>, caret: usize) -> Option<SelectionRange> {
    let anchor = anchor?;
    let len = char_count(value);
    let a = anchor.min(len);
    let c = caret.min(len);
    if a == c {
        return None;
    }
    Some(SelectionRange::new(a, c))
}

fn set_caret_in_state(st: &mut FieldState, caret: usize, selecting: bool) {
    let caret = caret.min(char_count(st.display()));

    if selecting {
        if st.selection_anchor.is_none() {
            st.selection_anchor = Some(st.caret);
        }
        st.caret = caret;
        normalize_selection_anchor(st);
    } else {
        st.caret = caret;
        clear_selection(st);
    }
}

fn normalize_selection_anchor(st: &mut FieldState) {
    let Some(anchor) = st.selection_anchor else {
        return;
    };
    let anchor = anchor.min(char_count(st.display()));
    st.selection_anchor = Some(anchor);

    // Collapsed selection: drop the anchor.
    if anchor == st.caret {
        st.selection_anchor = None;
    }
}

/// Remove the selected range from `buffer` and collapse the caret to its
/// start. Returns `false` when there is no selection.
fn delete_selection_if_any(st: &mut FieldState, buffer: &mut String) -> bool {
    let Some(sel) = selection_range(buffer, st.selection_anchor, st.caret) else {
        st.selection_anchor = None;
        return false;
    };

    remove_range(buffer, sel.start, sel.end);
    st.caret = sel.start;
    st.selection_anchor = None;
    true
}

fn clamp_state(st: &mut FieldState) {
    let len = char_count(st.display());
    st.caret = st.caret.min(len);
    if let Some(a) = st.selection_anchor {
        st.selection_anchor = Some(a.min(len));
    }
}

fn clear_selection(st: &mut FieldState) {
    st.selection_anchor = None;
}
