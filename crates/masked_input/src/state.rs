//! Per-field state held by the store.

use mask_core::MaskSession;

/// Field state managed by [`MaskedInputStore`](crate::MaskedInputStore).
///
/// The display text lives in the session. `caret` is the widget caret, which
/// moves freely between edits and is handed to the session on each edit.
#[derive(Clone, Debug, Default)]
pub(crate) struct FieldState {
    pub session: MaskSession,

    /// Character offset into the display text.
    pub caret: usize,

    /// When `Some(anchor)`, the selection is `min(anchor, caret)..max(anchor, caret)`.
    pub selection_anchor: Option<usize>,

    /// Bumped whenever the display text changes.
    pub value_rev: u64,
}

impl FieldState {
    pub fn new(session: MaskSession) -> Self {
        let caret = session.caret();
        Self {
            session,
            caret,
            selection_anchor: None,
            value_rev: 0,
        }
    }

    #[inline]
    pub fn display(&self) -> &str {
        self.session.display()
    }
}
