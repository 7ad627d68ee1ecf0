//! Per-field edit session.
//!
//! [`MaskSession`] threads one widget edit through masking, unmasking and caret
//! reconciliation. All state lives in [`SessionState`], which the caller owns;
//! nothing is global, so independent fields never share state.

use crate::adapter::CaretAdapter;
use crate::caret::{CaretBranch, CaretInput, reconcile_caret};
use crate::engine::{MaskAnomaly, char_len, mask, process_value};
use crate::generator::MaskGenerator;

/// Counters kept per session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub edits: u64,
    /// No-op edits where the caret was carried across literals.
    pub noop_nudges: u64,
    pub unstable_masks: u64,
}

#[derive(Clone, Debug, Default)]
pub struct SessionState {
    /// Logical value: unmasked, or the display if the mask is kept.
    pub raw_value: String,
    pub display_value: String,
    pub caret: usize,
    pub went_back: bool,
    /// Text of the last edit before masking.
    pub value_before_mask: String,
    /// Display value as of the last caret reconciliation.
    pub caret_display: String,
    /// Generator in force at the last caret reconciliation.
    pub caret_generator: Option<MaskGenerator>,
    /// Generator that produced `display_value`.
    pub display_generator: Option<MaskGenerator>,
    pub stats: SessionStats,
}

/// What one edit produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditOutcome {
    pub display: String,
    pub value: String,
    pub caret: usize,
    pub went_back: bool,
    pub branch: CaretBranch,
    pub value_changed: bool,
    pub anomaly: Option<MaskAnomaly>,
}

#[derive(Clone, Debug, Default)]
pub struct MaskSession {
    generator: Option<MaskGenerator>,
    state: SessionState,
}

struct Rendered {
    display: String,
    value: String,
    generator: Option<MaskGenerator>,
    transform_offset: isize,
    anomaly: Option<MaskAnomaly>,
}

impl MaskSession {
    pub fn new(generator: Option<MaskGenerator>) -> Self {
        let state = SessionState {
            caret_generator: generator.clone(),
            display_generator: generator.clone(),
            ..SessionState::default()
        };
        Self { generator, state }
    }

    /// Session seeded with a programmatic value.
    pub fn with_value(generator: Option<MaskGenerator>, value: &str) -> Self {
        let mut session = Self::new(generator);
        session.set_value(value);
        session
    }

    /// Resume from previously saved state.
    pub fn from_state(generator: Option<MaskGenerator>, state: SessionState) -> Self {
        Self { generator, state }
    }

    pub fn generator(&self) -> Option<&MaskGenerator> {
        self.generator.as_ref()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn into_state(self) -> SessionState {
        self.state
    }

    pub fn display(&self) -> &str {
        &self.state.display_value
    }

    pub fn value(&self) -> &str {
        &self.state.raw_value
    }

    pub fn caret(&self) -> usize {
        self.state.caret
    }

    pub fn stats(&self) -> SessionStats {
        self.state.stats
    }

    fn render(&mut self, text: &str) -> Rendered {
        if text.trim().is_empty() {
            return Rendered {
                display: String::new(),
                value: String::new(),
                generator: None,
                transform_offset: 0,
                anomaly: None,
            };
        }
        let Some(generator) = &self.generator else {
            return Rendered {
                display: text.to_owned(),
                value: text.to_owned(),
                generator: None,
                transform_offset: 0,
                anomaly: None,
            };
        };
        let masked = mask(text, generator);
        if masked.anomaly.is_some() {
            self.state.stats.unstable_masks += 1;
        }
        let value = process_value(&masked.value, Some(generator));
        Rendered {
            display: masked.value,
            value,
            generator: Some(generator.clone()),
            transform_offset: masked.transform_offset,
            anomaly: masked.anomaly,
        }
    }

    /// Apply a widget edit.
    ///
    /// `edited` is the widget text after the edit and `caret_after_edit` the
    /// widget's caret in it, both before masking.
    ///
    /// ```
    /// use mask_core::{MaskGenerator, MaskSession};
    ///
    /// let mut session = MaskSession::new(Some(MaskGenerator::fixed("(99) 9999-9999")));
    /// let out = session.apply_edit("1", 1);
    /// assert_eq!(out.display, "(1");
    /// assert_eq!(out.value, "1");
    /// assert_eq!(out.caret, 2);
    /// ```
    pub fn apply_edit(&mut self, edited: &str, caret_after_edit: usize) -> EditOutcome {
        self.state.stats.edits += 1;
        let caret_after_edit = caret_after_edit.min(char_len(edited));
        self.state.value_before_mask = edited.to_owned();

        let rendered = self.render(edited);
        let caret = shift(caret_after_edit, rendered.transform_offset);

        let outcome = reconcile_caret(&CaretInput {
            display: &rendered.display,
            old_display: &self.state.caret_display,
            raw_before_mask: edited,
            generator: rendered.generator.as_ref(),
            old_generator: self.state.caret_generator.as_ref(),
            last_caret: caret,
            last_went_back: self.state.went_back,
        });
        if outcome.branch == CaretBranch::Nudge {
            self.state.stats.noop_nudges += 1;
        }

        log::trace!(
            target: "mask.session",
            "edit {edited:?}@{caret_after_edit} -> {:?}@{} ({:?})",
            rendered.display,
            outcome.caret,
            outcome.branch
        );

        let value_changed = rendered.value != self.state.raw_value;
        let state = &mut self.state;
        state.raw_value = rendered.value;
        state.display_value = rendered.display;
        state.display_generator = rendered.generator;
        state.caret = outcome.caret;
        state.went_back = outcome.went_back;
        state.caret_display = state.display_value.clone();
        state.caret_generator = state.display_generator.clone();

        EditOutcome {
            display: state.display_value.clone(),
            value: state.raw_value.clone(),
            caret: outcome.caret,
            went_back: outcome.went_back,
            branch: outcome.branch,
            value_changed,
            anomaly: rendered.anomaly,
        }
    }

    /// Read the caret from `adapter`, apply the edit, push the reconciled
    /// caret back and report a changed value.
    pub fn handle_change<A>(&mut self, adapter: &mut A, edited: &str) -> EditOutcome
    where
        A: CaretAdapter + ?Sized,
    {
        let outcome = self.apply_edit(edited, adapter.caret_offset());
        adapter.set_caret_offset(outcome.caret);
        if outcome.value_changed {
            adapter.on_change(&outcome.value);
        }
        outcome
    }

    /// Set the value programmatically. The caret moves to the end; no
    /// reconciliation runs.
    ///
    /// Returns `true` if the logical value changed.
    pub fn set_value(&mut self, value: &str) -> bool {
        let rendered = self.render(value);
        self.commit_rendered(rendered, usize::MAX)
    }

    /// Swap the generator and re-mask the current value. The caret keeps its
    /// offset, clamped to the new display.
    pub fn set_generator(&mut self, generator: Option<MaskGenerator>) -> bool {
        self.generator = generator;
        let current = self.state.raw_value.clone();
        let caret = self.state.caret;
        let rendered = self.render(&current);
        self.commit_rendered(rendered, caret)
    }

    fn commit_rendered(&mut self, rendered: Rendered, caret: usize) -> bool {
        let state = &mut self.state;
        let value_changed = rendered.value != state.raw_value;
        state.caret = caret.min(char_len(&rendered.display));
        state.value_before_mask = rendered.display.clone();
        state.caret_display = rendered.display.clone();
        state.display_value = rendered.display;
        state.raw_value = rendered.value;
        state.caret_generator = rendered.generator.clone();
        state.display_generator = rendered.generator;
        value_changed
    }
}

#[inline]
fn shift(caret: usize, offset: isize) -> usize {
    caret.saturating_add_signed(offset)
}
