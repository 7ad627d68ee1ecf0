//! # mask_core
//!
//! Deterministic text masking with caret reconciliation.
//!
//! A mask turns free-form input such as `1234567891` into a formatted display
//! string such as `(12) 3456-7891`, and recovers the raw value back from it.
//! The hard part is the caret: after every edit the widget's caret refers to
//! the text before masking, and this crate computes where it belongs in the
//! masked text.
//!
//! - [`RuleSet`] / [`Rule`]: which input characters a placeholder accepts
//! - [`Template`] / [`SlotWalk`]: template positions and the walk pairing raw
//!   characters with them
//! - [`MaskGenerator`]: rules, template function, transform and `keep_mask`,
//!   with fixed, dynamic-number and currency constructors
//! - [`mask`] / [`unmask`]: the masking engine
//! - [`reconcile_caret`]: caret reconciliation
//! - [`MaskSession`]: per-field state tying it together, driven directly or
//!   through a [`CaretAdapter`]
//!
//! ## Design Principles
//!
//! This crate is UI-agnostic and performs no I/O. It depends only on `std` and
//! the `log` facade. All offsets are character offsets.

mod adapter;
mod caret;
mod currency;
mod engine;
mod generator;
mod rules;
mod session;
mod template;

pub use adapter::CaretAdapter;
pub use caret::{
    CaretBranch, CaretInput, CaretOutcome, IgnoreWindow, accepted_chars, exceeded_chars,
    growth_ignored, literal_run_offset, positional_offset, reconcile_caret, rejected_before,
    static_added, walked_static_offset,
};
pub use currency::CurrencyOptions;
pub use engine::{
    AnomalyCode, MaskAnomaly, Masked, mask, mask_value, process_value, strip_literals, unmask,
};
pub use generator::MaskGenerator;
pub use rules::{Rule, RuleSet};
pub use session::{EditOutcome, MaskSession, SessionState, SessionStats};
pub use template::{Slot, SlotWalk, Template, WalkEvent, filled_slots, literals_before};
