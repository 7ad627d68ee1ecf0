//! Caret reconciliation.
//!
//! After an edit is masked the widget's caret offset refers to the pre-mask
//! text. [`reconcile_caret`] maps it onto the masked display so the caret
//! stays after the character the user just typed (or where they just deleted)
//! even when literals were inserted, characters were rejected, the input
//! overflowed the template or the template itself changed shape.
//!
//! Three branches, chosen by comparing filled placeholder slots before and
//! after the edit:
//! - no-op: nothing visible changed; nudge the caret across literals so
//!   repeated deletes over a literal make progress.
//! - growth: same or more filled slots; count literals inserted before the
//!   caret and subtract characters that were dropped.
//! - shrink: fewer filled slots; undo positional drift and re-add slots the
//!   template still reserves.
//!
//! Each accumulator is a small pure function so it can be tested on its own.

use crate::engine::char_len;
use crate::generator::MaskGenerator;
use crate::rules::RuleSet;
use crate::template::{Template, WalkEvent, filled_slots, literals_before};

/// Inputs of one reconciliation.
#[derive(Clone, Copy, Debug)]
pub struct CaretInput<'a> {
    /// Display value after masking.
    pub display: &'a str,
    /// Display value at the previous reconciliation.
    pub old_display: &'a str,
    /// Edited text before masking.
    pub raw_before_mask: &'a str,
    /// Generator that produced `display`.
    pub generator: Option<&'a MaskGenerator>,
    /// Generator that produced `old_display`.
    pub old_generator: Option<&'a MaskGenerator>,
    /// Caret in `raw_before_mask`, shifted by the transform offset.
    pub last_caret: usize,
    pub last_went_back: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CaretBranch {
    /// Display unchanged and caret nudged across literals.
    Nudge,
    /// Display unchanged, rejected characters backed out.
    Rejected,
    /// Display unchanged, same length.
    Unchanged,
    Growth,
    Shrink,
    /// No generator in force: the caret is only clamped.
    Unmasked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaretOutcome {
    pub caret: usize,
    pub went_back: bool,
    pub branch: CaretBranch,
}

/// Which slots count as "ignored" in the growth branch: strictly after
/// `after` and strictly before `before`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IgnoreWindow {
    pub after: isize,
    pub before: usize,
}

impl IgnoreWindow {
    #[inline]
    pub fn contains(&self, slot: usize) -> bool {
        (slot as isize) > self.after && slot < self.before
    }
}

/// Compute the caret offset in `input.display`.
///
/// The result is always within `0..=len(display)`.
///
/// ```
/// use mask_core::{CaretInput, MaskGenerator, mask, reconcile_caret};
///
/// let phone = MaskGenerator::fixed("(99) 9999-9999");
/// // "1" typed at offset 0 of "2": masked to "(12", caret after the "1".
/// let display = mask("12", &phone).value;
/// let out = reconcile_caret(&CaretInput {
///     display: &display,
///     old_display: "(2",
///     raw_before_mask: "1(2",
///     generator: Some(&phone),
///     old_generator: Some(&phone),
///     last_caret: 1,
///     last_went_back: false,
/// });
/// assert_eq!(display, "(12");
/// assert_eq!(out.caret, 2);
/// ```
pub fn reconcile_caret(input: &CaretInput<'_>) -> CaretOutcome {
    if input.generator.is_none() {
        return CaretOutcome {
            caret: input.last_caret.min(char_len(input.display)),
            went_back: input.last_went_back,
            branch: CaretBranch::Unmasked,
        };
    }

    let empty = RuleSet::new();
    let (new_template, new_rules) = template_and_rules(input.generator, input.display, &empty);
    let (old_template, old_rules) =
        template_and_rules(input.old_generator, input.old_display, &empty);

    let display: Vec<char> = input.display.chars().collect();
    let old_display: Vec<char> = input.old_display.chars().collect();
    let raw: Vec<char> = input.raw_before_mask.chars().collect();

    let old_filled = filled_slots(&old_template, &old_display, old_rules);
    let new_filled = filled_slots(&new_template, &display, new_rules);

    let outcome = if old_filled == new_filled && input.display == input.old_display {
        reconcile_unchanged(input, &new_template, new_rules, &raw, display.len())
    } else if old_filled <= new_filled {
        let dynamic_offset = new_filled - old_filled;
        let caret_before_dynamic = clamp(
            input.last_caret as isize - dynamic_offset as isize,
            old_display.len(),
        );
        let old_literals =
            literals_before(&old_template, &old_display, old_rules, caret_before_dynamic);
        let new_literals =
            literals_before(&new_template, &display, new_rules, caret_before_dynamic);
        let initial_static = new_literals as isize - old_literals as isize;
        let exceeded_offset = raw.len().saturating_sub(display.len()) as isize;
        let window = IgnoreWindow {
            after: caret_before_dynamic as isize + initial_static - exceeded_offset,
            before: input.last_caret,
        };

        let ignored = growth_ignored(&raw, &new_template, new_rules, window);
        let exceeded = exceeded_chars(&raw, &new_template, new_rules);
        let added = static_added(&raw, &new_template, new_rules, window);
        let walked = walked_static_offset(
            &new_template,
            new_rules,
            caret_before_dynamic,
            initial_static,
            exceeded,
            dynamic_offset,
        );
        let static_offset = added.max(walked).max(0);
        let position = (input.last_caret as isize + static_offset - ignored as isize)
            .min(new_template.len() as isize);

        #[cfg(any(test, feature = "debug-stats"))]
        log::trace!(
            target: "mask.caret",
            "growth: dynamic={dynamic_offset} before_dynamic={caret_before_dynamic} \
             window={window:?} ignored={ignored} exceeded={exceeded} added={added} \
             walked={walked} position={position}"
        );

        CaretOutcome {
            caret: clamp(position, display.len()),
            went_back: input.last_went_back,
            branch: CaretBranch::Growth,
        }
    } else {
        let take = input.last_caret.min(raw.len());
        let offset = positional_offset(&raw[..take], &new_template, new_rules);
        let accepted = accepted_chars(&raw, &new_template, new_rules);
        let reserved = new_filled.saturating_sub(accepted) as isize;
        let position = input.last_caret as isize + offset + reserved;

        #[cfg(any(test, feature = "debug-stats"))]
        log::trace!(
            target: "mask.caret",
            "shrink: offset={offset} accepted={accepted} reserved={reserved} position={position}"
        );

        CaretOutcome {
            caret: clamp(position, display.len()),
            went_back: input.last_went_back,
            branch: CaretBranch::Shrink,
        }
    };

    #[cfg(any(test, feature = "debug-stats"))]
    log::trace!(
        target: "mask.caret",
        "{:?} {:?} -> {:?} filled {old_filled}->{new_filled} caret {} -> {}",
        outcome.branch,
        input.old_display,
        input.display,
        input.last_caret,
        outcome.caret
    );

    outcome
}

fn template_and_rules<'a>(
    generator: Option<&'a MaskGenerator>,
    display: &str,
    empty: &'a RuleSet,
) -> (Template, &'a RuleSet) {
    match generator {
        Some(g) => (g.template_for(display), g.rules()),
        None => (Template::default(), empty),
    }
}

fn reconcile_unchanged(
    input: &CaretInput<'_>,
    template: &Template,
    rules: &RuleSet,
    raw: &[char],
    display_len: usize,
) -> CaretOutcome {
    let caret = input.last_caret;
    if display_len > raw.len() {
        let went_back = !input.last_went_back;
        let position = (caret + display_len - raw.len()) as isize;
        let nudge = literal_run_offset(template, rules, position, went_back);
        #[cfg(any(test, feature = "debug-stats"))]
        log::trace!(
            target: "mask.caret",
            "nudge: went_back={went_back} base={position} nudge={nudge}"
        );
        CaretOutcome {
            caret: clamp(position + nudge, display_len),
            went_back,
            branch: CaretBranch::Nudge,
        }
    } else if display_len < raw.len() {
        let ignored = rejected_before(raw, template, rules, caret);
        CaretOutcome {
            caret: clamp(caret as isize - ignored as isize, display_len),
            went_back: input.last_went_back,
            branch: CaretBranch::Rejected,
        }
    } else {
        CaretOutcome {
            caret: caret.min(display_len),
            went_back: input.last_went_back,
            branch: CaretBranch::Unchanged,
        }
    }
}

#[inline]
fn clamp(position: isize, len: usize) -> usize {
    position.clamp(0, len as isize) as usize
}

/// Steps needed to carry `position` across a run of literals.
///
/// Moving right, examines the slot at the position; moving left (`went_back`)
/// examines the slot before it. Stops at the first placeholder or the template
/// edge.
pub fn literal_run_offset(
    template: &Template,
    rules: &RuleSet,
    position: isize,
    went_back: bool,
) -> isize {
    let (lookbehind, step) = if went_back { (1, -1) } else { (0, 1) };
    let mut offset = 0;
    loop {
        let idx = position + offset - lookbehind;
        if idx < 0 {
            break;
        }
        match template.char_at(idx as usize) {
            Some(c) if !rules.is_placeholder(c) => offset += step,
            _ => break,
        }
    }
    offset
}

/// Characters rejected by a placeholder at a slot before `caret`, walking
/// `raw[..min(len(raw), len(template), caret)]`.
pub fn rejected_before(raw: &[char], template: &Template, rules: &RuleSet, caret: usize) -> usize {
    let take = raw.len().min(template.len()).min(caret);
    template
        .walk(&raw[..take], rules)
        .filter(|e| matches!(e, WalkEvent::Rejected { slot, .. } if *slot < caret))
        .count()
}

/// Dropped characters whose slot lies in `window`: placeholder rejections and
/// literal matches.
pub fn growth_ignored(
    raw: &[char],
    template: &Template,
    rules: &RuleSet,
    window: IgnoreWindow,
) -> usize {
    template
        .walk(raw, rules)
        .filter(|e| match *e {
            WalkEvent::Rejected { slot, .. } | WalkEvent::LiteralMatched { slot, .. } => {
                window.contains(slot)
            }
            _ => false,
        })
        .count()
}

/// Raw characters left over once the template ran out.
pub fn exceeded_chars(raw: &[char], template: &Template, rules: &RuleSet) -> usize {
    template
        .walk(raw, rules)
        .filter(|e| matches!(e, WalkEvent::Exceeded { .. }))
        .count()
}

/// Net literals inserted before the caret.
///
/// Each insertion before `window.before` adds one; each rejection before it
/// subtracts one as long as nothing has been counted as ignored yet.
pub fn static_added(
    raw: &[char],
    template: &Template,
    rules: &RuleSet,
    window: IgnoreWindow,
) -> isize {
    let mut ignored = 0usize;
    let mut added = 0isize;
    for event in template.walk(raw, rules) {
        match event {
            WalkEvent::Rejected { slot, .. } => {
                if window.contains(slot) {
                    ignored += 1;
                }
                if ignored == 0 && slot < window.before {
                    added -= 1;
                }
            }
            WalkEvent::LiteralMatched { slot, .. } => {
                if window.contains(slot) {
                    ignored += 1;
                }
            }
            WalkEvent::LiteralInserted { slot, .. } => {
                if slot < window.before {
                    added += 1;
                }
            }
            WalkEvent::Accepted { .. } | WalkEvent::Exceeded { .. } => {}
        }
    }
    added
}

/// Literals crossed while advancing from `caret_before_dynamic` until
/// `dynamic_offset` placeholder positions have been passed.
pub fn walked_static_offset(
    template: &Template,
    rules: &RuleSet,
    caret_before_dynamic: usize,
    initial: isize,
    exceeded: usize,
    dynamic_offset: usize,
) -> isize {
    let target = (caret_before_dynamic + dynamic_offset) as isize;
    let exceeded = exceeded as isize;
    let mut current = caret_before_dynamic as isize;
    let mut offset = initial;
    while current - offset - exceeded < target {
        let idx = current - exceeded;
        if idx >= 0 {
            let Some(c) = template.char_at(idx as usize) else {
                break;
            };
            if !rules.is_placeholder(c) {
                offset += 1;
            }
        }
        current += 1;
    }
    offset
}

/// Positional drift of `prefix` against the template: −1 for each character
/// its own slot's placeholder rejects, +1 for each character that differs
/// from the literal (or missing slot) at its index.
pub fn positional_offset(prefix: &[char], template: &Template, rules: &RuleSet) -> isize {
    prefix
        .iter()
        .enumerate()
        .map(|(idx, &c)| match template.char_at(idx) {
            Some(t) => match rules.get(t) {
                Some(rule) if rule.test(c) => 0,
                Some(_) => -1,
                None if t == c => 0,
                None => 1,
            },
            None => 1,
        })
        .sum()
}

/// Placeholder acceptances in a walk where a rejected character also gives
/// back the literal slots skipped on its behalf.
pub fn accepted_chars(raw: &[char], template: &Template, rules: &RuleSet) -> usize {
    let mut accepted = 0;
    let mut slot = 0;
    for &c in raw {
        let mut idx = slot;
        while let Some(t) = template.char_at(idx) {
            match rules.get(t) {
                Some(rule) => {
                    if rule.test(c) {
                        accepted += 1;
                        slot = idx + 1;
                    }
                    break;
                }
                None if t == c => {
                    slot = idx + 1;
                    break;
                }
                None => idx += 1,
            }
        }
    }
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::mask_value;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn phone() -> MaskGenerator {
        MaskGenerator::fixed("(99) 9999-9999")
    }

    fn run(
        g: &MaskGenerator,
        old_display: &str,
        raw: &str,
        caret: usize,
        went_back: bool,
    ) -> (String, CaretOutcome) {
        let display = mask_value(raw, g);
        let out = reconcile_caret(&CaretInput {
            display: &display,
            old_display,
            raw_before_mask: raw,
            generator: Some(g),
            old_generator: Some(g),
            last_caret: caret,
            last_went_back: went_back,
        });
        (display, out)
    }

    #[test]
    fn typing_from_empty_skips_leading_literal() {
        let g = phone();
        let (display, out) = run(&g, "", "1", 1, false);
        assert_eq!(display, "(1");
        assert_eq!(out.caret, 2);
        assert_eq!(out.branch, CaretBranch::Growth);
        let (display, out) = run(&g, "(1", "(12", 3, false);
        assert_eq!(display, "(12");
        assert_eq!(out.caret, 3);
        let (display, out) = run(&g, "(12", "(123", 4, false);
        assert_eq!(display, "(12) 3");
        assert_eq!(out.caret, 6);
    }

    #[test]
    fn typing_mid_value_with_overflow() {
        let (display, out) = run(&phone(), "(12) 3456-7891", "(12) 34561-7891", 10, false);
        assert_eq!(display, "(12) 3456-1789");
        assert_eq!(out.caret, 11);
    }

    #[test]
    fn paste_with_rejected_and_overflowing_chars() {
        let (display, out) = run(&phone(), "(12) 3456-7891", "(12) 3456-1+2-37891", 15, false);
        assert_eq!(display, "(12) 3456-1237");
        assert_eq!(out.caret, 13);
    }

    #[test]
    fn rejected_keystroke_keeps_caret() {
        let (display, out) = run(&phone(), "(12", "(1x2", 3, false);
        assert_eq!(display, "(12");
        assert_eq!(out.branch, CaretBranch::Rejected);
        assert_eq!(out.caret, 2);
    }

    #[test]
    fn deleting_a_literal_alternates_direction() {
        let g = phone();
        // Delete the ")" at offset 3: the literal comes back.
        let (display, out) = run(&g, "(12) 3456-7891", "(12 3456-7891", 3, false);
        assert_eq!(display, "(12) 3456-7891");
        assert_eq!(out.branch, CaretBranch::Nudge);
        assert!(out.went_back);
        assert_eq!(out.caret, 3);

        let (_, out) = run(&g, "(12) 3456-7891", "(12 3456-7891", 3, out.went_back);
        assert!(!out.went_back);
        assert_eq!(out.caret, 5);
    }

    #[test]
    fn backspace_over_literal_moves_left() {
        // Backspace at offset 5 removes the space.
        let (_, out) = run(&phone(), "(12) 3456-7891", "(12)3456-7891", 4, false);
        assert_eq!(out.branch, CaretBranch::Nudge);
        assert!(out.went_back);
        assert_eq!(out.caret, 3);
    }

    #[test]
    fn shrinking_selection_delete() {
        let g = phone();
        let (display, out) = run(&g, "(12) 345", "(15", 2, false);
        assert_eq!(display, "(15");
        assert_eq!(out.branch, CaretBranch::Shrink);
        assert_eq!(out.caret, 2);

        let (display, out) = run(&g, "(12) 345", "9", 1, false);
        assert_eq!(display, "(9");
        assert_eq!(out.caret, 2);
    }

    #[test]
    fn no_generator_is_verbatim_and_clamped() {
        let out = reconcile_caret(&CaretInput {
            display: "abc",
            old_display: "ab",
            raw_before_mask: "abc",
            generator: None,
            old_generator: None,
            last_caret: 9,
            last_went_back: false,
        });
        assert_eq!(out.caret, 3);
        assert_eq!(out.branch, CaretBranch::Unmasked);

        let out = reconcile_caret(&CaretInput {
            display: "abc",
            old_display: "ab",
            raw_before_mask: "abc",
            generator: None,
            old_generator: None,
            last_caret: 2,
            last_went_back: true,
        });
        assert_eq!(out.caret, 2);
        assert!(out.went_back);
    }

    #[test]
    fn literal_run_offset_both_directions() {
        let rules = RuleSet::default_rules();
        let t = Template::new("(99) 9999");
        assert_eq!(literal_run_offset(&t, &rules, 3, false), 2);
        assert_eq!(literal_run_offset(&t, &rules, 5, true), -2);
        assert_eq!(literal_run_offset(&t, &rules, 2, false), 0);
        assert_eq!(literal_run_offset(&t, &rules, 0, true), 0);
        assert_eq!(literal_run_offset(&t, &rules, 1, true), -1);
    }

    #[test]
    fn positional_and_accepted_counts() {
        let rules = RuleSet::default_rules();
        let t = Template::new("(99) 9999");
        assert_eq!(positional_offset(&chars("(12) 3"), &t, &rules), 0);
        assert_eq!(positional_offset(&chars("9"), &t, &rules), 1);
        assert_eq!(positional_offset(&chars("(1x"), &t, &rules), -1);
        assert_eq!(positional_offset(&chars("(12) 34567"), &t, &rules), 1);
        assert_eq!(accepted_chars(&chars("(12) 34"), &t, &rules), 4);
        assert_eq!(accepted_chars(&chars("1x2"), &t, &rules), 2);
        assert_eq!(accepted_chars(&chars("(12) 3456789"), &t, &rules), 6);
    }

    #[test]
    fn growth_accumulators() {
        let rules = RuleSet::default_rules();
        let t = Template::new("(99) 9999-9999");
        let raw = chars("(12) 3456-1+2-37891");
        let window = IgnoreWindow { after: 9, before: 15 };
        assert_eq!(growth_ignored(&raw, &t, &rules, window), 2);
        assert_eq!(exceeded_chars(&raw, &t, &rules), 3);
        assert_eq!(static_added(&raw, &t, &rules, window), 0);
        assert_eq!(walked_static_offset(&t, &rules, 14, 0, 3, 0), 0);

        let raw = chars("(12) 34561-7891");
        let window = IgnoreWindow { after: 9, before: 10 };
        assert_eq!(static_added(&raw, &t, &rules, window), 1);
        assert_eq!(walked_static_offset(&t, &rules, 10, 0, 1, 0), 1);
        assert_eq!(rejected_before(&chars("(1x2"), &t, &rules, 3), 1);
    }
}
