//! Templates and the slot walk.
//!
//! A [`Template`] is a sequence of characters, each of which is either a
//! placeholder (has a rule in the active [`RuleSet`]) or a literal. All
//! positions are character offsets, never byte offsets.
//!
//! [`SlotWalk`] is the single primitive behind masking and the caret
//! accumulators: it pairs raw input characters with template slots and
//! reports what happened at each step.

use std::fmt;

use crate::rules::{Rule, RuleSet};

/// A template, stored as characters for O(1) slot lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Template {
    chars: Vec<char>,
}

/// Classification of one template position.
#[derive(Clone, Copy, Debug)]
pub enum Slot<'a> {
    Placeholder(&'a Rule),
    Literal(char),
}

impl Template {
    pub fn new(template: &str) -> Self {
        Self {
            chars: template.chars().collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    #[inline]
    pub fn char_at(&self, idx: usize) -> Option<char> {
        self.chars.get(idx).copied()
    }

    pub fn as_chars(&self) -> &[char] {
        &self.chars
    }

    /// Classify position `idx` under `rules`, or `None` past the end.
    pub fn slot<'r>(&self, idx: usize, rules: &'r RuleSet) -> Option<Slot<'r>> {
        let c = self.char_at(idx)?;
        Some(match rules.get(c) {
            Some(rule) => Slot::Placeholder(rule),
            None => Slot::Literal(c),
        })
    }

    /// Number of placeholder positions.
    pub fn placeholder_count(&self, rules: &RuleSet) -> usize {
        self.chars.iter().filter(|c| rules.is_placeholder(**c)).count()
    }

    /// Start a [`SlotWalk`] of `raw` over this template.
    pub fn walk<'a>(&'a self, raw: &'a [char], rules: &'a RuleSet) -> SlotWalk<'a> {
        SlotWalk {
            template: self,
            rules,
            raw,
            pos: 0,
            slot: 0,
        }
    }
}

impl From<&str> for Template {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Template {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chars.iter().try_for_each(|c| fmt::Write::write_char(f, *c))
    }
}

/// One step of a [`SlotWalk`].
///
/// `slot` is the template index the step happened at. `Exceeded` steps carry
/// indices past the template end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkEvent {
    /// Raw char accepted by the placeholder at `slot`.
    Accepted { slot: usize, ch: char },
    /// Raw char rejected by the placeholder at `slot` and dropped.
    Rejected { slot: usize, ch: char },
    /// Raw char equal to the literal at `slot`.
    LiteralMatched { slot: usize, ch: char },
    /// Literal at `slot` emitted ahead of a pending raw char.
    LiteralInserted { slot: usize, literal: char },
    /// Raw char left over after the template ran out.
    Exceeded { slot: usize, ch: char },
}

/// Iterator pairing raw characters with template slots.
///
/// The walk ends when the raw input is exhausted. Literal slots are only
/// visited while a raw character is pending, so trailing literals are never
/// reported.
///
/// ```
/// use mask_core::{RuleSet, Template, WalkEvent};
///
/// let rules = RuleSet::default_rules();
/// let template = Template::new("9-9");
/// let raw: Vec<char> = "12".chars().collect();
/// let events: Vec<_> = template.walk(&raw, &rules).collect();
/// assert_eq!(
///     events,
///     vec![
///         WalkEvent::Accepted { slot: 0, ch: '1' },
///         WalkEvent::LiteralInserted { slot: 1, literal: '-' },
///         WalkEvent::Accepted { slot: 2, ch: '2' },
///     ]
/// );
/// ```
#[derive(Clone, Debug)]
pub struct SlotWalk<'a> {
    template: &'a Template,
    rules: &'a RuleSet,
    raw: &'a [char],
    pos: usize,
    slot: usize,
}

impl SlotWalk<'_> {
    /// Template index of the next step.
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Raw index of the next pending character.
    pub fn raw_pos(&self) -> usize {
        self.pos
    }
}

impl Iterator for SlotWalk<'_> {
    type Item = WalkEvent;

    fn next(&mut self) -> Option<WalkEvent> {
        let ch = *self.raw.get(self.pos)?;
        let slot = self.slot;
        let Some(t) = self.template.char_at(slot) else {
            self.pos += 1;
            self.slot += 1;
            return Some(WalkEvent::Exceeded { slot, ch });
        };
        let event = match self.rules.get(t) {
            Some(rule) => {
                self.pos += 1;
                if rule.test(ch) {
                    self.slot += 1;
                    WalkEvent::Accepted { slot, ch }
                } else {
                    WalkEvent::Rejected { slot, ch }
                }
            }
            None if t == ch => {
                self.pos += 1;
                self.slot += 1;
                WalkEvent::LiteralMatched { slot, ch }
            }
            None => {
                self.slot += 1;
                WalkEvent::LiteralInserted { slot, literal: t }
            }
        };
        Some(event)
    }
}

/// Number of placeholder slots of `template` that `display` occupies.
///
/// Counts indices `i < min(len(template), len(display))` whose template char
/// is a placeholder.
pub fn filled_slots(template: &Template, display: &[char], rules: &RuleSet) -> usize {
    let end = template.len().min(display.len());
    template.as_chars()[..end]
        .iter()
        .filter(|c| rules.is_placeholder(**c))
        .count()
}

/// Number of literal slots before `end` that `display` occupies.
pub fn literals_before(
    template: &Template,
    display: &[char],
    rules: &RuleSet,
    end: usize,
) -> usize {
    let end = end.min(template.len()).min(display.len());
    template.as_chars()[..end]
        .iter()
        .filter(|c| !rules.is_placeholder(**c))
        .count()
}
