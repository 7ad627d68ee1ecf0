//! Text selection in character offsets.

use crate::text::char_to_byte_offset;

/// Selected character range, normalized so `start <= end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionRange {
    pub start: usize,
    pub end: usize,
}

impl SelectionRange {
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Length in characters.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Selected substring of `value`. Offsets past the end are clamped.
    pub fn slice<'a>(&self, value: &'a str) -> &'a str {
        let start = char_to_byte_offset(value, self.start);
        let end = char_to_byte_offset(value, self.end);
        &value[start..end]
    }
}
