//! Character/byte offset utilities.
//!
//! Carets and selections in this crate are character offsets, as in
//! `mask_core`. Widgets that index UTF-8 bytes convert at the boundary with
//! [`char_to_byte_offset`] and [`byte_to_char_offset`].

use std::borrow::Cow;

#[inline]
pub fn char_count(s: &str) -> usize {
    s.chars().count()
}

/// Byte index of the character at `offset`, or `s.len()` past the end.
///
/// ```
/// use masked_input::char_to_byte_offset;
///
/// assert_eq!(char_to_byte_offset("a€b", 0), 0);
/// assert_eq!(char_to_byte_offset("a€b", 2), 4);
/// assert_eq!(char_to_byte_offset("a€b", 9), 5);
/// ```
pub fn char_to_byte_offset(s: &str, offset: usize) -> usize {
    s.char_indices().nth(offset).map_or(s.len(), |(idx, _)| idx)
}

/// Character offset of byte index `byte`, snapping back to a char boundary.
///
/// ```
/// use masked_input::byte_to_char_offset;
///
/// assert_eq!(byte_to_char_offset("a€b", 1), 1);
/// assert_eq!(byte_to_char_offset("a€b", 3), 1); // mid '€'
/// assert_eq!(byte_to_char_offset("a€b", 4), 2);
/// assert_eq!(byte_to_char_offset("a€b", 99), 3);
/// ```
pub fn byte_to_char_offset(s: &str, byte: usize) -> usize {
    let byte = clamp_to_char_boundary(s, byte);
    s[..byte].chars().count()
}

/// Clamp a byte index to a UTF-8 character boundary, moving backwards.
///
/// ```
/// use masked_input::clamp_to_char_boundary;
///
/// let s = "a€b";
/// assert_eq!(clamp_to_char_boundary(s, 2), 1);
/// assert_eq!(clamp_to_char_boundary(s, 4), 4);
/// assert_eq!(clamp_to_char_boundary(s, 100), 5);
/// ```
#[inline]
pub fn clamp_to_char_boundary(s: &str, index: usize) -> usize {
    let mut index = index.min(s.len());
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Strip CR and LF for single-line fields.
///
/// ```
/// use masked_input::filter_single_line;
///
/// assert_eq!(filter_single_line("1234"), "1234");
/// assert_eq!(filter_single_line("12\r\n34"), "1234");
/// ```
pub fn filter_single_line(s: &str) -> Cow<'_, str> {
    if !s.contains('\n') && !s.contains('\r') {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.chars().filter(|c| *c != '\n' && *c != '\r').collect())
}

/// Insert `text` at character offset `at` (clamped to the end).
pub(crate) fn insert_at(buf: &mut String, at: usize, text: &str) {
    let byte = char_to_byte_offset(buf, at);
    buf.insert_str(byte, text);
}

/// Remove characters `start..end` (clamped).
pub(crate) fn remove_range(buf: &mut String, start: usize, end: usize) {
    let start = char_to_byte_offset(buf, start);
    let end = char_to_byte_offset(buf, end);
    if start < end {
        buf.drain(start..end);
    }
}
