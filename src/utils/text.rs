//! Plain-text helpers: char-boundary truncation, whitespace, excerpts.

/// Ellipsis appended to cut excerpts
const ELLIPSIS: char = '…';

/// Truncate a string to fit within `max_len` bytes.
///
/// Ensures the result is valid UTF-8 by backing off to the nearest character boundary.
#[inline]
pub fn truncate_bytes(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Truncate a string to at most `max_chars` characters.
#[inline]
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Collapse every whitespace run to a single space and trim both ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut plain text to `max_chars`, appending `…` when anything was dropped.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let text = collapse_whitespace(text);
    let cut = truncate_chars(&text, max_chars);
    if cut.len() == text.len() {
        text
    } else {
        format!("{}{ELLIPSIS}", cut.trim_end())
    }
}

/// Number of whitespace-separated words.
#[inline]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
