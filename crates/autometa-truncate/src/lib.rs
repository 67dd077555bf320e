//! Word-boundary truncation for autometa descriptions.
//!
//! Lengths are counted in characters, never bytes, so multi-byte text is
//! never split inside a code point.

/// Appended whenever text is cut.
pub const ELLIPSIS: &str = "...";

/// Characters stripped from the end of cut text before the ellipsis.
pub const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?'];

/// Truncate `text` to at most `max_length` characters, preferring a word
/// boundary.
///
/// Text that already fits is returned unchanged. Otherwise the text is cut at
/// `max_length` characters; if the last space in the cut lies past 80% of
/// `max_length` the cut moves back to it, else the hard cut stands. Trailing
/// punctuation is stripped and [`ELLIPSIS`] is always appended, so a cut
/// result is up to three characters longer than `max_length`.
pub fn truncate_at_word_boundary(text: &str, max_length: usize) -> String {
    if char_len(text) <= max_length {
        return text.to_string();
    }

    let mut truncated = take_chars(text, max_length);

    if let Some(byte_idx) = truncated.rfind(' ')
        && past_threshold(char_len(&truncated[..byte_idx]), max_length)
    {
        truncated = &truncated[..byte_idx];
    }

    let mut result = truncated.trim_end_matches(TRAILING_PUNCTUATION).to_string();
    result.push_str(ELLIPSIS);
    result
}

/// Number of characters in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// The first `n` characters of `text`.
fn take_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// `position > 0.8 * max_length`, without floating point.
fn past_threshold(position: usize, max_length: usize) -> bool {
    position * 5 > max_length * 4
}
