//! Plain-text extraction from HTML article bodies.
//!
//! [`extract_text`] is the first stage of description generation: entities
//! are decoded first, markup is stripped from the decoded text, and
//! whitespace runs are collapsed to a single space.

/// Extract clean, single-spaced text from an HTML fragment.
///
/// Entities are decoded before tags are stripped, so encoded markup such as
/// `&lt;b&gt;` is removed along with literal tags.
pub fn extract_text(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let decoded = decode_entities(html);
    let stripped = strip_tags(&decoded);
    collapse_whitespace(&stripped)
}

/// Decode named HTML5 entities and numeric character references.
pub fn decode_entities(input: &str) -> String {
    html_escape::decode_html_entities(input).into_owned()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Text,
    Tag { quote: Option<char> },
    Comment { body: usize },
}

/// Remove markup tags and comments, keeping the text between them.
///
/// A `<` that is followed by ASCII whitespace or ends the input is not a tag
/// and is kept. An unterminated tag swallows the rest of the input.
pub fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut state = State::Text;
    let mut chars = input.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match state {
            State::Text => {
                if c != '<' {
                    out.push(c);
                    continue;
                }
                match chars.peek() {
                    None => out.push(c),
                    Some((_, next)) if next.is_ascii_whitespace() => out.push(c),
                    Some(_) if input[i..].starts_with("<!--") => {
                        chars.nth(2);
                        state = State::Comment { body: i + 4 };
                    }
                    Some(_) => state = State::Tag { quote: None },
                }
            }
            State::Tag { quote: Some(q) } => {
                if c == q {
                    state = State::Tag { quote: None };
                }
            }
            State::Tag { quote: None } => match c {
                '"' | '\'' => state = State::Tag { quote: Some(c) },
                '>' => state = State::Text,
                _ => {}
            },
            State::Comment { body } => {
                // The closing "--" must not overlap the opening "<!--".
                if c == '>' && input[body..i].ends_with("--") {
                    state = State::Text;
                }
            }
        }
    }

    out
}

/// Collapse every whitespace run (newlines and non-breaking spaces included)
/// into one space and trim both ends.
pub fn collapse_whitespace(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut last_was_space = false;

    for c in input.chars() {
        if c.is_whitespace() {
            if !last_was_space {
                result.push(' ');
                last_was_space = true;
            }
        } else {
            result.push(c);
            last_was_space = false;
        }
    }

    result.trim().to_string()
}
