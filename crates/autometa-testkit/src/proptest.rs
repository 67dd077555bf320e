//! Proptest strategies for autometa property-based testing.

use ::proptest::prelude::*;
use autometa_ports::ArticleRow;

/// A single alphanumeric word.
pub fn strategy_word() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]{1,12}"
}

/// Single-spaced plain text without markup, entities or punctuation.
pub fn strategy_plain_text(max_words: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(strategy_word(), 0..=max_words).prop_map(|words| words.join(" "))
}

/// Non-empty single-spaced plain text.
pub fn strategy_non_empty_text(max_words: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(strategy_word(), 1..=max_words.max(1))
        .prop_map(|words| words.join(" "))
}

pub fn strategy_tag_name() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("p"),
        Just("b"),
        Just("i"),
        Just("em"),
        Just("strong"),
        Just("span"),
        Just("div"),
        Just("a"),
    ]
}

/// Whitespace runs as they appear in hand-edited HTML.
pub fn strategy_whitespace() -> impl Strategy<Value = String> {
    "[ \t\n\r]{1,4}"
}

/// An HTML fragment: words, some wrapped in tags (with attributes), separated
/// by whitespace runs.
pub fn strategy_html_fragment(max_words: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(
        (
            strategy_word(),
            prop::option::of(strategy_tag_name()),
            any::<bool>(),
            strategy_whitespace(),
        ),
        0..=max_words,
    )
    .prop_map(|parts| {
        let mut html = String::new();
        for (word, tag, with_attr, ws) in parts {
            match tag {
                Some(tag) if with_attr => {
                    html.push_str(&format!(r#"<{tag} class="x > y">{word}</{tag}>"#))
                }
                Some(tag) => html.push_str(&format!("<{tag}>{word}</{tag}>")),
                None => html.push_str(&word),
            }
            html.push_str(&ws);
        }
        html
    })
}

/// Rows with ids `1..=n` for some `n <= max_rows`.
pub fn strategy_article_rows(max_rows: usize) -> impl Strategy<Value = Vec<ArticleRow>> {
    prop::collection::vec((strategy_plain_text(6), strategy_html_fragment(20)), 0..=max_rows)
        .prop_map(|parts| {
            parts
                .into_iter()
                .enumerate()
                .map(|(i, (title, introtext))| ArticleRow {
                    id: i as u64 + 1,
                    title,
                    introtext,
                })
                .collect()
        })
}
