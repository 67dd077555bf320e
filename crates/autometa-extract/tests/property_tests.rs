//! Property tests for autometa-extract

use autometa_extract::{collapse_whitespace, extract_text};
use autometa_testkit::proptest::*;
use proptest::prelude::*;

proptest! {
    // Tags never survive extraction, and no double spaces remain.
    #[test]
    fn prop_markup_is_removed(html in strategy_html_fragment(30)) {
        let text = extract_text(&html);
        prop_assert!(!text.contains('<'));
        prop_assert!(!text.contains('>'));
        prop_assert!(!text.contains("  "));
        prop_assert_eq!(text.trim(), text.as_str());
    }

    // Words survive in order; only markup and spacing change.
    #[test]
    fn prop_words_survive_in_order(words in prop::collection::vec(strategy_word(), 0..20)) {
        let html: String = words.iter().map(|w| format!("<p>\n  <b>{w}</b>\t</p>")).collect();
        prop_assert_eq!(extract_text(&html), words.join(" "));
    }

    // Plain single-spaced text passes through untouched.
    #[test]
    fn prop_plain_text_is_identity(text in strategy_plain_text(20)) {
        prop_assert_eq!(extract_text(&text), text);
    }

    #[test]
    fn prop_extract_is_idempotent(html in strategy_html_fragment(20)) {
        let once = extract_text(&html);
        prop_assert_eq!(extract_text(&once), once.clone());
    }

    #[test]
    fn prop_collapse_never_grows(s in ".{0,200}") {
        prop_assert!(collapse_whitespace(&s).len() <= s.len());
    }
}
