//! Fuzz harness for HTML text extraction
//!
//! Arbitrary (often malformed) markup must never panic, and the result must
//! stay trimmed and single-spaced.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let text = autometa_extract::extract_text(input);
    assert!(!text.contains("  "));
    assert_eq!(text.trim(), text);
});
