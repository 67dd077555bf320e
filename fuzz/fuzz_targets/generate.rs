//! Fuzz harness for description generation
//!
//! The first byte picks max_length; the rest is split into title and body at
//! the first NUL.

#![no_main]

use autometa_options::GenerationOptions;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&len, rest)) = data.split_first() else {
        return;
    };
    let Ok(input) = std::str::from_utf8(rest) else {
        return;
    };
    let (title, body) = input.split_once('\0').unwrap_or((input, ""));

    let max_length = usize::from(len).max(1);
    let options = GenerationOptions::new().with_max_length(max_length);
    let out = autometa_generate::generate(title, body, &options);

    let cut = out.strip_suffix(autometa_truncate::ELLIPSIS).unwrap_or(&out);
    assert!(cut.chars().count() <= max_length);
});
