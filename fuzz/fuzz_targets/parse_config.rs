//! Fuzz harness for options files (autometa.yaml / autometa.json)
//!
//! This harness tests the robustness of the options parser against
//! malformed input.

#![no_main]

use autometa_options::{ConfigFormat, parse_options};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    // We don't care if it fails - we just want to ensure it doesn't panic
    let _ = parse_options(input, ConfigFormat::Yaml);
    let _ = parse_options(input, ConfigFormat::Json);
});
