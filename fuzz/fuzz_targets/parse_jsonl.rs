//! Fuzz harness for articles JSONL files

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(store) = autometa_store_jsonl::JsonlArticleStore::parse(input) {
        let _ = store.to_jsonl();
    }
});
