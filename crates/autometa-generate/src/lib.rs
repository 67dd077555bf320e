//! Meta description generation.
//!
//! Composes the trimmed title and the cleaned body text, then bounds the
//! result with word-boundary truncation. Composition always happens before
//! truncation; the parts are never truncated independently.

use autometa_extract::extract_text;
use autometa_options::GenerationOptions;
use autometa_truncate::truncate_at_word_boundary;

/// Anything that turns an article title and body into a description.
///
/// The save hook, the batch job and the CLI depend on this capability rather
/// than on a concrete generator, so tests can substitute their own.
pub trait DescriptionGenerator {
    fn generate(&self, title: &str, body: &str, options: &GenerationOptions) -> String;
}

/// The default generator: title, separator, cleaned body, then truncation.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetaDescriptionGenerator;

impl DescriptionGenerator for MetaDescriptionGenerator {
    fn generate(&self, title: &str, body: &str, options: &GenerationOptions) -> String {
        generate(title, body, options)
    }
}

/// Generate a meta description from an article title and HTML body.
pub fn generate(title: &str, body: &str, options: &GenerationOptions) -> String {
    let composed = compose(title, body, options);
    truncate_at_word_boundary(&composed, options.max_length)
}

/// Build the untruncated description.
///
/// An empty composition falls back to the trimmed title, which may itself be
/// empty.
pub fn compose(title: &str, body: &str, options: &GenerationOptions) -> String {
    let mut result = String::new();

    if options.include_title {
        result.push_str(title.trim());
    }

    if options.include_body {
        let summary = extract_text(body);
        if !summary.is_empty() {
            if !result.is_empty() {
                result.push_str(&options.separator);
            }
            result.push_str(&summary);
        }
    }

    if result.is_empty() {
        result.push_str(title.trim());
    }

    result
}
