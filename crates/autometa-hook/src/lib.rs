//! Before-save hook that fills in missing article meta descriptions.
//!
//! The hook never blocks a save. It either writes a freshly generated
//! description into the article or leaves the article untouched, and reports
//! which of the two happened.

use autometa_generate::DescriptionGenerator;
use autometa_options::GenerationOptions;
use autometa_ports::Article;

/// The only save context the hook acts on.
pub const ARTICLE_CONTEXT: &str = "com_content.article";

/// Why the hook left an article alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The save was not for an article.
    OtherContext,
    /// A description is already set and overwriting is disabled.
    ExistingDescription,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Generated,
    Skipped(SkipReason),
}

/// Run the hook on an article that is about to be saved.
pub fn before_save(
    context: &str,
    article: &mut Article,
    options: &GenerationOptions,
    generator: &dyn DescriptionGenerator,
) -> SaveOutcome {
    if context != ARTICLE_CONTEXT {
        return SaveOutcome::Skipped(SkipReason::OtherContext);
    }

    if !should_generate(&article.metadesc, options) {
        return SaveOutcome::Skipped(SkipReason::ExistingDescription);
    }

    article.metadesc = generator.generate(&article.title, &article.introtext, options);
    SaveOutcome::Generated
}

/// The description an article should carry after saving: the existing value
/// when it is kept, a generated one otherwise.
pub fn apply_before_save(
    title: &str,
    body: &str,
    existing: &str,
    options: &GenerationOptions,
    generator: &dyn DescriptionGenerator,
) -> String {
    if should_generate(existing, options) {
        generator.generate(title, body, options)
    } else {
        existing.to_string()
    }
}

fn should_generate(existing: &str, options: &GenerationOptions) -> bool {
    existing.is_empty() || options.overwrite_existing
}
