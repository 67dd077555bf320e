//! Property tests for autometa-generate

use autometa_generate::{DescriptionGenerator, MetaDescriptionGenerator, generate};
use autometa_options::GenerationOptions;
use autometa_testkit::proptest::*;
use proptest::prelude::*;

proptest! {
    // Plain title/body pairs that fit come back as title + separator + body.
    #[test]
    fn prop_fitting_composition_is_exact(
        title in strategy_non_empty_text(5),
        body in strategy_plain_text(10),
    ) {
        let options = GenerationOptions::new().with_max_length(1000);
        let expected = if body.is_empty() {
            title.clone()
        } else {
            format!("{title} - {body}")
        };
        prop_assert_eq!(generate(&title, &body, &options), expected);
    }

    // Output before the ellipsis never exceeds max_length characters.
    #[test]
    fn prop_output_is_bounded(
        title in strategy_plain_text(8),
        body in strategy_html_fragment(40),
        max_length in 1usize..200,
    ) {
        let options = GenerationOptions::new().with_max_length(max_length);
        let out = generate(&title, &body, &options);
        let len = out.chars().count();

        if len > max_length {
            let cut = out.strip_suffix("...");
            prop_assert!(cut.is_some());
            prop_assert!(cut.map_or(0, |c| c.chars().count()) <= max_length);
        }
        prop_assert!(!out.contains('<'));
    }

    // Identical inputs always produce identical output.
    #[test]
    fn prop_generate_is_pure(
        title in strategy_plain_text(8),
        body in strategy_html_fragment(20),
        max_length in 1usize..200,
        include_title in any::<bool>(),
        include_body in any::<bool>(),
    ) {
        let options = GenerationOptions::new()
            .with_max_length(max_length)
            .with_title(include_title)
            .with_body(include_body);
        let first = generate(&title, &body, &options);
        let second = MetaDescriptionGenerator.generate(&title, &body, &options);
        prop_assert_eq!(first, second);
    }
}
