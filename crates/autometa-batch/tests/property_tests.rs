//! Property tests for autometa-batch

use autometa_batch::{BatchConfig, BatchRegenerator, regenerate_all};
use autometa_generate::{MetaDescriptionGenerator, generate};
use autometa_logging::{LogCollector, LogLevel};
use autometa_options::GenerationOptions;
use autometa_testkit::MemoryStore;
use autometa_testkit::proptest::*;
use proptest::prelude::*;

proptest! {
    // Every row is accounted for exactly once, as processed or as an error.
    #[test]
    fn prop_counts_add_up(
        rows in strategy_article_rows(40),
        failing in prop::collection::btree_set(1u64..=40, 0..10),
        page_size in 1usize..15,
    ) {
        let n = rows.len() as u64;
        let expected_errors = failing.iter().filter(|&&id| id <= n).count() as u64;
        let mut store = MemoryStore::new(rows).failing_updates(failing);
        let mut log = LogCollector::default();
        let generator = MetaDescriptionGenerator;

        let report = BatchRegenerator::new(&generator)
            .with_config(BatchConfig { page_size })
            .run(&mut store, &GenerationOptions::default(), &mut log)
            .unwrap();

        prop_assert_eq!(report.total, n);
        prop_assert_eq!(report.errors, expected_errors);
        prop_assert_eq!(report.processed + report.errors, n);
        prop_assert_eq!(log.filter_by_level(LogLevel::Warn).len() as u64, expected_errors);
    }

    // Stored descriptions are exactly what the generator produces per row.
    #[test]
    fn prop_descriptions_match_generator(rows in strategy_article_rows(25), max_length in 1usize..200) {
        let options = GenerationOptions::new().with_max_length(max_length);
        let mut store = MemoryStore::new(rows.clone());

        regenerate_all(&mut store, &options, &MetaDescriptionGenerator, &mut LogCollector::default())
            .unwrap();

        for row in &rows {
            let expected = generate(&row.title, &row.introtext, &options);
            prop_assert_eq!(store.description(row.id), Some(expected.as_str()));
        }
    }
}
