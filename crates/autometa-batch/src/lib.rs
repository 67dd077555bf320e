//! Bulk regeneration of article meta descriptions.
//!
//! A sweep counts the articles, then walks them in fixed-size pages,
//! generating and writing one description per row. A failed row update is
//! counted, logged with the row id, and skipped; only failures outside the
//! per-row loop (counting, fetching a page) abort the sweep.

use anyhow::{Context, Result, bail};
use autometa_generate::DescriptionGenerator;
use autometa_logging::LogCollector;
use autometa_options::GenerationOptions;
use autometa_ports::ArticleStore;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rows fetched per page.
pub const PAGE_SIZE: usize = 100;

/// Component name used for log entries.
pub const COMPONENT: &str = "autometa-batch";

/// Batch configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    PAGE_SIZE
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
        }
    }
}

impl BatchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            bail!("page_size must be a positive integer");
        }
        Ok(())
    }
}

/// Counts returned after a full sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub processed: u64,
    pub errors: u64,
    pub total: u64,
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "processed={} errors={} total={}",
            self.processed, self.errors, self.total
        )
    }
}

impl BatchReport {
    /// Whether any row failed to update.
    pub fn is_partial(&self) -> bool {
        self.errors > 0
    }

    /// Log the outcome for whoever started the sweep: a warning naming the
    /// failures when some rows failed, otherwise an info line.
    pub fn log_outcome(&self, log: &mut LogCollector) {
        if self.is_partial() {
            log.warn(
                COMPONENT,
                format!(
                    "Regenerated {} of {} articles; {} failed",
                    self.processed, self.total, self.errors
                ),
            );
        } else {
            log.info(
                COMPONENT,
                format!("Regenerated meta descriptions for {} articles", self.processed),
            );
        }
    }
}

/// Regenerates every article in a store.
pub struct BatchRegenerator<'a> {
    generator: &'a dyn DescriptionGenerator,
    config: BatchConfig,
}

impl<'a> BatchRegenerator<'a> {
    pub fn new(generator: &'a dyn DescriptionGenerator) -> Self {
        Self {
            generator,
            config: BatchConfig::default(),
        }
    }

    pub fn with_config(mut self, config: BatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Sweep the whole store. Every row is regenerated, whether or not it
    /// already has a description.
    pub fn run(
        &self,
        store: &mut dyn ArticleStore,
        options: &GenerationOptions,
        log: &mut LogCollector,
    ) -> Result<BatchReport> {
        self.sweep(store, options, log).inspect_err(|e| {
            log.error(
                COMPONENT,
                format!("Failed to regenerate meta descriptions: {e:#}"),
            )
        })
    }

    fn sweep(
        &self,
        store: &mut dyn ArticleStore,
        options: &GenerationOptions,
        log: &mut LogCollector,
    ) -> Result<BatchReport> {
        self.config.validate()?;
        options.validate()?;

        let total = store.count().context("count articles")?;
        let mut report = BatchReport {
            total,
            ..BatchReport::default()
        };
        let mut offset: u64 = 0;

        while offset < total {
            let rows = store
                .fetch_page(self.config.page_size, offset)
                .with_context(|| format!("fetch articles at offset {offset}"))?;

            if rows.is_empty() {
                break;
            }
            log.debug(
                COMPONENT,
                format!("Fetched {} articles at offset {offset}", rows.len()),
            );

            for row in &rows {
                let metadesc = self.generator.generate(&row.title, &row.introtext, options);
                match store.update_row(row.id, &metadesc) {
                    Ok(()) => report.processed += 1,
                    Err(e) => {
                        report.errors += 1;
                        log.warn(
                            COMPONENT,
                            format!("Failed to update article {}: {e:#}", row.id),
                        );
                    }
                }
            }

            offset += self.config.page_size as u64;
        }

        log.info(
            COMPONENT,
            format!(
                "Processed {} articles with {} errors",
                report.processed, report.errors
            ),
        );

        Ok(report)
    }
}

/// Regenerate every article with the default page size.
pub fn regenerate_all(
    store: &mut dyn ArticleStore,
    options: &GenerationOptions,
    generator: &dyn DescriptionGenerator,
    log: &mut LogCollector,
) -> Result<BatchReport> {
    BatchRegenerator::new(generator).run(store, options, log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use autometa_generate::MetaDescriptionGenerator;
    use autometa_logging::{LogLevel, LoggingConfig};
    use autometa_testkit::{MemoryStore, numbered_rows, row};

    fn quiet_log() -> LogCollector {
        LogCollector::new(LoggingConfig::new().with_level(LogLevel::Debug))
    }

    #[test]
    fn batch_config_default() {
        assert_eq!(BatchConfig::default().page_size, 100);
        assert!(BatchConfig { page_size: 0 }.validate().is_err());
    }

    #[test]
    fn regenerates_every_row() -> Result<()> {
        let mut store = MemoryStore::new(vec![
            row(1, "Hello World", "<p>This is   a <b>test</b>.</p>"),
            row(2, "Only title", ""),
        ]);
        let mut log = quiet_log();

        let report = regenerate_all(
            &mut store,
            &GenerationOptions::default(),
            &MetaDescriptionGenerator,
            &mut log,
        )?;

        assert_eq!(report, BatchReport { processed: 2, errors: 0, total: 2 });
        assert_eq!(store.description(1), Some("Hello World - This is a test."));
        assert_eq!(store.description(2), Some("Only title"));
        Ok(())
    }

    #[test]
    fn pages_of_one_hundred() -> Result<()> {
        let mut store = MemoryStore::new(numbered_rows(250));
        let mut log = quiet_log();

        let report = regenerate_all(
            &mut store,
            &GenerationOptions::default(),
            &MetaDescriptionGenerator,
            &mut log,
        )?;

        assert_eq!(report.processed, 250);
        assert_eq!(
            *store.page_requests.borrow(),
            vec![(100, 0), (100, 100), (100, 200)]
        );
        Ok(())
    }

    #[test]
    fn custom_page_size() -> Result<()> {
        let mut store = MemoryStore::new(numbered_rows(5));
        let generator = MetaDescriptionGenerator;
        let regenerator =
            BatchRegenerator::new(&generator).with_config(BatchConfig { page_size: 2 });

        let report = regenerator.run(&mut store, &GenerationOptions::default(), &mut quiet_log())?;

        assert_eq!(report.processed, 5);
        assert_eq!(store.page_requests.borrow().len(), 3);
        Ok(())
    }

    #[test]
    fn failed_rows_are_counted_and_skipped() -> Result<()> {
        let mut store = MemoryStore::new(numbered_rows(4)).failing_updates([2]);
        let mut log = quiet_log();

        let report = regenerate_all(
            &mut store,
            &GenerationOptions::default(),
            &MetaDescriptionGenerator,
            &mut log,
        )?;

        assert_eq!(report, BatchReport { processed: 3, errors: 1, total: 4 });
        assert!(store.description(2).is_none());
        assert!(store.description(3).is_some());

        let warnings = log.filter_by_level(LogLevel::Warn);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("article 2"));
        Ok(())
    }

    #[test]
    fn count_failure_aborts() {
        let mut store = MemoryStore::new(numbered_rows(3)).failing_count();
        let mut log = quiet_log();

        let err = regenerate_all(
            &mut store,
            &GenerationOptions::default(),
            &MetaDescriptionGenerator,
            &mut log,
        )
        .unwrap_err();

        assert!(format!("{err:#}").contains("count articles"));
        assert!(store.descriptions.is_empty());
        assert_eq!(log.filter_by_level(LogLevel::Error).len(), 1);
    }

    #[test]
    fn page_failure_aborts() {
        let mut store = MemoryStore::new(numbered_rows(150)).failing_fetch_at(100);
        let mut log = quiet_log();

        let err = regenerate_all(
            &mut store,
            &GenerationOptions::default(),
            &MetaDescriptionGenerator,
            &mut log,
        )
        .unwrap_err();

        assert!(format!("{err:#}").contains("offset 100"));
        assert_eq!(store.descriptions.len(), 100);
    }

    #[test]
    fn empty_page_ends_sweep_early() -> Result<()> {
        let mut store = MemoryStore::new(numbered_rows(3)).reporting_total(500);

        let report = regenerate_all(
            &mut store,
            &GenerationOptions::default(),
            &MetaDescriptionGenerator,
            &mut quiet_log(),
        )?;

        assert_eq!(report, BatchReport { processed: 3, errors: 0, total: 500 });
        assert_eq!(store.page_requests.borrow().len(), 2);
        Ok(())
    }

    #[test]
    fn empty_store() -> Result<()> {
        let mut store = MemoryStore::new(vec![]);
        let report = regenerate_all(
            &mut store,
            &GenerationOptions::default(),
            &MetaDescriptionGenerator,
            &mut quiet_log(),
        )?;

        assert_eq!(report, BatchReport::default());
        assert!(store.page_requests.borrow().is_empty());
        Ok(())
    }

    #[test]
    fn invalid_options_abort_before_counting() {
        let mut store = MemoryStore::new(numbered_rows(1));
        let options = GenerationOptions::new().with_max_length(0);

        assert!(
            regenerate_all(&mut store, &options, &MetaDescriptionGenerator, &mut quiet_log())
                .is_err()
        );
        assert!(store.descriptions.is_empty());
    }

    #[test]
    fn partial_outcome_is_a_warning() -> Result<()> {
        let mut store = MemoryStore::new(numbered_rows(4)).failing_updates([3]);
        let report = regenerate_all(
            &mut store,
            &GenerationOptions::default(),
            &MetaDescriptionGenerator,
            &mut quiet_log(),
        )?;
        assert!(report.is_partial());

        let mut log = quiet_log();
        report.log_outcome(&mut log);
        let warnings = log.filter_by_level(LogLevel::Warn);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message, "Regenerated 3 of 4 articles; 1 failed");
        Ok(())
    }

    #[test]
    fn clean_outcome_is_info() {
        let report = BatchReport { processed: 2, errors: 0, total: 2 };
        assert!(!report.is_partial());

        let mut log = quiet_log();
        report.log_outcome(&mut log);
        assert!(log.filter_by_level(LogLevel::Warn).is_empty());
        assert_eq!(
            log.filter_by_level(LogLevel::Info)[0].message,
            "Regenerated meta descriptions for 2 articles"
        );
    }

    #[test]
    fn summary_log_snapshot() -> Result<()> {
        let mut store = MemoryStore::new(numbered_rows(3)).failing_updates([1, 3]);
        let mut log = LogCollector::default();

        let report = regenerate_all(
            &mut store,
            &GenerationOptions::default(),
            &MetaDescriptionGenerator,
            &mut log,
        )?;

        let lines: Vec<String> = log
            .entries()
            .iter()
            .map(|e| format!("{} {}", e.level, e.message))
            .collect();
        insta::assert_snapshot!(lines.join("\n"), @r"
        WARN Failed to update article 1: update rejected for article 1
        WARN Failed to update article 3: update rejected for article 3
        INFO Processed 1 articles with 2 errors
        ");
        insta::assert_snapshot!(report.to_string(), @"processed=1 errors=2 total=3");
        Ok(())
    }
}
