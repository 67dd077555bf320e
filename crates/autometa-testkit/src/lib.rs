use anyhow::{Result, anyhow, bail};
use autometa_ports::{Article, ArticleRow, ArticleStore};
use std::collections::BTreeSet;

pub mod proptest;

/// Small helpers for building fixtures in tests.
///
/// Keeping these in a microcrate avoids copy-paste across hook/batch/store tests.
pub fn article(title: &str, introtext: &str, metadesc: &str) -> Article {
    Article {
        title: title.to_string(),
        introtext: introtext.to_string(),
        metadesc: metadesc.to_string(),
    }
}

pub fn row(id: u64, title: &str, introtext: &str) -> ArticleRow {
    ArticleRow {
        id,
        title: title.to_string(),
        introtext: introtext.to_string(),
    }
}

/// `n` rows with ids `1..=n`, titled "Article {id}".
pub fn numbered_rows(n: u64) -> Vec<ArticleRow> {
    (1..=n)
        .map(|id| row(id, &format!("Article {id}"), &format!("<p>Body of article {id}.</p>")))
        .collect()
}

/// In-memory article store that records every page request and update.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub rows: Vec<ArticleRow>,
    pub descriptions: Vec<(u64, String)>,
    pub page_requests: std::cell::RefCell<Vec<(usize, u64)>>,
    /// Ids whose update fails.
    pub failing_ids: BTreeSet<u64>,
    /// Overrides the row count reported by `count`.
    pub reported_total: Option<u64>,
    pub fail_count: bool,
    /// Offset at which `fetch_page` fails.
    pub fail_fetch_at: Option<u64>,
}

impl MemoryStore {
    pub fn new(rows: Vec<ArticleRow>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    pub fn failing_updates(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.failing_ids.extend(ids);
        self
    }

    pub fn reporting_total(mut self, total: u64) -> Self {
        self.reported_total = Some(total);
        self
    }

    pub fn failing_count(mut self) -> Self {
        self.fail_count = true;
        self
    }

    pub fn failing_fetch_at(mut self, offset: u64) -> Self {
        self.fail_fetch_at = Some(offset);
        self
    }

    /// The last description written for `id`.
    pub fn description(&self, id: u64) -> Option<&str> {
        self.descriptions
            .iter()
            .rev()
            .find(|(row_id, _)| *row_id == id)
            .map(|(_, d)| d.as_str())
    }
}

impl ArticleStore for MemoryStore {
    fn count(&self) -> Result<u64> {
        if self.fail_count {
            bail!("count query failed");
        }
        Ok(self.reported_total.unwrap_or(self.rows.len() as u64))
    }

    fn fetch_page(&self, page_size: usize, offset: u64) -> Result<Vec<ArticleRow>> {
        self.page_requests.borrow_mut().push((page_size, offset));
        if self.fail_fetch_at == Some(offset) {
            bail!("page query failed at offset {offset}");
        }
        let start = usize::try_from(offset)?;
        Ok(self.rows.iter().skip(start).take(page_size).cloned().collect())
    }

    fn update_row(&mut self, id: u64, metadesc: &str) -> Result<()> {
        if self.failing_ids.contains(&id) {
            return Err(anyhow!("update rejected for article {id}"));
        }
        self.descriptions.push((id, metadesc.to_string()));
        Ok(())
    }
}
