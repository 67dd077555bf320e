use anyhow::Result;
use serde::{Deserialize, Serialize};

/// An article as seen by the save hook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: String,
    /// Lead HTML of the article; the source of the description body.
    #[serde(default)]
    pub introtext: String,
    /// Existing meta description, empty when unset.
    #[serde(default)]
    pub metadesc: String,
}

/// One row of a paged article sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRow {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub introtext: String,
}

/// Paged access to stored articles.
///
/// Adapters live in `autometa-store-*` crates. The batch job only ever reads
/// pages in offset order and writes one description per row.
pub trait ArticleStore {
    /// Total number of articles the sweep should cover.
    fn count(&self) -> Result<u64>;

    /// Up to `page_size` rows starting at `offset`. An empty page means the
    /// store has no more rows.
    fn fetch_page(&self, page_size: usize, offset: u64) -> Result<Vec<ArticleRow>>;

    /// Store a new meta description for article `id`.
    fn update_row(&mut self, id: u64, metadesc: &str) -> Result<()>;
}
