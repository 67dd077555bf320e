use anyhow::{Context, Result, anyhow};
use autometa_ports::{ArticleRow, ArticleStore};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One line of an articles JSONL file.
///
/// Fields the tool does not know about are carried through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredArticle {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub introtext: String,
    #[serde(default)]
    pub metadesc: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Article store backed by a JSONL file, one article per line.
///
/// Rows are served in file order. Updates apply in memory; call
/// [`JsonlArticleStore::save`] to write them out.
#[derive(Debug, Default)]
pub struct JsonlArticleStore {
    articles: Vec<StoredArticle>,
    index: HashMap<u64, usize>,
}

impl JsonlArticleStore {
    pub fn new(articles: Vec<StoredArticle>) -> Result<Self> {
        let mut index = HashMap::with_capacity(articles.len());
        for (pos, article) in articles.iter().enumerate() {
            if index.insert(article.id, pos).is_some() {
                return Err(anyhow!("duplicate article id {}", article.id));
            }
        }
        Ok(Self { articles, index })
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).with_context(|| format!("read {path:?}"))?;
        Self::parse(&text).with_context(|| format!("load articles from {path:?}"))
    }

    /// Parse JSONL text. Blank lines are skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut articles = Vec::new();
        for (i, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let article: StoredArticle = serde_json::from_str(line)
                .with_context(|| format!("parse article json line {}", i + 1))?;
            articles.push(article);
        }
        Self::new(articles)
    }

    pub fn articles(&self) -> &[StoredArticle] {
        &self.articles
    }

    pub fn get(&self, id: u64) -> Option<&StoredArticle> {
        self.index.get(&id).map(|&pos| &self.articles[pos])
    }

    pub fn to_jsonl(&self) -> Result<String> {
        let mut out = String::new();
        for article in &self.articles {
            out.push_str(&serde_json::to_string(article).context("serialize article")?);
            out.push('\n');
        }
        Ok(out)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_jsonl()?).with_context(|| format!("write {path:?}"))
    }
}

impl ArticleStore for JsonlArticleStore {
    fn count(&self) -> Result<u64> {
        Ok(self.articles.len() as u64)
    }

    fn fetch_page(&self, page_size: usize, offset: u64) -> Result<Vec<ArticleRow>> {
        let start = usize::try_from(offset).context("offset out of range")?;
        Ok(self
            .articles
            .iter()
            .skip(start)
            .take(page_size)
            .map(|a| ArticleRow {
                id: a.id,
                title: a.title.clone(),
                introtext: a.introtext.clone(),
            })
            .collect())
    }

    fn update_row(&mut self, id: u64, metadesc: &str) -> Result<()> {
        let pos = *self
            .index
            .get(&id)
            .ok_or_else(|| anyhow!("no article with id {id}"))?;
        self.articles[pos].metadesc = metadesc.to_string();
        Ok(())
    }
}
