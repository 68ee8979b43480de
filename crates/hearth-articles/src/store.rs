//! The article store.
//!
//! Built once at startup from a directory snapshot and never mutated
//! afterwards; queries need no locking as long as the build fully precedes
//! request handling.

use std::collections::BTreeMap;
use std::path::Path;

use walkdir::WalkDir;

use crate::convert::Converter;
use crate::titleblock::{is_title_block_line, parse_title_block};

/// File extension that marks a file as an article source.
pub const SOURCE_SUFFIX: &str = ".pandoc";

/// A single loaded article.
///
/// The id is the source filename minus the [`SOURCE_SUFFIX`] and is unique
/// within a store. All fields are populated during the store build and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: String,
    pub title: Option<String>,
    pub authors: Option<String>,
    /// Free-form date string, used only for display and lexicographic
    /// ordering. Not parsed as a calendar date.
    pub date: Option<String>,
    /// Rendered HTML body. Empty output from the converter stays an empty
    /// string, distinct from a missing article.
    pub content: String,
}

impl Article {
    fn date_key(&self) -> &str {
        self.date.as_deref().unwrap_or("")
    }
}

/// Errors that can occur while building the store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to scan article directory {dir}: {message}")]
    Scan { dir: String, message: String },
}

/// Mapping from article id to article, queryable by id or in date order.
#[derive(Debug, Default)]
pub struct ArticleStore {
    articles: BTreeMap<String, Article>,
}

impl ArticleStore {
    /// Build a store from every `.pandoc` file directly inside `dir`.
    ///
    /// Files are loaded strictly sequentially, one converter invocation
    /// per article. A missing or unreadable directory fails the whole
    /// build; an article whose source cannot be read or converted is
    /// logged and skipped, so one bad file never takes the site down.
    pub fn load_from_dir(dir: &Path, converter: &dyn Converter) -> Result<Self, StoreError> {
        let mut articles = BTreeMap::new();

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| StoreError::Scan {
                dir: dir.display().to_string(),
                message: e.to_string(),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            let Some(id) = name.strip_suffix(SOURCE_SUFFIX) else {
                continue;
            };

            match load_article(id, entry.path(), converter) {
                Ok(article) => {
                    tracing::debug!("Loaded article '{}'", article.id);
                    articles.insert(article.id.clone(), article);
                }
                Err(message) => {
                    tracing::warn!("Skipping article '{}': {}", id, message);
                }
            }
        }

        tracing::info!("Loaded {} articles from {}", articles.len(), dir.display());

        Ok(Self { articles })
    }

    /// Look up an article by id. A miss is a normal `None`, never a panic.
    pub fn get(&self, id: &str) -> Option<&Article> {
        self.articles.get(id)
    }

    /// All articles, newest date first.
    ///
    /// Sorts lexicographically on the date string, treating a missing date
    /// as the empty string so undated articles always come last. The sort
    /// is stable over id order, so ties are deterministic.
    pub fn list_by_date(&self) -> Vec<&Article> {
        let mut listed: Vec<&Article> = self.articles.values().collect();
        listed.sort_by(|a, b| b.date_key().cmp(a.date_key()));
        listed
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

/// Two-phase article load: title block first, then rendered content.
fn load_article(id: &str, path: &Path, converter: &dyn Converter) -> Result<Article, String> {
    let source = std::fs::read_to_string(path).map_err(|e| e.to_string())?;

    let block = parse_title_block(source.lines().take_while(|l| is_title_block_line(l)));

    let content = converter.to_html(path).map_err(|e| e.to_string())?;

    Ok(Article {
        id: id.to_string(),
        title: block.title,
        authors: block.authors,
        date: block.date,
        content,
    })
}
