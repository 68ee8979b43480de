//! Check command: load the articles once and report them.
//!
//! Gives authors a quick "will my site load" loop without binding a port.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use hearth_articles::ArticleStore;

use crate::config::ConfigFile;

/// Run the check command.
pub fn run(config_path: &Path, articles_dir: Option<PathBuf>) -> Result<()> {
    let file_config = ConfigFile::load(config_path)?;

    let articles_dir =
        articles_dir.unwrap_or_else(|| PathBuf::from(&file_config.articles.dir));
    let converter = file_config.converter()?;

    let store = ArticleStore::load_from_dir(&articles_dir, converter.as_ref())
        .with_context(|| format!("Failed to load articles from {}", articles_dir.display()))?;

    println!(
        "{} article(s) in {}",
        store.len(),
        articles_dir.display()
    );

    for article in store.list_by_date() {
        println!(
            "  {:<12} {:<24} {}",
            article.date.as_deref().unwrap_or("-"),
            article.id,
            article.title.as_deref().unwrap_or("(untitled)")
        );
    }

    Ok(())
}
