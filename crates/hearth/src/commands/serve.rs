//! Serve command: build the store, then run the site server.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use hearth_articles::ArticleStore;
use hearth_server::{SiteConfig, SiteServer};

use crate::config::ConfigFile;

/// Run the serve command.
pub async fn run(
    config_path: &Path,
    port: Option<u16>,
    host: Option<String>,
    articles_dir: Option<PathBuf>,
    static_dir: Option<PathBuf>,
) -> Result<()> {
    let file_config = ConfigFile::load(config_path)?;

    let articles_dir =
        articles_dir.unwrap_or_else(|| PathBuf::from(&file_config.articles.dir));
    let converter = file_config.converter()?;

    // The store must be fully built before the first request is served.
    let store = ArticleStore::load_from_dir(&articles_dir, converter.as_ref())
        .with_context(|| format!("Failed to load articles from {}", articles_dir.display()))?;

    if store.is_empty() {
        tracing::warn!("No articles found in {}", articles_dir.display());
    }

    let config = SiteConfig {
        host: host.unwrap_or_else(|| file_config.server.host.clone()),
        port: port.unwrap_or(file_config.server.port),
        site_title: file_config.site.title.clone(),
        static_dir: static_dir.unwrap_or_else(|| PathBuf::from(&file_config.server.static_dir)),
    };

    SiteServer::new(config, store).start().await?;

    Ok(())
}
