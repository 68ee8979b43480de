//! Site configuration loaded from `site.toml`.

use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

use hearth_articles::{CmarkConverter, Converter, PandocConverter};

/// Configuration file structure (site.toml).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub articles: ArticlesSection,
    #[serde(default)]
    pub server: ServerSection,
}

#[derive(Debug, Deserialize)]
pub struct SiteSection {
    #[serde(default = "default_title")]
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct ArticlesSection {
    /// Directory scanned for `.pandoc` sources
    #[serde(default = "default_articles_dir")]
    pub dir: String,

    /// Which converter renders article bodies: "pandoc" or "cmark"
    #[serde(default = "default_converter")]
    pub converter: String,

    /// Command to invoke for the pandoc converter
    #[serde(default = "default_command")]
    pub command: String,
}

#[derive(Debug, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory of static files served for unmatched paths
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: default_title(),
        }
    }
}

impl Default for ArticlesSection {
    fn default() -> Self {
        Self {
            dir: default_articles_dir(),
            converter: default_converter(),
            command: default_command(),
        }
    }
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

fn default_title() -> String {
    "Hearth".to_string()
}
fn default_articles_dir() -> String {
    "articles".to_string()
}
fn default_converter() -> String {
    "pandoc".to_string()
}
fn default_command() -> String {
    "pandoc".to_string()
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8000
}
fn default_static_dir() -> String {
    "html".to_string()
}

impl ConfigFile {
    /// Load configuration from `path` if it exists.
    ///
    /// A missing file means all defaults; a malformed file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;

        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// The converter selected by `[articles] converter`.
    pub fn converter(&self) -> Result<Box<dyn Converter>> {
        match self.articles.converter.as_str() {
            "pandoc" => Ok(Box::new(PandocConverter::new(&self.articles.command))),
            "cmark" => Ok(Box::new(CmarkConverter)),
            other => anyhow::bail!(
                "Unknown converter '{}' (expected 'pandoc' or 'cmark')",
                other
            ),
        }
    }
}
