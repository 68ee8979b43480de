//! HTTP layer for the hearth personal site.
//!
//! Thin glue over [`hearth_articles`]: a homepage listing articles by
//! date, one page per article, and a static-file fallback.

pub mod server;
pub mod templates;

pub use server::{ServerError, SiteConfig, SiteServer};
pub use templates::{ArticleSummary, TemplateEngine};
