//! Article ingestion pipeline.
//!
//! This crate owns the non-trivial part of the site: discovering article
//! sources, parsing their title-block metadata, converting them to HTML,
//! and serving read-only queries over the result. It knows nothing about
//! HTTP.

pub mod convert;
pub mod store;
pub mod titleblock;

pub use convert::{CmarkConverter, ConvertError, Converter, PandocConverter};
pub use store::{Article, ArticleStore, StoreError, SOURCE_SUFFIX};
pub use titleblock::{is_title_block_line, parse_title_block, strip_title_block, TitleBlock};
