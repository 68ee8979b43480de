//! Document-to-HTML conversion.
//!
//! Rendering an article body is hidden behind the [`Converter`] trait so
//! the store never cares whether HTML comes from an external pandoc
//! process or from an in-process markdown renderer (or from a stub, in
//! tests).

use std::path::Path;
use std::process::Command;

use crate::titleblock::strip_title_block;

/// Errors that can occur while converting an article source to HTML.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Failed to run converter '{command}': {message}")]
    Spawn { command: String, message: String },

    #[error("Converter '{command}' exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Converter output was not valid UTF-8: {0}")]
    InvalidUtf8(String),

    #[error("Failed to read source {path}: {message}")]
    ReadSource { path: String, message: String },
}

/// Converts one article source file to an HTML fragment.
pub trait Converter {
    fn to_html(&self, source: &Path) -> Result<String, ConvertError>;
}

/// Converter backed by an external pandoc-compatible command.
///
/// The command is invoked as `<command> -t html <source>` and must emit
/// HTML on stdout. The call blocks until the process exits; there is no
/// timeout.
#[derive(Debug, Clone)]
pub struct PandocConverter {
    command: String,
}

impl PandocConverter {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Default for PandocConverter {
    fn default() -> Self {
        Self::new("pandoc")
    }
}

impl Converter for PandocConverter {
    fn to_html(&self, source: &Path) -> Result<String, ConvertError> {
        let output = Command::new(&self.command)
            .arg("-t")
            .arg("html")
            .arg(source)
            .output()
            .map_err(|e| ConvertError::Spawn {
                command: self.command.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(ConvertError::Failed {
                command: self.command.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        String::from_utf8(output.stdout).map_err(|e| ConvertError::InvalidUtf8(e.to_string()))
    }
}

/// In-process converter using pulldown-cmark.
///
/// Renders the article body (everything after the title block) as
/// CommonMark. Less faithful to pandoc's dialect but needs no external
/// tooling, which makes it the converter of choice for tests and for
/// deployments without pandoc installed.
#[derive(Debug, Clone, Default)]
pub struct CmarkConverter;

impl Converter for CmarkConverter {
    fn to_html(&self, source: &Path) -> Result<String, ConvertError> {
        let raw = std::fs::read_to_string(source).map_err(|e| ConvertError::ReadSource {
            path: source.display().to_string(),
            message: e.to_string(),
        })?;

        Ok(render_markdown(strip_title_block(&raw)))
    }
}

fn render_markdown(content: &str) -> String {
    use pulldown_cmark::{html, Options, Parser};

    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(content, options);

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    html_output
}
