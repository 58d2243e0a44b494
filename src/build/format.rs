//! Pluggable page converters.
//!
//! A converter turns the raw text of a source file into body HTML plus its
//! front matter metadata. The registry picks a converter by file extension;
//! the default registry only knows Markdown.
//!
//! # Adding a New Converter
//!
//! ```ignore
//! struct AsciidocConverter;
//!
//! impl Converter for AsciidocConverter {
//!     fn name(&self) -> &'static str { "asciidoc" }
//!     fn extensions(&self) -> &[&'static str] { &["adoc", "asciidoc"] }
//!     fn convert(&self, text: &str) -> Result<Converted, ConvertError> {
//!         // Convert AsciiDoc to HTML...
//!     }
//! }
//!
//! registry.register(AsciidocConverter);
//! ```

use std::path::Path;

use crate::build::front_matter::parse_front_matter;
use crate::build::highlight::SyntaxHighlighter;
use crate::build::markdown::{MarkdownError, markdown_options, render_markdown};
use crate::build::page::Metadata;
use crate::config::MarkdownConfig;

/// Output of a converter.
#[derive(Debug, Clone)]
pub struct Converted {
    /// The rendered body HTML.
    pub html: String,
    /// Front matter key/value pairs.
    pub metadata: Metadata,
    /// Non-fatal problems found while converting.
    pub warnings: Vec<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    #[error("markdown error: {0}")]
    Markdown(#[from] MarkdownError),
}

/// Something that can turn source text into `(html, metadata)`.
pub trait Converter: Send + Sync {
    /// The name of this converter (e.g., "markdown").
    fn name(&self) -> &'static str;

    /// File extensions this converter handles (lowercase, without dot).
    fn extensions(&self) -> &[&'static str];

    /// Convert source text, front matter included.
    fn convert(&self, text: &str) -> Result<Converted, ConvertError>;
}

/// Markdown converter backed by pulldown-cmark.
pub struct MarkdownConverter {
    highlighter: SyntaxHighlighter,
    config: MarkdownConfig,
}

impl MarkdownConverter {
    /// Create a converter, rejecting unknown extension names up front.
    pub fn new(config: MarkdownConfig) -> Result<Self, MarkdownError> {
        markdown_options(&config.extensions)?;
        Ok(Self {
            highlighter: SyntaxHighlighter::new(&config.highlight_theme),
            config,
        })
    }
}

impl Converter for MarkdownConverter {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn extensions(&self) -> &[&'static str] {
        &["md", "markdown"]
    }

    fn convert(&self, text: &str) -> Result<Converted, ConvertError> {
        let parsed = parse_front_matter(text);
        let html = render_markdown(&parsed.content, &self.highlighter, &self.config)?;
        Ok(Converted {
            html,
            metadata: parsed.metadata,
            warnings: parsed.warnings,
        })
    }
}

/// Registry of converters, keyed by file extension.
pub struct ConverterRegistry {
    converters: Vec<Box<dyn Converter>>,
}

impl ConverterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            converters: Vec::new(),
        }
    }

    /// Create a registry holding the Markdown converter.
    pub fn with_defaults(config: &MarkdownConfig) -> Result<Self, MarkdownError> {
        let mut registry = Self::new();
        registry.register(MarkdownConverter::new(config.clone())?);
        Ok(registry)
    }

    /// Register a new converter.
    ///
    /// Later registrations take precedence for overlapping extensions.
    pub fn register<C: Converter + 'static>(&mut self, converter: C) {
        self.converters.push(Box::new(converter));
    }

    /// Find the converter for a file extension.
    pub fn for_extension(&self, ext: &str) -> Option<&dyn Converter> {
        let ext_lower = ext.to_lowercase();
        self.converters
            .iter()
            .rev()
            .find(|c| c.extensions().iter().any(|e| *e == ext_lower))
            .map(|c| c.as_ref())
    }

    /// Find the converter for a file path based on its extension.
    pub fn for_path(&self, path: &Path) -> Option<&dyn Converter> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.for_extension(ext))
    }

    /// Check if a path is a page source (has a registered converter).
    pub fn is_document(&self, path: &Path) -> bool {
        self.for_path(path).is_some()
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
