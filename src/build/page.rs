use std::collections::BTreeMap;
use std::path::PathBuf;

// =============================================================================
// Source files
// =============================================================================

/// A markdown file read from the source root, not yet converted.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path relative to the source root (e.g., "blog/post-a.md")
    pub source_path: PathBuf,
    /// Location derived from the source path (e.g., "blog/post-a")
    pub location: String,
    /// The unparsed file content, front matter included
    pub raw_markdown: String,
}

// =============================================================================
// Pages
// =============================================================================

/// A converted page.
///
/// Pages are built once per source file and are read-only afterwards;
/// renderers only ever see `&Page`.
#[derive(Debug, Clone)]
pub struct Page {
    pub source_path: PathBuf,
    pub location: String,
    pub raw_markdown: String,
    /// Body HTML produced by the converter
    pub html: String,
    /// Front matter key/value pairs
    pub metadata: Metadata,
}

impl Page {
    pub fn from_source(source: SourceFile, html: String, metadata: Metadata) -> Self {
        Self {
            source_path: source.source_path,
            location: source.location,
            raw_markdown: source.raw_markdown,
            html,
            metadata,
        }
    }

    /// Get the page title, falling back to the last location segment.
    pub fn title(&self) -> String {
        self.metadata.title().map(str::to_string).unwrap_or_else(|| {
            let stem = self.location.rsplit('/').next().unwrap_or_default();
            if stem.is_empty() {
                "Untitled".to_string()
            } else {
                title_case(stem)
            }
        })
    }

    /// Resolve the declared page type.
    pub fn page_type(&self) -> Result<PageType, PageTypeError> {
        match self.metadata.page_type() {
            Some(declared) => declared.parse(),
            None => Err(PageTypeError::Missing),
        }
    }
}

// =============================================================================
// Metadata
// =============================================================================

/// Front matter of a page, as a mapping from key to string value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata(BTreeMap<String, String>);

impl Metadata {
    pub const TITLE: &'static str = "title";
    pub const CREATED: &'static str = "created";
    pub const UPDATED: &'static str = "updated";
    pub const PUBLISHED: &'static str = "published";
    pub const TYPE: &'static str = "type";
    pub const COMMENTS: &'static str = "comments";
    pub const CANONICAL: &'static str = "canonical";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn title(&self) -> Option<&str> {
        self.get(Self::TITLE)
    }

    pub fn created(&self) -> Option<&str> {
        self.get(Self::CREATED)
    }

    pub fn updated(&self) -> Option<&str> {
        self.get(Self::UPDATED)
    }

    pub fn page_type(&self) -> Option<&str> {
        self.get(Self::TYPE)
    }

    pub fn canonical(&self) -> Option<&str> {
        self.get(Self::CANONICAL)
    }

    /// Only the literal string "true" publishes a page.
    pub fn is_published(&self) -> bool {
        self.get(Self::PUBLISHED) == Some("true")
    }

    pub fn comments_enabled(&self) -> bool {
        self.get(Self::COMMENTS) == Some("true")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// =============================================================================
// Page types
// =============================================================================

/// The rendering function a page is composed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageType {
    /// Header, body, footer
    Article,
    /// An article followed by the dated list of blog posts
    BlogToc,
}

impl PageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageType::Article => "article",
            PageType::BlogToc => "blog toc",
        }
    }
}

impl std::fmt::Display for PageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PageType {
    type Err = PageTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "article" => Ok(PageType::Article),
            "blog toc" => Ok(PageType::BlogToc),
            other => Err(PageTypeError::Unknown(other.to_string())),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PageTypeError {
    #[error("no page type declared")]
    Missing,

    #[error("unknown page type '{0}'")]
    Unknown(String),
}

/// Convert a filename slug to title case.
/// "getting-started" -> "Getting Started"
/// "post_a" -> "Post A"
fn title_case(s: &str) -> String {
    s.split(['-', '_'])
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
