//! Configuration type definitions.
//!
//! Every section has serde defaults, so an empty or missing config file
//! yields a usable configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// =============================================================================
// Root config
// =============================================================================

/// The full build configuration, loaded from `quire.yaml` and `QUIRE_*`
/// environment variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuireConfig {
    /// Build mode requested by the config file or `QUIRE_MODE`
    #[serde(default)]
    pub mode: BuildMode,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub blog: BlogConfig,
    #[serde(default)]
    pub comments: CommentsConfig,
    #[serde(default)]
    pub markdown: MarkdownConfig,
    /// Development-specific settings
    #[serde(default)]
    pub dev: DevConfig,
}

/// Production builds only publish pages marked `published: "true"`.
/// Development builds may include drafts and inject the live-reload script.
///
/// Config files, `QUIRE_MODE` and `--mode` accept the same spellings (see
/// the `FromStr` impl).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum BuildMode {
    #[default]
    Production,
    Development,
}

impl BuildMode {
    pub fn is_development(self) -> bool {
        matches!(self, BuildMode::Development)
    }
}

impl std::str::FromStr for BuildMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(BuildMode::Production),
            "development" | "dev" => Ok(BuildMode::Development),
            other => Err(format!(
                "unknown build mode '{other}' (expected 'production' or 'development')"
            )),
        }
    }
}

impl TryFrom<String> for BuildMode {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl std::fmt::Display for BuildMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildMode::Production => f.write_str("production"),
            BuildMode::Development => f.write_str("development"),
        }
    }
}

// =============================================================================
// Site configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_site_name")]
    pub name: String,
    /// Value of the `lang` attribute on the `<html>` element
    #[serde(default = "default_lang")]
    pub lang: String,
    /// Directory scanned for markdown sources; its path is stripped from locations
    #[serde(default = "default_source")]
    pub source: PathBuf,
    /// Output directory (defaults to the source directory)
    pub output: Option<PathBuf>,
    #[serde(default = "default_favicon")]
    pub favicon: Option<String>,
    /// Address used for the "Contact" link in every page footer
    pub contact_email: Option<String>,
    /// Top navigation links
    #[serde(default = "default_nav")]
    pub nav: Vec<NavLinkConfig>,
}

fn default_site_name() -> String {
    "My Site".to_string()
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_source() -> PathBuf {
    PathBuf::from("dist")
}

fn default_favicon() -> Option<String> {
    Some("/favicon.png".to_string())
}

fn default_nav() -> Vec<NavLinkConfig> {
    vec![
        NavLinkConfig {
            title: "About".to_string(),
            url: "/".to_string(),
        },
        NavLinkConfig {
            title: "Blog".to_string(),
            url: "/blog".to_string(),
        },
    ]
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            lang: default_lang(),
            source: default_source(),
            output: None,
            favicon: default_favicon(),
            contact_email: None,
            nav: default_nav(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLinkConfig {
    pub title: String,
    pub url: String,
}

// =============================================================================
// Blog configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogConfig {
    /// Location prefix of the pages listed by a `blog toc` page
    #[serde(default = "default_blog_prefix")]
    pub prefix: String,
    /// Granularity of the date headings in the blog table of contents
    #[serde(default)]
    pub group_by: DateGrouping,
}

fn default_blog_prefix() -> String {
    "blog/".to_string()
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            prefix: default_blog_prefix(),
            group_by: DateGrouping::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateGrouping {
    Month,
    #[default]
    Year,
}

// =============================================================================
// Comments configuration
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentsConfig {
    /// Disqus site shortname; the widget is only embedded when this is set
    pub disqus_shortname: Option<String>,
}

// =============================================================================
// Markdown configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkdownConfig {
    /// Extensions to enable for markdown processing
    #[serde(default = "default_markdown_extensions")]
    pub extensions: Vec<String>,
    /// Level that a top-level `#` heading is rendered at.
    /// The page title already occupies `<h1>`.
    #[serde(default = "default_heading_level_start")]
    pub heading_level_start: u8,
    /// Autumnus theme used for code block CSS
    #[serde(default = "default_highlight_theme")]
    pub highlight_theme: String,
}

fn default_markdown_extensions() -> Vec<String> {
    vec![
        "footnotes".to_string(),
        "heading_attributes".to_string(),
        "strikethrough".to_string(),
        "tables".to_string(),
        "tasklists".to_string(),
    ]
}

fn default_heading_level_start() -> u8 {
    2
}

fn default_highlight_theme() -> String {
    "github_light".to_string()
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            extensions: default_markdown_extensions(),
            heading_level_start: default_heading_level_start(),
            highlight_theme: default_highlight_theme(),
        }
    }
}

// =============================================================================
// Development configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevConfig {
    /// Include pages that are not published when building in development mode
    #[serde(default = "default_true")]
    pub include_unpublished: bool,
    /// Inject the live reload script when building in development mode
    #[serde(default = "default_true")]
    pub live_reload: bool,
    #[serde(default = "default_live_reload_script")]
    pub live_reload_script: String,
}

fn default_true() -> bool {
    true
}

fn default_live_reload_script() -> String {
    "http://localhost:35729/livereload.js".to_string()
}

impl Default for DevConfig {
    fn default() -> Self {
        Self {
            include_unpublished: true,
            live_reload: true,
            live_reload_script: default_live_reload_script(),
        }
    }
}
