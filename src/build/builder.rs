use std::path::PathBuf;

use crate::config::QuireConfig;

use super::format::{ConvertError, ConverterRegistry};
use super::highlight::SyntaxHighlighter;
use super::markdown::MarkdownError;
use super::page::{Page, SourceFile};
use super::pipeline::{Pipeline, PipelineContext, PipelineError, ProcessingPage};
use super::render::{BuildContext, NavLink, RenderError, Renderer, SiteContext};
use super::source::{Collector, InclusionPolicy, SourceError};

#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    #[error("invalid markdown configuration: {0}")]
    Markdown(#[from] MarkdownError),

    #[error("no converter for {0}")]
    NoConverter(PathBuf),

    #[error("failed to convert '{location}': {source}")]
    Convert {
        location: String,
        source: ConvertError,
    },

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

#[derive(Debug)]
pub struct BuildResult {
    pub output_dir: PathBuf,
    /// Pages rendered and written
    pub pages_written: usize,
    /// Pages left out by the inclusion policy
    pub skipped: usize,
}

pub struct Builder {
    config: QuireConfig,
    /// Base path for resolving relative paths (typically the config file's directory)
    base_path: PathBuf,
}

impl Builder {
    pub fn new(config: QuireConfig, base_path: PathBuf) -> Self {
        Self { config, base_path }
    }

    pub fn build(&self) -> Result<BuildResult, BuildError> {
        // Build pipeline:
        // 1. Collect sources -> SourceFile[]
        // 2. Convert each source -> Page[]
        // 3. Apply the inclusion policy
        // 4. Resolve every page's type before anything is written
        // 5. Render and write through the stage pipeline

        let dev = self.config.mode.is_development();
        log::info!("Building in {} mode", self.config.mode);

        // Step 1: Collect sources
        let registry = ConverterRegistry::with_defaults(&self.config.markdown)?;
        let source_dir = self.config.source_dir(&self.base_path);
        let sources = Collector::new(source_dir, &registry).collect()?;

        // Step 2: Convert
        let pages = sources
            .into_iter()
            .map(|source| self.convert(&registry, source))
            .collect::<Result<Vec<_>, _>>()?;

        // Step 3: Inclusion
        let total = pages.len();
        let policy = InclusionPolicy {
            include_unpublished: dev && self.config.dev.include_unpublished,
        };
        let pages = policy.apply(pages);
        let skipped = total - pages.len();

        // Step 4: Page types. An unknown type anywhere aborts the build untouched.
        let mut docs = pages
            .iter()
            .map(ProcessingPage::new)
            .collect::<Result<Vec<_>, _>>()?;

        // Step 5: Render and write
        let output_dir = self.config.output_dir(&self.base_path);
        let site = self.site_context();
        let build = BuildContext {
            live_reload_script: (dev && self.config.dev.live_reload)
                .then(|| self.config.dev.live_reload_script.clone()),
        };
        let renderer = Renderer::new()?;
        let ctx = PipelineContext::new(
            &output_dir,
            &site,
            &self.config.blog,
            &pages,
            &renderer,
            build,
        );

        Pipeline::default().run(&mut docs, &ctx)?;

        log::info!("Wrote {} page(s) to {}", docs.len(), output_dir.display());

        Ok(BuildResult {
            output_dir,
            pages_written: docs.len(),
            skipped,
        })
    }

    fn convert(&self, registry: &ConverterRegistry, source: SourceFile) -> Result<Page, BuildError> {
        let converter = registry
            .for_path(&source.source_path)
            .ok_or_else(|| BuildError::NoConverter(source.source_path.clone()))?;

        let converted = converter
            .convert(&source.raw_markdown)
            .map_err(|e| BuildError::Convert {
                location: source.location.clone(),
                source: e,
            })?;

        log::debug!(
            "Converted {} with {} ({} metadata key(s))",
            source.source_path.display(),
            converter.name(),
            converted.metadata.len()
        );
        for warning in &converted.warnings {
            log::warn!("'{}': {}", source.location, warning);
        }

        Ok(Page::from_source(source, converted.html, converted.metadata))
    }

    fn site_context(&self) -> SiteContext {
        let site = &self.config.site;
        SiteContext {
            name: site.name.clone(),
            lang: site.lang.clone(),
            favicon: site.favicon.clone(),
            contact_email: site.contact_email.clone(),
            nav: site
                .nav
                .iter()
                .map(|link| NavLink {
                    title: link.title.clone(),
                    url: link.url.clone(),
                })
                .collect(),
            disqus_shortname: self.config.comments.disqus_shortname.clone(),
            highlight_css: SyntaxHighlighter::new(&self.config.markdown.highlight_theme)
                .stylesheet(),
        }
    }
}
