//! Page state carried through the pipeline.

use crate::build::page::{Page, PageType};

use super::PipelineError;

/// A page being processed through the pipeline.
///
/// Borrows the converted page and adds the state that evolves through
/// the stages:
///
/// 1. Initially: `output_html` = None
/// 2. After template: `output_html` = final page HTML
/// 3. After write: the HTML is on disk
#[derive(Debug)]
pub struct ProcessingPage<'a> {
    pub page: &'a Page,

    /// Renderer selected from the page's `type`
    pub page_type: PageType,

    /// Final HTML output after template rendering.
    pub output_html: Option<String>,

    /// Non-fatal problems found while processing (already logged).
    pub warnings: Vec<String>,
}

impl<'a> ProcessingPage<'a> {
    /// Resolve the page's renderer. Fails for a missing or unknown `type`.
    pub fn new(page: &'a Page) -> Result<Self, PipelineError> {
        let page_type = page
            .page_type()
            .map_err(|source| PipelineError::PageType {
                location: page.location.clone(),
                source,
            })?;

        Ok(Self {
            page,
            page_type,
            output_html: None,
            warnings: Vec::new(),
        })
    }

    /// Get the page's location (for output paths and log lines).
    pub fn location(&self) -> &str {
        &self.page.location
    }
}
