//! Pipeline context for sharing state across stages.

use std::path::Path;

use crate::build::page::Page;
use crate::build::render::{BuildContext, Renderer, SiteContext};
use crate::config::BlogConfig;

/// Shared context for pipeline stages.
///
/// Everything here is read-only; stages only write to the pages they are given.
pub struct PipelineContext<'a> {
    /// Directory where output files are written
    pub output_dir: &'a Path,

    /// Site metadata (name, navigation, contact, comments)
    pub site: &'a SiteContext,

    /// Blog listing settings for `blog toc` pages
    pub blog: &'a BlogConfig,

    /// Every included page, in collection order
    pub pages: &'a [Page],

    /// Template renderer
    pub renderer: &'a Renderer,

    /// Build mode details (dev flag, live reload script)
    pub build: BuildContext,
}

impl<'a> PipelineContext<'a> {
    pub fn new(
        output_dir: &'a Path,
        site: &'a SiteContext,
        blog: &'a BlogConfig,
        pages: &'a [Page],
        renderer: &'a Renderer,
        build: BuildContext,
    ) -> Self {
        Self {
            output_dir,
            site,
            blog,
            pages,
            renderer,
            build,
        }
    }
}
