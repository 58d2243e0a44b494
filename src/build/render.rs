use serde::Serialize;
use tera::{Context, Tera};

use super::blog::TocGroup;

const BASE_TEMPLATE: &str = include_str!("../../templates/base.html");
const ARTICLE_TEMPLATE: &str = include_str!("../../templates/article.html");
const BLOG_TOC_TEMPLATE: &str = include_str!("../../templates/blog_toc.html");

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),
}

/// The template renderer, wrapping Tera.
///
/// Templates are compiled into the binary; every page shares the header and
/// footer of `base.html`.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", BASE_TEMPLATE),
            ("article.html", ARTICLE_TEMPLATE),
            ("blog_toc.html", BLOG_TOC_TEMPLATE),
        ])?;
        Ok(Self { tera })
    }

    /// Header, body, footer.
    pub fn render_article(&self, context: &PageContext) -> Result<String, RenderError> {
        let tera_context = Self::page_context(context);
        Ok(self.tera.render("article.html", &tera_context)?)
    }

    /// Header, body, the grouped blog entries, footer.
    pub fn render_blog_toc(
        &self,
        context: &PageContext,
        toc: &[TocGroup],
    ) -> Result<String, RenderError> {
        let mut tera_context = Self::page_context(context);
        tera_context.insert("toc", toc);
        Ok(self.tera.render("blog_toc.html", &tera_context)?)
    }

    fn page_context(context: &PageContext) -> Context {
        let mut tera_context = Context::new();
        tera_context.insert("site", &context.site);
        tera_context.insert("page", &context.page);
        tera_context.insert("content", &context.content);
        tera_context.insert("build", &context.build);
        tera_context
    }
}

/// Context passed to page templates.
#[derive(Debug, Serialize)]
pub struct PageContext {
    pub site: SiteContext,
    pub page: PageInfo,
    /// Body HTML of the page
    pub content: String,
    pub build: BuildContext,
}

/// Site-level information.
#[derive(Debug, Clone, Serialize)]
pub struct SiteContext {
    pub name: String,
    pub lang: String,
    pub favicon: Option<String>,
    pub contact_email: Option<String>,
    pub nav: Vec<NavLink>,
    pub disqus_shortname: Option<String>,
    /// Stylesheet for highlighted code blocks
    pub highlight_css: Option<String>,
}

/// A top navigation link.
#[derive(Debug, Clone, Serialize)]
pub struct NavLink {
    pub title: String,
    pub url: String,
}

/// Information about the current page.
#[derive(Debug, Serialize)]
pub struct PageInfo {
    pub title: String,
    pub location: String,
    /// Display form of the `created` date
    pub created: Option<String>,
    /// Display form of the `updated` date
    pub updated: Option<String>,
    pub canonical: Option<String>,
    /// Whether to embed the comment thread
    pub comments: bool,
}

/// Build mode details visible to templates.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildContext {
    /// Script injected for live reload, development builds only
    pub live_reload_script: Option<String>,
}
