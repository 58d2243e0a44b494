//! Page template rendering stage.
//!
//! Dispatches every page to the renderer for its type, wrapping its body in
//! the shared header and footer.

use crate::build::blog::build_blog_toc;
use crate::build::dates::{display_date, parse_date};
use crate::build::page::{Page, PageType};
use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingPage, Stage};
use crate::build::render::{PageContext, PageInfo};

/// Stage that renders each page's final HTML.
///
/// After this stage, `doc.output_html` contains the complete HTML document
/// and `doc.warnings` lists anything that was logged along the way.
pub struct TemplateStage;

impl Stage for TemplateStage {
    fn name(&self) -> &'static str {
        "template"
    }

    fn process(
        &self,
        docs: &mut [ProcessingPage<'_>],
        ctx: &PipelineContext<'_>,
    ) -> Result<(), PipelineError> {
        for doc in docs {
            log::info!("Rendering '{}' of type '{}'", doc.location(), doc.page_type);

            let mut warnings = Vec::new();
            let page_context = PageContext {
                site: ctx.site.clone(),
                page: page_info(doc.page, ctx, &mut warnings),
                content: doc.page.html.clone(),
                build: ctx.build.clone(),
            };

            let html = match doc.page_type {
                PageType::Article => ctx.renderer.render_article(&page_context)?,
                PageType::BlogToc => {
                    let toc = build_blog_toc(ctx.pages, ctx.blog, &mut warnings);
                    ctx.renderer.render_blog_toc(&page_context, &toc)?
                }
            };

            for warning in &warnings {
                log::warn!("{}", warning);
            }
            doc.output_html = Some(html);
            doc.warnings.extend(warnings);
        }

        Ok(())
    }
}

fn page_info(page: &Page, ctx: &PipelineContext<'_>, warnings: &mut Vec<String>) -> PageInfo {
    let comments = page.metadata.comments_enabled();
    if comments && ctx.site.disqus_shortname.is_none() {
        warnings.push(format!(
            "'{}' enables comments but no comments.disqus_shortname is configured",
            page.location
        ));
    }

    PageInfo {
        title: page.title(),
        location: page.location.clone(),
        created: page
            .metadata
            .created()
            .map(|raw| title_block_date(page, "created", raw, warnings)),
        updated: page
            .metadata
            .updated()
            .map(|raw| title_block_date(page, "updated", raw, warnings)),
        canonical: page.metadata.canonical().map(str::to_string),
        comments: comments && ctx.site.disqus_shortname.is_some(),
    }
}

/// Dates that don't parse are shown as written.
fn title_block_date(page: &Page, key: &str, raw: &str, warnings: &mut Vec<String>) -> String {
    match parse_date(raw) {
        Ok(date) => display_date(date),
        Err(e) => {
            warnings.push(format!(
                "'{}' has an invalid {} date: {}",
                page.location, key, e
            ));
            raw.to_string()
        }
    }
}
