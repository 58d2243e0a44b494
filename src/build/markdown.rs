//! Markdown rendering with syntax highlighting and heading ids.

use std::collections::HashSet;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};

use super::highlight::{SyntaxHighlighter, html_escape};
use crate::config::MarkdownConfig;

#[derive(thiserror::Error, Debug)]
pub enum MarkdownError {
    #[error("invalid markdown extension: {0}")]
    InvalidExtension(String),
}

/// A heading whose inner events are buffered until its end tag.
struct HeadingState<'a> {
    level: u8,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, Option<String>)>,
    inner: Vec<Event<'a>>,
    text: String,
}

/// Build parser options from extension names.
pub fn markdown_options(extensions: &[String]) -> Result<Options, MarkdownError> {
    let mut options = Options::empty();
    for extension in extensions {
        match extension.as_str() {
            "definition_lists" => options.insert(Options::ENABLE_DEFINITION_LIST),
            "footnotes" => options.insert(Options::ENABLE_FOOTNOTES),
            "gfm" => options.insert(Options::ENABLE_GFM),
            "heading_attributes" => options.insert(Options::ENABLE_HEADING_ATTRIBUTES),
            "strikethrough" => options.insert(Options::ENABLE_STRIKETHROUGH),
            "tables" => options.insert(Options::ENABLE_TABLES),
            "tasklists" => options.insert(Options::ENABLE_TASKLISTS),
            other => return Err(MarkdownError::InvalidExtension(other.to_string())),
        }
    }
    Ok(options)
}

/// Render markdown to HTML using pulldown-cmark with syntax highlighting.
///
/// Headings are shifted so that `#` renders at `heading_level_start`, and get
/// an `id` derived from their text unless one is given explicitly.
pub fn render_markdown(
    markdown: &str,
    highlighter: &SyntaxHighlighter,
    markdown_config: &MarkdownConfig,
) -> Result<String, MarkdownError> {
    let options = markdown_options(&markdown_config.extensions)?;
    let parser = Parser::new_ext(markdown, options);

    let mut in_code_block = false;
    let mut code_language = String::new();
    let mut code_content = String::new();

    let mut heading: Option<HeadingState> = None;
    let mut used_heading_ids: HashSet<String> = HashSet::new();

    let mut events: Vec<Event> = Vec::new();

    for event in parser {
        match event {
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => {
                heading = Some(HeadingState {
                    level: shift_level(level, markdown_config.heading_level_start),
                    id: id.map(|id| id.to_string()),
                    classes: classes.iter().map(|c| c.to_string()).collect(),
                    attrs: attrs
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.as_ref().map(|v| v.to_string())))
                        .collect(),
                    inner: Vec::new(),
                    text: String::new(),
                });
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(state) = heading.take() {
                    let html = render_heading(state, &mut used_heading_ids);
                    events.push(Event::Html(html.into()));
                }
            }
            Event::Start(Tag::CodeBlock(kind)) => {
                in_code_block = true;
                code_language = match kind {
                    CodeBlockKind::Fenced(lang) => lang.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                code_content.clear();
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                let highlighted = highlighter.highlight(&code_content, &code_language);
                events.push(Event::Html(highlighted.into()));
            }
            Event::Text(text) if in_code_block => {
                code_content.push_str(&text);
            }
            other => match heading.as_mut() {
                Some(state) => {
                    if let Event::Text(text) | Event::Code(text) = &other {
                        state.text.push_str(text);
                    }
                    state.inner.push(other);
                }
                None => events.push(other),
            },
        }
    }

    let mut html_output = String::new();
    html::push_html(&mut html_output, events.into_iter());

    Ok(html_output)
}

fn shift_level(level: HeadingLevel, start: u8) -> u8 {
    (level as u8 + start.saturating_sub(1)).clamp(1, 6)
}

fn render_heading(state: HeadingState, used_ids: &mut HashSet<String>) -> String {
    let id = match state.id {
        Some(explicit) => explicit,
        None => {
            let base_id = match slugify(&state.text) {
                slug if slug.is_empty() => "section".to_string(),
                slug => slug,
            };
            let mut id = base_id.clone();
            let mut suffix = 1;
            while used_ids.contains(&id) {
                id = format!("{}-{}", base_id, suffix);
                suffix += 1;
            }
            id
        }
    };
    used_ids.insert(id.clone());

    let class_attr = if state.classes.is_empty() {
        String::new()
    } else {
        format!(" class=\"{}\"", html_escape(&state.classes.join(" ")))
    };

    let extra_attrs = state
        .attrs
        .iter()
        .map(|(k, v)| match v {
            Some(val) => format!(" {}=\"{}\"", k, html_escape(val)),
            None => format!(" {}", k),
        })
        .collect::<String>();

    let mut inner = String::new();
    html::push_html(&mut inner, state.inner.into_iter());

    format!(
        "<h{level} id=\"{id}\"{class_attr}{extra_attrs}>{inner}</h{level}>\n",
        level = state.level,
        id = html_escape(&id),
    )
}

/// Convert a string to a slug suitable for use as an HTML id.
fn slugify(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .replace(' ', "-")
        .replace(|c: char| !c.is_alphanumeric() && c != '-', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(markdown: &str) -> String {
        let highlighter = SyntaxHighlighter::default();
        let config = MarkdownConfig::default();
        render_markdown(markdown, &highlighter, &config).unwrap()
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("What's New?"), "whats-new");
        assert_eq!(slugify("API Reference"), "api-reference");
    }

    #[test]
    fn test_render_basic_markdown() {
        let html = render("# Hello\n\nWorld");

        assert!(html.contains("<h2 id=\"hello\">Hello</h2>"));
        assert!(html.contains("<p>World</p>"));
    }

    #[test]
    fn test_heading_level_start_is_configurable() {
        let highlighter = SyntaxHighlighter::default();
        let config = MarkdownConfig {
            heading_level_start: 1,
            ..MarkdownConfig::default()
        };

        let html = render_markdown("# Top\n\n###### Deep", &highlighter, &config).unwrap();
        assert!(html.contains("<h1 id=\"top\">Top</h1>"));
        assert!(html.contains("<h6 id=\"deep\">Deep</h6>"));
    }

    #[test]
    fn test_shifted_headings_clamp_at_six() {
        let html = render("###### Deepest");
        assert!(html.contains("<h6 id=\"deepest\">Deepest</h6>"));
    }

    #[test]
    fn test_duplicate_heading_ids_get_suffixes() {
        let html = render("## Notes\n\n## Notes\n");
        assert!(html.contains("id=\"notes\""));
        assert!(html.contains("id=\"notes-1\""));
    }

    #[test]
    fn test_inline_markup_in_heading_is_kept() {
        let html = render("# Using `cargo` *well*");
        assert!(html.contains("<code>cargo</code>"));
        assert!(html.contains("<em>well</em>"));
        assert!(html.contains("id=\"using-cargo-well\""));
    }

    #[test]
    fn test_explicit_heading_id() {
        let html = render("# Intro {#start}");
        assert!(html.contains("id=\"start\""));
    }

    #[test]
    fn test_render_code_block() {
        let html = render("```rust\nlet x = 1;\n```");

        assert!(html.contains("let"));
        assert!(html.contains("<pre"));
    }

    #[test]
    fn test_tables_and_strikethrough() {
        let html = render("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~");
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn test_task_lists_and_footnotes() {
        let html = render("- [x] done\n- [ ] todo\n\nText[^1]\n\n[^1]: A note.");
        assert!(html.contains("type=\"checkbox\""));
        assert!(html.contains("footnote"));
    }

    #[test]
    fn test_invalid_extension() {
        let highlighter = SyntaxHighlighter::default();
        let config = MarkdownConfig {
            extensions: vec!["not_a_real_extension".to_string()],
            ..MarkdownConfig::default()
        };

        let result = render_markdown("# Test", &highlighter, &config);
        assert!(matches!(result, Err(MarkdownError::InvalidExtension(_))));
    }
}
