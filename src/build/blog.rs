//! Blog table of contents.
//!
//! A `blog toc` page lists every article under the blog prefix, newest first,
//! under one heading per month or year.

use chrono::NaiveDate;
use serde::Serialize;

use super::dates::{group_label, parse_date};
use super::page::{Page, PageType};
use super::paths::location_to_url;
use crate::config::BlogConfig;

/// Heading for entries without a usable `created` date.
pub const UNKNOWN_GROUP: &str = "Unknown";

/// Consecutive entries sharing a date heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocGroup {
    pub heading: String,
    pub entries: Vec<TocLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocLink {
    pub title: String,
    pub url: String,
}

/// Build the grouped entry list from the full page collection.
///
/// Works on its own ordering of references; `pages` is left untouched.
/// Entries without a usable date are reported in `warnings`.
pub fn build_blog_toc(
    pages: &[Page],
    config: &BlogConfig,
    warnings: &mut Vec<String>,
) -> Vec<TocGroup> {
    let mut entries: Vec<(Option<NaiveDate>, &Page)> = pages
        .iter()
        .filter(|page| page.location.starts_with(&config.prefix))
        .filter(|page| matches!(page.page_type(), Ok(PageType::Article)))
        .map(|page| (created_date(page, warnings), page))
        .collect();

    // Newest first; undated entries sort last. Ties are broken by location.
    entries.sort_by(|(a_date, a), (b_date, b)| {
        b_date.cmp(a_date).then_with(|| a.location.cmp(&b.location))
    });

    let mut groups: Vec<TocGroup> = Vec::new();
    for (date, page) in entries {
        let heading = date
            .map(|date| group_label(date, config.group_by))
            .unwrap_or_else(|| UNKNOWN_GROUP.to_string());
        let link = TocLink {
            title: page.title(),
            url: location_to_url(&page.location),
        };

        match groups.last_mut() {
            Some(group) if group.heading == heading => group.entries.push(link),
            _ => groups.push(TocGroup {
                heading,
                entries: vec![link],
            }),
        }
    }

    groups
}

fn created_date(page: &Page, warnings: &mut Vec<String>) -> Option<NaiveDate> {
    let Some(raw) = page.metadata.created() else {
        warnings.push(format!(
            "'{}' has no created date, listing it under '{}'",
            page.location, UNKNOWN_GROUP
        ));
        return None;
    };

    match parse_date(raw) {
        Ok(date) => Some(date),
        Err(e) => {
            warnings.push(format!(
                "'{}' has an invalid created date ({}), listing it under '{}'",
                page.location, e, UNKNOWN_GROUP
            ));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::config::DateGrouping;

    fn make_page(location: &str, page_type: &str, created: Option<&str>) -> Page {
        let mut metadata: crate::build::page::Metadata =
            [("type", page_type), ("title", location)].into_iter().collect();
        if let Some(created) = created {
            metadata.insert("created", created);
        }
        Page {
            source_path: PathBuf::from(format!("{location}.md")),
            location: location.to_string(),
            raw_markdown: String::new(),
            html: String::new(),
            metadata,
        }
    }

    fn config(group_by: DateGrouping) -> BlogConfig {
        BlogConfig {
            prefix: "blog/".to_string(),
            group_by,
        }
    }

    fn urls(groups: &[TocGroup]) -> Vec<&str> {
        groups
            .iter()
            .flat_map(|g| g.entries.iter().map(|e| e.url.as_str()))
            .collect()
    }

    #[test]
    fn test_entries_are_newest_first() {
        let pages = vec![
            make_page("blog/jan", "article", Some("2024-01-01")),
            make_page("blog/june", "article", Some("2023-06-01")),
            make_page("blog/march", "article", Some("2024-03-01")),
        ];

        let groups = build_blog_toc(&pages, &config(DateGrouping::Year), &mut Vec::new());

        assert_eq!(urls(&groups), vec!["/blog/march", "/blog/jan", "/blog/june"]);
    }

    #[test]
    fn test_shared_collection_keeps_its_order() {
        let pages = vec![
            make_page("blog/old", "article", Some("2020-01-01")),
            make_page("blog/new", "article", Some("2024-01-01")),
        ];

        build_blog_toc(&pages, &config(DateGrouping::Year), &mut Vec::new());

        assert_eq!(pages[0].location, "blog/old");
        assert_eq!(pages[1].location, "blog/new");
    }

    #[test]
    fn test_one_heading_per_year() {
        let pages = vec![
            make_page("blog/a", "article", Some("2024-01-01")),
            make_page("blog/b", "article", Some("2024-03-01")),
            make_page("blog/c", "article", Some("2023-06-01")),
        ];

        let groups = build_blog_toc(&pages, &config(DateGrouping::Year), &mut Vec::new());

        let headings: Vec<_> = groups.iter().map(|g| g.heading.as_str()).collect();
        assert_eq!(headings, vec!["2024", "2023"]);
        assert_eq!(groups[0].entries.len(), 2);
    }

    #[test]
    fn test_one_heading_per_month() {
        let pages = vec![
            make_page("blog/a", "article", Some("2024-01-01")),
            make_page("blog/b", "article", Some("2024-01-20")),
            make_page("blog/c", "article", Some("2024-03-01")),
        ];

        let groups = build_blog_toc(&pages, &config(DateGrouping::Month), &mut Vec::new());

        let headings: Vec<_> = groups.iter().map(|g| g.heading.as_str()).collect();
        assert_eq!(headings, vec!["March 2024", "January 2024"]);
        assert_eq!(groups[1].entries.len(), 2);
    }

    #[test]
    fn test_only_articles_under_prefix_are_listed() {
        let pages = vec![
            make_page("blog", "blog toc", Some("2024-01-01")),
            make_page("about", "article", Some("2024-01-01")),
            make_page("blog/post", "article", Some("2024-01-01")),
        ];

        let groups = build_blog_toc(&pages, &config(DateGrouping::Year), &mut Vec::new());

        assert_eq!(urls(&groups), vec!["/blog/post"]);
    }

    #[test]
    fn test_invalid_and_missing_dates_fall_into_unknown_group() {
        let pages = vec![
            make_page("blog/broken", "article", Some("someday")),
            make_page("blog/dated", "article", Some("2024-01-01")),
            make_page("blog/undated", "article", None),
        ];

        let mut warnings = Vec::new();
        let groups = build_blog_toc(&pages, &config(DateGrouping::Year), &mut warnings);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].heading, "2024");
        assert_eq!(groups[1].heading, UNKNOWN_GROUP);
        assert_eq!(
            urls(&groups),
            vec!["/blog/dated", "/blog/broken", "/blog/undated"]
        );
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].starts_with("'blog/broken' has an invalid created date"));
        assert!(warnings[1].starts_with("'blog/undated' has no created date"));
    }

    #[test]
    fn test_dated_entries_produce_no_warnings() {
        let pages = vec![make_page("blog/a", "article", Some("2024-01-01"))];
        let mut warnings = Vec::new();

        build_blog_toc(&pages, &config(DateGrouping::Year), &mut warnings);

        assert!(warnings.is_empty());
    }

    #[test]
    fn test_no_posts() {
        let pages = vec![make_page("blog", "blog toc", None)];
        assert!(build_blog_toc(&pages, &config(DateGrouping::Year), &mut Vec::new()).is_empty());
    }
}
