//! Path and location conversion utilities.
//!
//! This module handles conversions between:
//! - Source file paths (relative to the source root)
//! - Locations (the extension-less fragment identifying a page)
//! - Output file paths and URLs derived from a location

use std::path::{Path, PathBuf};

/// Convert a source-relative markdown path to a page location.
///
/// # Examples
/// ```ignore
/// source_path_to_location("blog/post-a.md") => "blog/post-a"
/// source_path_to_location("index.md") => "index"
/// ```
pub fn source_path_to_location(path: &Path) -> String {
    let path_str = path.with_extension("").to_string_lossy().to_string();
    path_str.replace('\\', "/").trim_matches('/').to_string()
}

/// Convert a location to the HTML file it is written to.
///
/// "blog/post-a" -> "output_dir/blog/post-a.html"
pub fn location_to_output_path(location: &str, output_dir: &Path) -> PathBuf {
    output_dir.join(format!("{}.html", location.trim_start_matches('/')))
}

/// Convert a location to the site-absolute URL used in links.
///
/// "blog/post-a" -> "/blog/post-a"
pub fn location_to_url(location: &str) -> String {
    format!("/{}", location.trim_start_matches('/'))
}

/// Get the base path from a config file path (its parent directory).
pub fn base_path_from_config(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_path_to_location() {
        assert_eq!(
            source_path_to_location(Path::new("blog/post-a.md")),
            "blog/post-a"
        );
        assert_eq!(source_path_to_location(Path::new("index.md")), "index");
        assert_eq!(
            source_path_to_location(Path::new("notes/2024/x.markdown")),
            "notes/2024/x"
        );
    }

    #[test]
    fn test_source_path_to_location_keeps_inner_dots() {
        assert_eq!(
            source_path_to_location(Path::new("blog/v1.2-release.md")),
            "blog/v1.2-release"
        );
    }

    #[test]
    fn test_location_to_output_path() {
        let output = Path::new("/tmp/site");
        assert_eq!(
            location_to_output_path("blog/post-a", output),
            PathBuf::from("/tmp/site/blog/post-a.html")
        );
        assert_eq!(
            location_to_output_path("index", output),
            PathBuf::from("/tmp/site/index.html")
        );
    }

    #[test]
    fn test_location_to_url() {
        assert_eq!(location_to_url("blog/post-a"), "/blog/post-a");
        assert_eq!(location_to_url("/about"), "/about");
    }

    #[test]
    fn test_base_path_from_config() {
        assert_eq!(
            base_path_from_config(Path::new("/srv/site/quire.yaml")),
            PathBuf::from("/srv/site")
        );
    }
}
