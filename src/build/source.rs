use std::path::{Path, PathBuf};

use super::format::ConverterRegistry;
use super::page::{Page, SourceFile};
use super::paths::source_path_to_location;

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("source path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("source path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read directory entry in {path}: {source}")]
    ReadEntry {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot derive a page location from {0}")]
    EmptyLocation(PathBuf),
}

// =============================================================================
// Collector
// =============================================================================

/// Discovers and reads every page source under a root directory.
pub struct Collector<'a> {
    root: PathBuf,
    registry: &'a ConverterRegistry,
}

impl<'a> Collector<'a> {
    pub fn new(root: PathBuf, registry: &'a ConverterRegistry) -> Self {
        Self { root, registry }
    }

    /// Read all sources in the tree.
    ///
    /// Files are returned in path order so repeated builds see the same sequence.
    pub fn collect(&self) -> Result<Vec<SourceFile>, SourceError> {
        if !self.root.exists() {
            return Err(SourceError::PathNotFound(self.root.clone()));
        }
        if !self.root.is_dir() {
            return Err(SourceError::NotADirectory(self.root.clone()));
        }

        let mut files = Vec::new();
        self.walk_directory(&self.root, &PathBuf::new(), &mut files)?;
        log::info!("Ingested {} source file(s)", files.len());
        Ok(files)
    }

    /// Recursively walk a directory and collect page sources.
    fn walk_directory(
        &self,
        dir: &Path,
        relative_path: &Path,
        files: &mut Vec<SourceFile>,
    ) -> Result<(), SourceError> {
        let entries = std::fs::read_dir(dir).map_err(|e| SourceError::ReadDir {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let mut entries = entries
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SourceError::ReadEntry {
                path: dir.to_path_buf(),
                source: e,
            })?;
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            let file_name = entry.file_name();
            let file_name_str = file_name.to_string_lossy();

            // Skip hidden files and directories
            if file_name_str.starts_with('.') {
                continue;
            }

            if path.is_dir() && matches!(file_name_str.as_ref(), "node_modules" | "target") {
                continue;
            }

            let item_relative_path = relative_path.join(&file_name);

            if path.is_dir() {
                self.walk_directory(&path, &item_relative_path, files)?;
            } else if path.is_file() && self.registry.is_document(&path) {
                files.push(self.read_source(&path, item_relative_path)?);
            }
        }

        Ok(())
    }

    fn read_source(&self, full_path: &Path, relative_path: PathBuf) -> Result<SourceFile, SourceError> {
        log::info!("Ingesting '{}'", relative_path.display());

        let raw_markdown =
            std::fs::read_to_string(full_path).map_err(|e| SourceError::ReadFile {
                path: full_path.to_path_buf(),
                source: e,
            })?;

        let location = source_path_to_location(&relative_path);
        if location.is_empty() {
            return Err(SourceError::EmptyLocation(full_path.to_path_buf()));
        }

        Ok(SourceFile {
            source_path: relative_path,
            location,
            raw_markdown,
        })
    }
}

// =============================================================================
// Inclusion
// =============================================================================

/// Decides which converted pages make it into the output.
#[derive(Debug, Clone, Copy, Default)]
pub struct InclusionPolicy {
    /// Keep pages that are not marked `published: "true"`
    pub include_unpublished: bool,
}

impl InclusionPolicy {
    /// Drop unpublished pages unless the policy keeps them.
    pub fn apply(&self, pages: Vec<Page>) -> Vec<Page> {
        pages
            .into_iter()
            .filter(|page| {
                if page.metadata.is_published() {
                    return true;
                }
                if self.include_unpublished {
                    log::info!(
                        "Including unpublished '{}' (development build)",
                        page.location
                    );
                    true
                } else {
                    log::info!("Skipping '{}' (not marked as published)", page.location);
                    false
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::build::page::Metadata;
    use crate::config::MarkdownConfig;

    fn registry() -> ConverterRegistry {
        ConverterRegistry::with_defaults(&MarkdownConfig::default()).unwrap()
    }

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn page(location: &str, published: Option<&str>) -> Page {
        let mut metadata = Metadata::new();
        if let Some(published) = published {
            metadata.insert("published", published);
        }
        Page {
            source_path: PathBuf::from(format!("{location}.md")),
            location: location.to_string(),
            raw_markdown: String::new(),
            html: String::new(),
            metadata,
        }
    }

    #[test]
    fn test_collect_markdown_files_in_order() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "blog/post-b.md", "B");
        write(dir.path(), "blog/post-a.md", "A");
        write(dir.path(), "about.md", "About");
        write(dir.path(), "favicon.png", "not markdown");
        write(dir.path(), "blog/post-a.html", "<p>old output</p>");

        let registry = registry();
        let files = Collector::new(dir.path().to_path_buf(), &registry)
            .collect()
            .unwrap();

        let locations: Vec<_> = files.iter().map(|f| f.location.as_str()).collect();
        assert_eq!(locations, vec!["about", "blog/post-a", "blog/post-b"]);
        assert_eq!(files[1].raw_markdown, "A");
        assert_eq!(files[1].source_path, PathBuf::from("blog/post-a.md"));
    }

    #[test]
    fn test_collect_skips_hidden_and_vendor_directories() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), ".drafts/secret.md", "x");
        write(dir.path(), "node_modules/pkg/README.md", "x");
        write(dir.path(), ".hidden.md", "x");
        write(dir.path(), "index.md", "x");

        let registry = registry();
        let files = Collector::new(dir.path().to_path_buf(), &registry)
            .collect()
            .unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].location, "index");
    }

    #[test]
    fn test_collect_missing_root() {
        let dir = TempDir::new().unwrap();
        let registry = registry();
        let result = Collector::new(dir.path().join("missing"), &registry).collect();

        assert!(matches!(result, Err(SourceError::PathNotFound(_))));
    }

    #[test]
    fn test_collect_root_is_a_file() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "file.md", "x");
        let registry = registry();
        let result = Collector::new(dir.path().join("file.md"), &registry).collect();

        assert!(matches!(result, Err(SourceError::NotADirectory(_))));
    }

    #[test]
    fn test_production_policy_drops_unpublished() {
        let pages = vec![
            page("published", Some("true")),
            page("draft", Some("false")),
            page("undeclared", None),
        ];

        let kept = InclusionPolicy::default().apply(pages);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].location, "published");
    }

    #[test]
    fn test_development_policy_keeps_everything() {
        let pages = vec![page("published", Some("true")), page("draft", Some("false"))];

        let kept = InclusionPolicy {
            include_unpublished: true,
        }
        .apply(pages);

        assert_eq!(kept.len(), 2);
    }
}
