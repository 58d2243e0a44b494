//! Front matter extraction.
//!
//! Front matter is a block at the very start of a file, delimited either by
//! `---` lines or by `«««` / `»»»` lines:
//!
//! ```markdown
//! ---
//! title: My Page
//! created: 2024-01-10
//! published: true
//! type: article
//! ---
//!
//! # Content starts here
//! ```
//!
//! The block is read as YAML. Blocks that are not valid YAML (typically a
//! value containing an unquoted `: `) are read line by line as `key: value`.
//! Every value ends up as a string. Booleans keep the text they were written
//! with, so `published: True` stays `"True"` and does not publish a page.

use serde_yaml::Value;

use super::page::Metadata;

/// Opening delimiter and the closing line that ends the block.
const DELIMITERS: &[(&str, &str)] = &[("---", "\n---"), ("«««", "\n»»»")];

/// Result of splitting front matter from markdown content.
#[derive(Debug)]
pub struct ParsedContent {
    /// The parsed metadata (empty if none found)
    pub metadata: Metadata,
    /// The markdown content without the front matter block
    pub content: String,
    /// Problems that did not prevent parsing
    pub warnings: Vec<String>,
}

impl ParsedContent {
    fn without_front_matter(content: &str) -> Self {
        Self {
            metadata: Metadata::new(),
            content: content.to_string(),
            warnings: Vec::new(),
        }
    }
}

/// Parse front matter from markdown content.
///
/// Returns the metadata and the remaining content.
pub fn parse_front_matter(content: &str) -> ParsedContent {
    let content = content.trim_start_matches('\u{feff}');
    let candidate = content.trim_start();

    for (opening, closing) in DELIMITERS {
        let Some(after_opening) = candidate.strip_prefix(opening) else {
            continue;
        };

        // The opening delimiter must be alone on its line ("----" is a rule, not front matter)
        let first_line = after_opening.split('\n').next().unwrap_or_default();
        if !first_line.trim().is_empty() {
            continue;
        }

        let Some(closing_pos) = after_opening.find(closing) else {
            // No closing delimiter found, treat entire content as markdown
            return ParsedContent::without_front_matter(content);
        };

        let block = &after_opening[..closing_pos];

        // Skip the rest of the closing delimiter line
        let rest = &after_opening[closing_pos + closing.len()..];
        let markdown_content = match rest.find('\n') {
            Some(newline) => rest[newline + 1..].trim_start_matches(['\r', '\n']),
            None => "",
        };

        let mut warnings = Vec::new();
        let metadata = parse_block(block, &mut warnings);

        return ParsedContent {
            metadata,
            content: markdown_content.to_string(),
            warnings,
        };
    }

    ParsedContent::without_front_matter(content)
}

fn parse_block(block: &str, warnings: &mut Vec<String>) -> Metadata {
    match serde_yaml::from_str::<Value>(block) {
        Ok(Value::Null) => Metadata::new(),
        Ok(Value::Mapping(mapping)) => {
            let written = parse_lines(block);
            let mut metadata = Metadata::new();
            for (key, value) in &mapping {
                let Some(key) = scalar_to_string(key) else {
                    warnings.push("ignoring front matter entry with a non-scalar key".to_string());
                    continue;
                };
                match value {
                    Value::Null => {}
                    Value::Sequence(_) | Value::Mapping(_) => {
                        warnings.push(format!("ignoring non-scalar front matter value for '{key}'"));
                    }
                    Value::Bool(b) => {
                        // First token only: `true # note` is still `true`
                        let value = written
                            .get(&key)
                            .and_then(|text| text.split_whitespace().next())
                            .map(str::to_string)
                            .unwrap_or_else(|| b.to_string());
                        metadata.insert(key, value);
                    }
                    other => {
                        if let Some(value) = scalar_to_string(other) {
                            metadata.insert(key, value);
                        }
                    }
                }
            }
            metadata
        }
        Ok(_) => {
            warnings.push("front matter is not a key/value block, reading it line by line".to_string());
            parse_lines(block)
        }
        Err(e) => {
            warnings.push(format!(
                "failed to parse front matter as YAML ({e}), reading it line by line"
            ));
            parse_lines(block)
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Read `key: value` lines, splitting on the first colon.
fn parse_lines(block: &str) -> Metadata {
    block
        .lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim(), unquote(value.trim())))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
