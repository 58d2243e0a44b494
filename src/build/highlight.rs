use autumnus::{HtmlLinkedBuilder, formatter::Formatter, languages::Language, themes};

/// A syntax highlighter using autumnus (tree-sitter based).
///
/// Code is emitted with CSS classes; `stylesheet` provides the matching
/// rules for the configured theme.
pub struct SyntaxHighlighter {
    theme_name: String,
}

impl SyntaxHighlighter {
    /// Create a new syntax highlighter with the given theme.
    pub fn new(theme_name: &str) -> Self {
        Self {
            theme_name: theme_name.to_string(),
        }
    }

    /// Highlight code and return HTML with CSS classes.
    /// Returns the escaped code in a plain `<pre><code>` if the language is not supported.
    pub fn highlight(&self, code: &str, language: &str) -> String {
        let lang = Language::guess(language, code);

        // Only fall back when a language was named but not recognized
        if matches!(lang, Language::PlainText)
            && !language.is_empty()
            && language != "plaintext"
            && language != "text"
        {
            return plain_code_block(code, language);
        }

        let Ok(formatter) = HtmlLinkedBuilder::new().source(code).lang(lang).build() else {
            return plain_code_block(code, language);
        };

        let mut output: Vec<u8> = Vec::new();
        if formatter.format(&mut output).is_err() {
            return plain_code_block(code, language);
        }
        String::from_utf8(output).unwrap_or_else(|_| plain_code_block(code, language))
    }

    /// CSS rules for the configured theme, or `None` if autumnus doesn't know it.
    pub fn stylesheet(&self) -> Option<String> {
        match themes::get(&self.theme_name) {
            Ok(theme) => Some(theme.css(false)),
            Err(_) => {
                log::warn!(
                    "Unknown highlight theme '{}', code blocks will be unstyled",
                    self.theme_name
                );
                None
            }
        }
    }
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new("github_light")
    }
}

/// Create a plain code block without highlighting.
fn plain_code_block(code: &str, language: &str) -> String {
    let escaped = html_escape(code);
    if language.is_empty() {
        format!("<pre><code>{}</code></pre>", escaped)
    } else {
        format!(
            "<pre><code class=\"language-{}\">{}</code></pre>",
            html_escape(language),
            escaped
        )
    }
}

/// Escape HTML special characters.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
