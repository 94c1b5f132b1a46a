//! Declaration extraction.
//!
//! Declarations are inline tokens of the form `{{name: value}}`:
//!
//! ```markdown
//! {{title: My Document}}
//! {{date: 2024-05-01}}
//!
//! # Document Content
//!
//! The body of the document starts here.
//! ```
//!
//! The extractor removes every declaration from the body and collects the
//! values into a [`FieldTable`]. A declaration that sits alone on its line
//! also takes its line break with it.
//!
//! # Usage
//!
//! ```rust
//! use metafield_content::fields::extract;
//!
//! let result = extract("{{title: Test}}\n\nBody");
//!
//! assert_eq!(result.body(), "Body");
//! assert_eq!(result.fields().get("title"), Some("Test"));
//! ```

use metafield_core::{FieldTable, MetaConfig, is_field_byte};

/// Result of declaration extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Body with declarations removed.
    body: String,
    /// Collected fields.
    fields: FieldTable,
    /// Number of declarations removed, counting overwritten ones.
    removed: usize,
}

impl Extraction {
    /// The cleaned body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The collected fields.
    pub fn fields(&self) -> &FieldTable {
        &self.fields
    }

    /// Number of declarations removed from the body.
    pub fn removed(&self) -> usize {
        self.removed
    }

    /// Split into the cleaned body and the field table.
    pub fn into_parts(self) -> (String, FieldTable) {
        (self.body, self.fields)
    }
}

/// Single-pass declaration scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extractor {
    trim_body: bool,
}

impl Default for Extractor {
    fn default() -> Self {
        Self { trim_body: true }
    }
}

impl Extractor {
    /// Create an extractor with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor from configuration.
    pub fn from_config(config: &MetaConfig) -> Self {
        Self {
            trim_body: config.trim_body,
        }
    }

    /// Set whether the body is trimmed after declarations are removed.
    ///
    /// Bodies without declarations are never modified.
    pub fn with_trim_body(mut self, trim_body: bool) -> Self {
        self.trim_body = trim_body;
        self
    }

    /// Extract all declarations from `content`.
    ///
    /// Removal happens on the output stream: once a declaration is cut out,
    /// the text on either side is scanned as if it had always been adjacent.
    /// That makes `{{outer{{inner:1}}:2}}` yield both fields and guarantees
    /// the returned body contains no declaration.
    ///
    /// Malformed tokens (no colon, empty name, no closing `}}`) are left in
    /// place.
    ///
    /// # Example
    ///
    /// ```rust
    /// use metafield_content::fields::Extractor;
    ///
    /// let result = Extractor::new().extract("{{x:1}}{{x:2}}");
    /// assert_eq!(result.body(), "");
    /// assert_eq!(result.fields().get("x"), Some("2"));
    ///
    /// let untouched = Extractor::new().extract("{{title Hello}}");
    /// assert_eq!(untouched.body(), "{{title Hello}}");
    /// assert!(untouched.fields().is_empty());
    /// ```
    pub fn extract(&self, content: &str) -> Extraction {
        let bytes = content.as_bytes();
        let mut out = String::with_capacity(content.len());
        let mut fields = FieldTable::new();
        let mut removed = 0;

        // Start in `out` of the trailing run of field-name bytes. When the two
        // bytes before it are `{{`, the output currently ends in an open
        // declaration whose name is `out[run_start..]`.
        let mut run_start = 0;
        // For every `{` in `out`, the value `run_start` had just before it.
        // Used to restore `run_start` after a declaration is cut.
        let mut braces: Vec<usize> = Vec::new();

        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i];
            match b {
                b':' if out.len() > run_start && opens_declaration(&out, run_start) => {
                    let value_start = i + 1;
                    let Some(rel) = content[value_start..].find("}}") else {
                        // No closing delimiter ahead, so no declaration can end
                        // anywhere in the remaining text.
                        out.push_str(&content[i..]);
                        break;
                    };
                    let close = value_start + rel;
                    let name = out[run_start..].to_string();
                    let value = content[value_start..close].trim();
                    log::trace!("Extracted field '{name}'");
                    fields.insert(name, value);
                    removed += 1;

                    // The two `{` of this declaration are the last brace records.
                    let open = run_start - 2;
                    run_start = braces.iter().rev().nth(1).copied().unwrap_or(0);
                    braces.truncate(braces.len().saturating_sub(2));
                    out.truncate(open);

                    i = close + 2;
                    if out.is_empty() || out.ends_with('\n') {
                        i += line_break_len(&bytes[i..]);
                    }
                }
                b'{' => {
                    braces.push(run_start);
                    out.push('{');
                    run_start = out.len();
                    i += 1;
                }
                b if is_field_byte(b) => {
                    let end = scan_while(bytes, i, is_field_byte);
                    out.push_str(&content[i..end]);
                    i = end;
                }
                _ => {
                    // Stop bytes are ASCII, so `end` always lands on a char boundary.
                    let end = scan_while(bytes, i + 1, |c| !is_stop_byte(c));
                    out.push_str(&content[i..end]);
                    run_start = out.len();
                    i = end;
                }
            }
        }

        if removed > 0 {
            log::debug!("Removed {removed} declaration(s), {} field(s)", fields.len());
            if self.trim_body {
                let trimmed = out.trim();
                if trimmed.len() != out.len() {
                    out = trimmed.to_string();
                }
            }
        }

        Extraction {
            body: out,
            fields,
            removed,
        }
    }
}

/// Extract declarations with the default [`Extractor`].
///
/// # Example
///
/// ```rust
/// use metafield_content::fields::extract;
///
/// let result = extract("{{title: Hello World}}\n\n# Body");
/// assert_eq!(result.body(), "# Body");
/// assert_eq!(result.fields().get("title"), Some("Hello World"));
/// ```
pub fn extract(content: &str) -> Extraction {
    Extractor::default().extract(content)
}

fn opens_declaration(out: &str, run_start: usize) -> bool {
    run_start >= 2 && &out.as_bytes()[run_start - 2..run_start] == b"{{"
}

fn is_stop_byte(b: u8) -> bool {
    b == b'{' || b == b':' || is_field_byte(b)
}

fn scan_while(bytes: &[u8], from: usize, pred: impl Fn(u8) -> bool) -> usize {
    bytes[from..]
        .iter()
        .position(|&b| !pred(b))
        .map_or(bytes.len(), |p| from + p)
}

fn line_break_len(rest: &[u8]) -> usize {
    if rest.starts_with(b"\r\n") {
        2
    } else if rest.starts_with(b"\n") {
        1
    } else {
        0
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // Basic extraction tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_extract_title_and_body() {
        let result = extract("{{title: Hello World}}\n\n# Body");

        assert_eq!(result.body(), "# Body");
        assert_eq!(result.fields().get("title"), Some("Hello World"));
        assert_eq!(result.fields().len(), 1);
        assert_eq!(result.removed(), 1);
    }

    #[test]
    fn test_extract_no_declarations() {
        let content = "  # Just Markdown\n\nNo fields here.\n";
        let result = extract(content);

        assert_eq!(result.body(), content);
        assert!(result.fields().is_empty());
        assert_eq!(result.removed(), 0);
    }

    #[test]
    fn test_later_declaration_overwrites() {
        let result = extract("{{x:1}}{{x:2}}");

        assert_eq!(result.body(), "");
        assert_eq!(result.fields().get("x"), Some("2"));
        assert_eq!(result.removed(), 2);
    }

    #[test]
    fn test_value_is_trimmed() {
        let result = extract("{{author:   Ann Lee  \t}}");
        assert_eq!(result.fields().get("author"), Some("Ann Lee"));
    }

    #[test]
    fn test_empty_value() {
        let result = extract("{{draft:}}text");
        assert_eq!(result.fields().get("draft"), Some(""));
        assert_eq!(result.body(), "text");
    }

    #[test]
    fn test_inline_declaration_removed_without_gap_marker() {
        let result = extract("Hello {{name: Bob}}world");
        assert_eq!(result.body(), "Hello world");
        assert_eq!(result.fields().get("name"), Some("Bob"));
    }

    #[test]
    fn test_value_may_contain_single_brace_and_newline() {
        let result = extract("{{snippet: fn() { x }\n more}}");
        assert_eq!(result.fields().get("snippet"), Some("fn() { x }\n more"));
        assert_eq!(result.body(), "");
    }

    // ------------------------------------------------------------------------
    // Malformed token tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_missing_colon_passes_through() {
        let result = extract("{{title Hello}}");
        assert_eq!(result.body(), "{{title Hello}}");
        assert!(result.fields().is_empty());
    }

    #[test]
    fn test_unterminated_declaration_passes_through() {
        let result = extract("{{title: never closed\n\nBody");
        assert_eq!(result.body(), "{{title: never closed\n\nBody");
        assert!(result.fields().is_empty());
    }

    #[test]
    fn test_space_before_name_not_matched() {
        let result = extract("{{ title: x}}");
        assert_eq!(result.body(), "{{ title: x}}");
        assert!(result.fields().is_empty());
    }

    #[test]
    fn test_empty_name_not_matched() {
        let result = extract("{{: x}}");
        assert_eq!(result.body(), "{{: x}}");
    }

    #[test]
    fn test_reference_form_untouched() {
        let result = extract("<h1>{{title}}</h1>");
        assert_eq!(result.body(), "<h1>{{title}}</h1>");
        assert!(result.fields().is_empty());
    }

    #[test]
    fn test_single_brace_not_matched() {
        let result = extract("{title: x}");
        assert_eq!(result.body(), "{title: x}");
    }

    // ------------------------------------------------------------------------
    // Line handling tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_meta_lines_removed_with_their_newline() {
        let result = Extractor::new()
            .with_trim_body(false)
            .extract("{{title: A}}\n{{date: B}}\nBody\n");
        assert_eq!(result.body(), "Body\n");
    }

    #[test]
    fn test_meta_line_in_middle_of_document() {
        let result = extract("Intro\n{{tag: x}}\nOutro");
        assert_eq!(result.body(), "Intro\nOutro");
    }

    #[test]
    fn test_crlf_line_break_removed() {
        let result = Extractor::new()
            .with_trim_body(false)
            .extract("Intro\r\n{{tag: x}}\r\nOutro");
        assert_eq!(result.body(), "Intro\r\nOutro");
    }

    #[test]
    fn test_token_with_text_on_line_keeps_newline() {
        let result = Extractor::new()
            .with_trim_body(false)
            .extract("a {{tag: x}}\nb");
        assert_eq!(result.body(), "a \nb");
    }

    #[test]
    fn test_several_tokens_on_one_line() {
        let result = Extractor::new()
            .with_trim_body(false)
            .extract("{{a:1}}{{b:2}}\nBody");
        assert_eq!(result.body(), "Body");
    }

    #[test]
    fn test_trim_disabled_keeps_blank_line() {
        let result = Extractor::new()
            .with_trim_body(false)
            .extract("{{title: Hello World}}\n\n# Body");
        assert_eq!(result.body(), "\n# Body");
    }

    // ------------------------------------------------------------------------
    // Adjacency tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_extra_leading_brace_kept() {
        let result = extract("{{{a:1}}");
        assert_eq!(result.body(), "{");
        assert_eq!(result.fields().get("a"), Some("1"));
    }

    #[test]
    fn test_declaration_joined_after_inner_removal() {
        let result = extract("{{outer{{inner:1}}:2}}");
        assert_eq!(result.body(), "");
        assert_eq!(result.fields().get("inner"), Some("1"));
        assert_eq!(result.fields().get("outer"), Some("2"));
    }

    #[test]
    fn test_braces_joined_after_inner_removal() {
        let result = extract("{{{{a:1}}b:2}}");
        assert_eq!(result.body(), "");
        assert_eq!(result.fields().get("b"), Some("2"));
    }

    #[test]
    fn test_first_closing_delimiter_ends_value() {
        let result = extract("{{a: x {{b:y}} tail");
        assert_eq!(result.fields().get("a"), Some("x {{b:y"));
        assert_eq!(result.body(), "tail");
    }

    // ------------------------------------------------------------------------
    // Misc
    // ------------------------------------------------------------------------

    #[test]
    fn test_unicode_values_and_body() {
        let result = extract("{{title: 音楽理論}}\n本文 — fin");
        assert_eq!(result.fields().get("title"), Some("音楽理論"));
        assert_eq!(result.body(), "本文 — fin");
    }

    #[test]
    fn test_unicode_name_not_matched() {
        let result = extract("{{título: x}}");
        assert_eq!(result.body(), "{{título: x}}");
    }

    #[test]
    fn test_extract_is_idempotent() {
        let first = extract("{{a:1}}\nText {{b: 2}} more\n{{c:3}}");
        let second = extract(first.body());
        assert_eq!(second.body(), first.body());
        assert!(second.fields().is_empty());
    }

    #[test]
    fn test_into_parts() {
        let (body, fields) = extract("{{k:v}}body").into_parts();
        assert_eq!(body, "body");
        assert_eq!(fields.get("k"), Some("v"));
    }

    #[test]
    fn test_from_config() {
        let config = MetaConfig {
            trim_body: false,
            ..MetaConfig::default()
        };
        let result = Extractor::from_config(&config).extract("{{k:v}}\n\nbody");
        assert_eq!(result.body(), "\nbody");
    }
}
