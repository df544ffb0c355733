//! Frontmatter extraction from content documents.
//!
//! A content document is a markdown file whose first line is `---`, followed
//! by frontmatter lines, followed by a closing `---` line:
//!
//! ```markdown
//! ---
//! title: "Lavender Goat Milk Soap"
//! price: "$8"
//! available: true
//! ---
//!
//! Made with **fresh** goat milk.
//! ```
//!
//! # Usage
//!
//! ```rust
//! use croft_content::markdown::extract_frontmatter;
//!
//! let content = "---\ntitle: Soap\n---\n\nBody";
//! let result = extract_frontmatter(content);
//!
//! assert!(result.had_delimiters());
//! assert_eq!(result.get_str("title"), Some("Soap"));
//! assert_eq!(result.body(), "Body");
//! ```

use croft_core::{Error, Result};

use super::value::Frontmatter;
use super::yaml::{parse_frontmatter, Diagnostic};

const DELIMITER: &str = "---";

/// A document cut into its frontmatter block and body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitDocument<'a> {
    /// Text strictly between the delimiter lines; empty without delimiters.
    pub frontmatter: &'a str,
    /// Text after the closing delimiter, trimmed. The whole input, unchanged,
    /// when there are no delimiters.
    pub body: &'a str,
    /// Whether an opening and closing delimiter pair was found.
    pub had_delimiters: bool,
}

/// Split a raw document into frontmatter block and body.
///
/// The opening delimiter must be the very first line. A document with an
/// opening `---` but no closing one has no frontmatter.
///
/// # Example
///
/// ```rust
/// use croft_content::markdown::split_document;
///
/// let doc = split_document("---\ntitle: A\n---\n\n  Body text \n");
/// assert_eq!(doc.frontmatter, "title: A\n");
/// assert_eq!(doc.body, "Body text");
///
/// let plain = split_document("  no frontmatter ");
/// assert_eq!(plain.body, "  no frontmatter ");
/// assert!(!plain.had_delimiters);
/// ```
pub fn split_document(raw: &str) -> SplitDocument<'_> {
    match locate_block(raw) {
        Some((frontmatter, rest)) => SplitDocument {
            frontmatter,
            body: rest.trim(),
            had_delimiters: true,
        },
        None => SplitDocument {
            frontmatter: "",
            body: raw,
            had_delimiters: false,
        },
    }
}

/// Find the delimited block; returns `(block, rest_after_closing_line)`.
fn locate_block(raw: &str) -> Option<(&str, &str)> {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut lines = text.split_inclusive('\n');

    let opening = lines.next()?;
    if opening.trim_end() != DELIMITER {
        return None;
    }

    let block_start = opening.len();
    let mut offset = block_start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            return Some((&text[block_start..offset], &text[offset + line.len()..]));
        }
        offset += line.len();
    }

    log::debug!("Frontmatter opening delimiter found but no closing delimiter");
    None
}

/// Result of frontmatter extraction.
///
/// Holds the parsed fields, any authoring diagnostics, and the body.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontmatterResult<'a> {
    fields: Frontmatter,
    diagnostics: Vec<Diagnostic>,
    body: &'a str,
    had_delimiters: bool,
}

impl<'a> FrontmatterResult<'a> {
    /// Check if frontmatter delimiters were present.
    pub fn had_delimiters(&self) -> bool {
        self.had_delimiters
    }

    /// Check if any fields were read.
    pub fn has_fields(&self) -> bool {
        !self.fields.is_empty()
    }

    /// Get the parsed fields.
    pub fn fields(&self) -> &Frontmatter {
        &self.fields
    }

    /// Take ownership of the parsed fields.
    pub fn into_fields(self) -> Frontmatter {
        self.fields
    }

    /// Lines that were skipped or overwrote an earlier key.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get the body content (everything after frontmatter).
    pub fn body(&self) -> &'a str {
        self.body
    }

    /// Get a top-level string field.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get_str(key)
    }

    /// Get a top-level string list field.
    ///
    /// Returns an empty vec if the field is missing or not a sequence.
    pub fn get_string_list(&self, key: &str) -> Vec<String> {
        self.fields.get_string_list(key)
    }
}

/// Extract frontmatter from a content document.
///
/// Never fails: a document without a delimiter pair yields empty fields and
/// the whole input as body, and malformed lines are skipped (see
/// [`FrontmatterResult::diagnostics`]).
pub fn extract_frontmatter(content: &str) -> FrontmatterResult<'_> {
    let doc = split_document(content);
    let parsed = parse_frontmatter(doc.frontmatter);
    FrontmatterResult {
        fields: parsed.fields,
        diagnostics: parsed.diagnostics,
        body: doc.body,
        had_delimiters: doc.had_delimiters,
    }
}

/// Extract frontmatter, treating a missing delimiter pair as an error.
///
/// # Errors
///
/// Returns [`Error::MissingFrontmatter`] when the document does not start
/// with a `---` line or never closes the block.
pub fn require_frontmatter(content: &str) -> Result<FrontmatterResult<'_>> {
    let result = extract_frontmatter(content);
    if result.had_delimiters {
        Ok(result)
    } else {
        Err(Error::MissingFrontmatter)
    }
}

/// Strip frontmatter from content, returning only the body.
///
/// # Example
///
/// ```rust
/// use croft_content::markdown::strip_frontmatter;
///
/// assert_eq!(strip_frontmatter("---\ntitle: Test\n---\n\n# Heading"), "# Heading");
/// ```
pub fn strip_frontmatter(content: &str) -> &str {
    split_document(content).body
}

// ============================================================================
// Tests
// ============================================================================
