//! Frontmatter reading and body rendering.
//!
//! - [`value`]: the frontmatter value model
//! - [`yaml`]: the restricted YAML reader
//! - [`frontmatter`]: document splitting and extraction
//! - [`render`]: body-to-HTML rendering and excerpts
//!
//! # Example
//!
//! ```rust
//! use croft_content::markdown::extract_frontmatter;
//!
//! let content = "---\nname: Buttercup\nhero:\n  title: Hello\n---\n\nBody text";
//! let result = extract_frontmatter(content);
//!
//! assert_eq!(result.get_str("name"), Some("Buttercup"));
//! assert_eq!(
//!     result.fields().get_path("hero.title").and_then(|v| v.as_str()),
//!     Some("Hello")
//! );
//! assert_eq!(result.body(), "Body text");
//! ```

pub mod frontmatter;
pub mod render;
pub mod value;
pub mod yaml;

mod proptests;

pub use frontmatter::{
    extract_frontmatter, require_frontmatter, split_document, strip_frontmatter,
    FrontmatterResult, SplitDocument,
};
pub use render::{extract_first_paragraph, render_body_html, render_paragraphs};
pub use value::{Frontmatter, FrontmatterValue, Mapping};
pub use yaml::{parse_frontmatter, Diagnostic, DiagnosticKind, ParsedFrontmatter};
