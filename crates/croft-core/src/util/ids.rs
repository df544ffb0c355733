//! Slug and ID utilities.
//!
//! Content documents are addressed by their file stem (the slug), exactly as
//! written on disk. Display identifiers such as cart ids and category slugs
//! are derived with [`normalize_id`].

use std::path::Path;

/// Normalize an identifier to lowercase kebab-case.
///
/// Performs the following transformations:
/// 1. Trims leading/trailing whitespace
/// 2. Converts to lowercase
/// 3. Replaces underscores with hyphens
/// 4. Collapses multiple whitespace into single hyphens
///
/// # Examples
///
/// ```
/// use croft_core::util::ids::normalize_id;
///
/// assert_eq!(normalize_id("Goat Milk Soap"), "goat-milk-soap");
/// assert_eq!(normalize_id("barn_cats"), "barn-cats");
/// assert_eq!(normalize_id("  Mixed   Case  "), "mixed-case");
/// ```
pub fn normalize_id(id: &str) -> String {
    id.trim()
        .to_lowercase()
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join("-")
}

/// Extract the slug of a content file: its file stem, unchanged.
///
/// The slug is what the site uses to request the document again, so it is
/// not normalized.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use croft_core::util::ids::slug_from_path;
///
/// assert_eq!(
///     slug_from_path(Path::new("content/products/Lavender-Soap.md")),
///     Some("Lavender-Soap".to_string())
/// );
/// assert_eq!(slug_from_path(Path::new("/")), None);
/// ```
pub fn slug_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(String::from)
}

/// Check whether a path names a markdown content file.
///
/// Only the exact `.md` extension counts, since documents are fetched back
/// as `<id>.md`.
pub fn is_markdown(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("md")
}
