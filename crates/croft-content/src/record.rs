//! Normalized records and single-document loading.

use serde::Serialize;

use crate::markdown::value::{Frontmatter, FrontmatterValue};
use crate::markdown::{extract_frontmatter, Diagnostic};
use crate::schema::FieldSchema;

/// Frontmatter after alias resolution, defaults and coercion, plus the body.
///
/// Records are built once per fetched document and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    id: String,
    fields: Frontmatter,
    body: String,
}

impl NormalizedRecord {
    /// Build a record directly.
    pub fn new(id: impl Into<String>, fields: Frontmatter, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields,
            body: body.into(),
        }
    }

    /// Document identifier (the file slug).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// All normalized fields.
    pub fn fields(&self) -> &Frontmatter {
        &self.fields
    }

    /// Trimmed body text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Get a top-level field.
    pub fn get(&self, key: &str) -> Option<&FrontmatterValue> {
        self.fields.get(key)
    }

    /// Get a field by dotted path (`hero_section.title`, `litters.0.name`).
    pub fn get_path(&self, path: &str) -> Option<&FrontmatterValue> {
        self.fields.get_path(path)
    }

    /// Get a field as a string slice.
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get_path(path)?.as_str()
    }

    /// Get a numeric field.
    pub fn get_f64(&self, path: &str) -> Option<f64> {
        self.get_path(path)?.as_f64()
    }

    /// Get a numeric field as a whole number.
    pub fn get_i64(&self, path: &str) -> Option<i64> {
        self.get_f64(path).map(|n| n as i64)
    }

    /// Get a boolean field.
    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get_path(path)?.as_bool()
    }

    /// Display text for a scalar field; `None` when absent or blank.
    pub fn text(&self, path: &str) -> Option<String> {
        self.get_path(path)
            .filter(|v| !v.is_blank())
            .and_then(FrontmatterValue::to_text)
    }
}

/// A normalized record together with what the reader noticed on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    /// The record.
    pub record: NormalizedRecord,
    /// Skipped or overwritten frontmatter lines.
    pub diagnostics: Vec<Diagnostic>,
    /// Whether the document had a frontmatter block.
    pub had_frontmatter: bool,
}

/// Split, parse and normalize one raw document.
pub fn load_document(id: &str, raw: &str, schema: &FieldSchema) -> LoadedDocument {
    let extracted = extract_frontmatter(raw);
    let record = schema.normalize(id, extracted.fields(), extracted.body());
    LoadedDocument {
        record,
        had_frontmatter: extracted.had_delimiters(),
        diagnostics: extracted.diagnostics().to_vec(),
    }
}

/// Split, parse and normalize one raw document, keeping only the record.
///
/// # Example
///
/// ```rust
/// use croft_content::record::normalize_document;
/// use croft_content::schemas::animal_schema;
///
/// let record = normalize_document("daisy", "---\nname: Daisy\n---\nA doe.", &animal_schema());
/// assert_eq!(record.get_str("name"), Some("Daisy"));
/// assert_eq!(record.get_i64("order"), Some(999));
/// assert_eq!(record.body(), "A doe.");
/// ```
pub fn normalize_document(id: &str, raw: &str, schema: &FieldSchema) -> NormalizedRecord {
    load_document(id, raw, schema).record
}
