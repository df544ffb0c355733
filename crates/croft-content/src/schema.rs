//! Field schemas: alias resolution, defaults and type coercion.
//!
//! A [`FieldSchema`] lists the logical fields a page cares about. Each
//! [`FieldSpec`] names the canonical key, any legacy keys the CMS used to
//! write, the default to use when none is present, and how to coerce the
//! raw value.
//!
//! # Example
//!
//! ```rust
//! use croft_content::markdown::extract_frontmatter;
//! use croft_content::schema::{Coercion, FieldSchema, FieldSpec};
//!
//! let schema = FieldSchema::new()
//!     .field(FieldSpec::new("photo").alias("featured_image").with_default("placeholder.jpg"))
//!     .field(FieldSpec::new("price").coerce(Coercion::FloatCurrency).with_default(0));
//!
//! let doc = extract_frontmatter("---\nfeatured_image: x.jpg\nprice: \"$1,270\"\n---\n");
//! let record = schema.normalize("buttercup", doc.fields(), doc.body());
//!
//! assert_eq!(record.get_str("photo"), Some("x.jpg"));
//! assert_eq!(record.get_f64("price"), Some(1270.0));
//! ```

use std::collections::HashSet;

use crate::markdown::value::{Frontmatter, FrontmatterValue, Mapping};
use crate::record::NormalizedRecord;

/// How a raw frontmatter value is converted for a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Coercion {
    /// Whole number; fractions are truncated, anything non-numeric is `0`.
    Int,
    /// Number that may be written as money (`$1,270.50`); failures are `0`.
    FloatCurrency,
    /// Boolean; `true`/`yes`/`on`/`1` and nonzero numbers are `true`.
    Bool,
    /// Display text; numbers and booleans are formatted.
    String,
    /// Value kept exactly as parsed (mappings and lists included).
    #[default]
    Raw,
}

impl Coercion {
    /// Apply this coercion to a value.
    pub fn apply(self, field: &str, value: &FrontmatterValue) -> FrontmatterValue {
        match self {
            Self::Raw => value.clone(),
            Self::Int => FrontmatterValue::Number(to_number(field, value, false).trunc()),
            Self::FloatCurrency => FrontmatterValue::Number(to_number(field, value, true)),
            Self::Bool => FrontmatterValue::Bool(to_bool(value)),
            Self::String => match value.to_text() {
                Some(text) => FrontmatterValue::String(text),
                None => {
                    log::debug!("field '{field}': {} has no text form", value.kind());
                    FrontmatterValue::String(String::new())
                }
            },
        }
    }
}

fn to_number(field: &str, value: &FrontmatterValue, currency: bool) -> f64 {
    let parsed = match value {
        FrontmatterValue::Number(n) => Some(*n),
        FrontmatterValue::String(s) => {
            let cleaned: String = if currency {
                s.chars()
                    .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
                    .collect()
            } else {
                s.trim().to_string()
            };
            cleaned.parse::<f64>().ok()
        }
        _ => None,
    };

    match parsed {
        Some(n) if n.is_finite() => n,
        _ => {
            log::debug!("field '{field}': cannot read {value:?} as a number, using 0");
            0.0
        }
    }
}

fn to_bool(value: &FrontmatterValue) -> bool {
    match value {
        FrontmatterValue::Bool(b) => *b,
        FrontmatterValue::Number(n) => *n != 0.0,
        FrontmatterValue::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "on" | "1"
        ),
        _ => false,
    }
}

/// One logical field of a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    name: String,
    aliases: Vec<String>,
    default: Option<FrontmatterValue>,
    coerce: Coercion,
}

impl FieldSpec {
    /// A raw field with no aliases and no default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            default: None,
            coerce: Coercion::Raw,
        }
    }

    /// Add a legacy key, tried after the canonical name and earlier aliases.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Value used when no key is present.
    pub fn with_default(mut self, value: impl Into<FrontmatterValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Set the coercion.
    pub fn coerce(mut self, coercion: Coercion) -> Self {
        self.coerce = coercion;
        self
    }

    /// Canonical field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Legacy keys, in lookup order.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Default value, if any.
    pub fn default_value(&self) -> Option<&FrontmatterValue> {
        self.default.as_ref()
    }

    /// Coercion applied to present values.
    pub fn coercion(&self) -> Coercion {
        self.coerce
    }

    fn keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// First present, non-empty value among the canonical name and aliases.
    fn lookup<'a>(&self, fields: &'a Frontmatter) -> Option<(&str, &'a FrontmatterValue)> {
        self.keys().find_map(|key| {
            fields
                .get(key)
                .filter(|v| !matches!(v, FrontmatterValue::String(s) if s.trim().is_empty()))
                .map(|v| (key, v))
        })
    }

    /// Resolve this field against parsed frontmatter.
    ///
    /// Returns `None` only when nothing is present and there is no default.
    pub fn resolve(&self, fields: &Frontmatter) -> Option<FrontmatterValue> {
        match self.lookup(fields) {
            Some((key, value)) => {
                if key != self.name {
                    log::trace!("field '{}' read from legacy key '{key}'", self.name);
                }
                Some(self.coerce.apply(&self.name, value))
            }
            None => self.default.clone(),
        }
    }
}

/// An ordered set of [`FieldSpec`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSchema {
    specs: Vec<FieldSpec>,
}

impl FieldSchema {
    /// An empty schema; every field is carried through unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field.
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.specs.push(spec);
        self
    }

    /// Fields in declaration order.
    pub fn specs(&self) -> &[FieldSpec] {
        &self.specs
    }

    /// Look up a field by canonical name.
    pub fn spec(&self, name: &str) -> Option<&FieldSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    /// Normalize parsed frontmatter into a record.
    ///
    /// Schema fields come first, in declaration order, under their canonical
    /// names. Keys the schema does not mention (as a name or an alias)
    /// follow unchanged, in document order. `body` is stored trimmed.
    pub fn normalize(&self, id: impl Into<String>, fields: &Frontmatter, body: &str) -> NormalizedRecord {
        let mut out = Mapping::new();
        let mut claimed: HashSet<&str> = HashSet::new();

        for spec in &self.specs {
            claimed.extend(spec.keys());
            if let Some(value) = spec.resolve(fields) {
                out.insert(spec.name.clone(), value);
            }
        }

        for (key, value) in fields {
            if !claimed.contains(key.as_str()) && !out.contains_key(key) {
                out.insert(key.clone(), value.clone());
            }
        }

        NormalizedRecord::new(id, Frontmatter::from(out), body.trim())
    }
}

// ============================================================================
// Tests
// ============================================================================
