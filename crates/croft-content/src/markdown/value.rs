//! Frontmatter value model.
//!
//! [`FrontmatterValue`] is the recursive value produced by the restricted
//! YAML reader and [`Frontmatter`] is the insertion-ordered top-level map.
//! Both serialize to plain JSON so records can be inspected or cached.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered mapping used at every level of a frontmatter tree.
pub type Mapping = IndexMap<String, FrontmatterValue>;

/// A single frontmatter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrontmatterValue {
    /// `true` / `false`.
    Bool(bool),
    /// Any decimal numeral.
    Number(f64),
    /// Everything else, quotes stripped.
    String(String),
    /// A `- item` list.
    Sequence(Vec<FrontmatterValue>),
    /// A nested section or list object.
    Mapping(Mapping),
}

impl FrontmatterValue {
    /// Get the value as a string slice, if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as a boolean, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the value as a number, if it is one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the value as a mapping, if it is one.
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Get the value as a sequence, if it is one.
    pub fn as_sequence(&self) -> Option<&[FrontmatterValue]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Look up a key when this value is a mapping.
    pub fn get(&self, key: &str) -> Option<&FrontmatterValue> {
        self.as_mapping()?.get(key)
    }

    /// Whether the value carries nothing worth displaying.
    ///
    /// Blank strings and empty containers are blank; booleans and numbers
    /// never are.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::String(s) => s.trim().is_empty(),
            Self::Sequence(items) => items.is_empty(),
            Self::Mapping(m) => m.is_empty(),
            Self::Bool(_) | Self::Number(_) => false,
        }
    }

    /// Render a scalar as display text.
    ///
    /// Whole numbers print without a fractional part. Containers have no
    /// text form.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::String(s) => Some(s.clone()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Number(n) => Some(format_number(*n)),
            Self::Sequence(_) | Self::Mapping(_) => None,
        }
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }
}

impl From<&str> for FrontmatterValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for FrontmatterValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for FrontmatterValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for FrontmatterValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for FrontmatterValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<i32> for FrontmatterValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for FrontmatterValue {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

/// Format a number the way the site shows it: `3` rather than `3.0`.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Resolve a dotted path (`hero_section.title`, `litters.0.name`) in a map.
///
/// Numeric segments index into sequences.
pub fn lookup_path<'a>(root: &'a Mapping, path: &str) -> Option<&'a FrontmatterValue> {
    let mut segments = path.split('.');
    let mut current = root.get(segments.next()?)?;
    for segment in segments {
        current = match current {
            FrontmatterValue::Mapping(m) => m.get(segment)?,
            FrontmatterValue::Sequence(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Insertion-ordered top-level frontmatter fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Frontmatter(Mapping);

impl Frontmatter {
    /// Create an empty frontmatter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a top-level field.
    pub fn get(&self, key: &str) -> Option<&FrontmatterValue> {
        self.0.get(key)
    }

    /// Get a field by dotted path.
    pub fn get_path(&self, path: &str) -> Option<&FrontmatterValue> {
        lookup_path(&self.0, path)
    }

    /// Get a top-level string field.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key)?.as_str()
    }

    /// Get a top-level list of strings; empty if missing or not a list.
    pub fn get_string_list(&self, key: &str) -> Vec<String> {
        self.get(key)
            .and_then(|v| v.as_sequence())
            .map(|items| items.iter().filter_map(|item| item.to_text()).collect())
            .unwrap_or_default()
    }

    /// Insert a field, returning the previous value if the key existed.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<FrontmatterValue>,
    ) -> Option<FrontmatterValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Check whether a top-level key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of top-level fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate fields in document order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, FrontmatterValue> {
        self.0.iter()
    }

    /// Borrow the underlying map.
    pub fn as_map(&self) -> &Mapping {
        &self.0
    }

    /// Take the underlying map.
    pub fn into_inner(self) -> Mapping {
        self.0
    }
}

impl From<Mapping> for Frontmatter {
    fn from(map: Mapping) -> Self {
        Self(map)
    }
}

impl<'a> IntoIterator for &'a Frontmatter {
    type Item = (&'a String, &'a FrontmatterValue);
    type IntoIter = indexmap::map::Iter<'a, String, FrontmatterValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
