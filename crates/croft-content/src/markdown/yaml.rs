//! Restricted YAML reader for CMS frontmatter.
//!
//! The CMS writes a small, predictable subset of YAML. This reader handles
//! exactly that subset in one line-oriented pass:
//!
//! - `key: value` scalars (quotes stripped, `true`/`false` and decimal
//!   numerals coerced)
//! - `key:` opening a nested section of `  key: value` lines
//! - one further level below a section: a leaf map of scalars or a list
//! - `- item` lists of scalars and `- key: value` lists of flat objects
//! - `|` / `>` block scalars joined with newlines
//! - `[]`, `{}` and single-line `[a, b]` flow lists
//!
//! Deeper nesting is not supported. The reader never fails: lines it cannot
//! place are skipped and reported as [`Diagnostic`]s, and the fields it did
//! manage to read are returned.
//!
//! # Example
//!
//! ```rust
//! use croft_content::markdown::yaml::parse_frontmatter;
//!
//! let parsed = parse_frontmatter("title: \"Buttercup\"\navailable: true\norder: 2");
//! assert_eq!(parsed.fields.get_str("title"), Some("Buttercup"));
//! assert_eq!(parsed.fields.get("available").and_then(|v| v.as_bool()), Some(true));
//! assert_eq!(parsed.fields.get("order").and_then(|v| v.as_f64()), Some(2.0));
//! assert!(parsed.diagnostics.is_empty());
//! ```

use std::fmt;

use super::value::{Frontmatter, FrontmatterValue, Mapping};

/// Output of [`parse_frontmatter`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedFrontmatter {
    /// Everything that could be read.
    pub fields: Frontmatter,
    /// Lines that were skipped or overwrote an earlier key.
    pub diagnostics: Vec<Diagnostic>,
}

/// Why a frontmatter line was not taken at face value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// No `key: value` shape and not a list item.
    Unparseable,
    /// Key contains characters outside `[A-Za-z0-9_]`.
    InvalidKey,
    /// Indented line with no open section to belong to.
    Orphaned,
    /// Key already present at this level; the later value won.
    Overwritten,
    /// Nesting deeper than the reader supports.
    TooDeep,
    /// List items and keys mixed under the same parent.
    MixedContainer,
}

/// A single authoring problem found while reading frontmatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line number within the frontmatter block.
    pub line: usize,
    /// What happened.
    pub kind: DiagnosticKind,
    /// The offending line, trimmed.
    pub text: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            DiagnosticKind::Unparseable => "skipped unparseable line",
            DiagnosticKind::InvalidKey => "skipped invalid key",
            DiagnosticKind::Orphaned => "skipped indented line outside a section",
            DiagnosticKind::Overwritten => "overwrote duplicate key",
            DiagnosticKind::TooDeep => "skipped nesting deeper than supported",
            DiagnosticKind::MixedContainer => "skipped line mixing list items and keys",
        };
        write!(f, "line {}: {what}: {}", self.line, self.text)
    }
}

/// Parse a frontmatter block (the text between the `---` delimiters).
pub fn parse_frontmatter(block: &str) -> ParsedFrontmatter {
    let mut reader = BlockReader::default();
    for (index, line) in block.lines().enumerate() {
        reader.feed(index + 1, line);
    }
    reader.finish()
}

// ============================================================================
// Reader state
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Seg {
    Key(String),
    Index(usize),
}

type NodePath = Vec<Seg>;

/// An open `key:` whose children are indented below it.
struct Scope {
    path: NodePath,
    indent: usize,
}

/// The list most recently appended to.
struct ListScope {
    path: NodePath,
    marker_indent: usize,
}

/// A `|` or `>` value being collected.
struct BlockScalar {
    parent: NodePath,
    key: String,
    owner_indent: usize,
    indent: Option<usize>,
    lines: Vec<String>,
    start_line: usize,
}

enum ValueKind {
    Container,
    Block,
    Scalar(FrontmatterValue),
}

#[derive(Default)]
struct BlockReader {
    root: Mapping,
    diagnostics: Vec<Diagnostic>,
    section: Option<Scope>,
    leaf: Option<Scope>,
    list: Option<ListScope>,
    block: Option<BlockScalar>,
    skip_deeper_than: Option<usize>,
}

impl BlockReader {
    fn feed(&mut self, line_no: usize, line: &str) {
        if let Some(block) = self.block.as_mut() {
            if line.trim().is_empty() {
                block.lines.push(String::new());
                return;
            }
            let indent = indent_of(line);
            if indent > block.owner_indent && block.indent.is_none_or(|b| indent >= b) {
                let cut = *block.indent.get_or_insert(indent);
                block.lines.push(line[cut..].to_string());
                return;
            }
            // Dedent closes the block; the line is then read normally.
            self.close_block();
        }

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return;
        }

        let indent = indent_of(line);
        if let Some(limit) = self.skip_deeper_than {
            if indent > limit {
                self.note(line_no, DiagnosticKind::TooDeep, trimmed);
                return;
            }
            self.skip_deeper_than = None;
        }

        if let Some(rest) = list_marker(trimmed) {
            let key_column = indent + (trimmed.len() - rest.len());
            self.list_item(line_no, indent, key_column, trimmed, rest);
            return;
        }

        match split_key(trimmed) {
            Some((key, _)) if !is_word(key) => {
                self.note(line_no, DiagnosticKind::InvalidKey, trimmed);
            }
            Some((key, value)) if indent == 0 => self.top_key(line_no, key, value),
            Some((key, value)) => self.nested_key(line_no, indent, key, value),
            None => self.note(line_no, DiagnosticKind::Unparseable, trimmed),
        }
    }

    fn top_key(&mut self, line_no: usize, key: &str, value: &str) {
        self.section = None;
        self.leaf = None;
        self.list = None;

        match classify(value) {
            ValueKind::Container => {
                self.insert(line_no, &[], key, FrontmatterValue::Mapping(Mapping::new()));
                self.section = Some(Scope {
                    path: vec![Seg::Key(key.to_string())],
                    indent: 0,
                });
            }
            ValueKind::Block => self.open_block(line_no, Vec::new(), key, 0),
            ValueKind::Scalar(v) => self.insert(line_no, &[], key, v),
        }
    }

    fn nested_key(&mut self, line_no: usize, indent: usize, key: &str, value: &str) {
        // Property of the object most recently pushed onto a list.
        if let Some(list) = &self.list {
            if indent > list.marker_indent {
                let list_path = list.path.clone();
                match self.last_object_index(&list_path) {
                    Some(index) => {
                        let mut parent = list_path;
                        parent.push(Seg::Index(index));
                        self.leaf_value(line_no, indent, parent, key, value);
                    }
                    None => self.note(line_no, DiagnosticKind::MixedContainer, key),
                }
                return;
            }
        }

        // Entry of an open leaf map.
        if let Some(leaf) = &self.leaf {
            if indent > leaf.indent {
                let parent = leaf.path.clone();
                self.leaf_value(line_no, indent, parent, key, value);
                return;
            }
        }

        let Some(section) = &self.section else {
            self.note(line_no, DiagnosticKind::Orphaned, key);
            return;
        };
        let parent = section.path.clone();
        self.leaf = None;
        self.list = None;

        match classify(value) {
            ValueKind::Container => {
                self.insert(line_no, &parent, key, FrontmatterValue::Mapping(Mapping::new()));
                let mut path = parent;
                path.push(Seg::Key(key.to_string()));
                self.leaf = Some(Scope { path, indent });
            }
            ValueKind::Block => self.open_block(line_no, parent, key, indent),
            ValueKind::Scalar(v) => self.insert(line_no, &parent, key, v),
        }
    }

    /// A value at the deepest supported level: scalars and block scalars only.
    fn leaf_value(
        &mut self,
        line_no: usize,
        indent: usize,
        parent: NodePath,
        key: &str,
        value: &str,
    ) {
        match classify(value) {
            ValueKind::Container => {
                self.note(line_no, DiagnosticKind::TooDeep, key);
                self.skip_deeper_than = Some(indent);
            }
            ValueKind::Block => self.open_block(line_no, parent, key, indent),
            ValueKind::Scalar(v) => self.insert(line_no, &parent, key, v),
        }
    }

    fn list_item(
        &mut self,
        line_no: usize,
        indent: usize,
        key_column: usize,
        trimmed: &str,
        rest: &str,
    ) {
        if self.list.as_ref().is_some_and(|l| indent > l.marker_indent) {
            self.note(line_no, DiagnosticKind::TooDeep, trimmed);
            return;
        }

        let owner = match (&self.list, &self.leaf, &self.section) {
            (Some(list), _, _) if indent == list.marker_indent => Some(list.path.clone()),
            (_, Some(leaf), _) if indent > leaf.indent => Some(leaf.path.clone()),
            (_, _, Some(section)) => Some(section.path.clone()),
            _ => None,
        };
        let Some(owner) = owner else {
            self.note(line_no, DiagnosticKind::Orphaned, trimmed);
            return;
        };

        let object_key = split_object_key(rest).filter(|(key, _)| is_word(key));
        let item = match object_key {
            Some((key, value)) => {
                let mut object = Mapping::new();
                match classify(value) {
                    ValueKind::Scalar(v) => {
                        object.insert(key.to_string(), v);
                    }
                    ValueKind::Container => {
                        self.note(line_no, DiagnosticKind::TooDeep, trimmed);
                        self.skip_deeper_than = Some(key_column);
                    }
                    ValueKind::Block => {}
                }
                FrontmatterValue::Mapping(object)
            }
            None if rest.is_empty() => {
                self.note(line_no, DiagnosticKind::TooDeep, trimmed);
                self.skip_deeper_than = Some(indent);
                return;
            }
            None => parse_scalar(rest),
        };

        let pushed = match node_mut(&mut self.root, &owner) {
            Some(node) => {
                if matches!(node, FrontmatterValue::Mapping(m) if m.is_empty()) {
                    *node = FrontmatterValue::Sequence(Vec::new());
                }
                match node {
                    FrontmatterValue::Sequence(items) => {
                        items.push(item);
                        Some(items.len() - 1)
                    }
                    _ => None,
                }
            }
            None => None,
        };

        let Some(index) = pushed else {
            self.note(line_no, DiagnosticKind::MixedContainer, trimmed);
            return;
        };

        if let Some((key, value)) = object_key {
            if matches!(classify(value), ValueKind::Block) {
                let mut parent = owner.clone();
                parent.push(Seg::Index(index));
                self.open_block(line_no, parent, key, key_column);
            }
        }

        self.list = Some(ListScope {
            path: owner,
            marker_indent: indent,
        });
    }

    fn open_block(&mut self, line_no: usize, parent: NodePath, key: &str, owner_indent: usize) {
        self.block = Some(BlockScalar {
            parent,
            key: key.to_string(),
            owner_indent,
            indent: None,
            lines: Vec::new(),
            start_line: line_no,
        });
    }

    fn close_block(&mut self) {
        if let Some(block) = self.block.take() {
            let text = block.lines.join("\n").trim().to_string();
            self.insert(
                block.start_line,
                &block.parent,
                &block.key,
                FrontmatterValue::String(text),
            );
        }
    }

    fn insert(&mut self, line_no: usize, parent: &[Seg], key: &str, value: FrontmatterValue) {
        let target = if parent.is_empty() {
            Some(&mut self.root)
        } else {
            match node_mut(&mut self.root, parent) {
                Some(FrontmatterValue::Mapping(m)) => Some(m),
                _ => None,
            }
        };

        let replaced = target.map(|map| map.insert(key.to_string(), value).is_some());
        match replaced {
            Some(true) => self.note(line_no, DiagnosticKind::Overwritten, key),
            Some(false) => {}
            None => self.note(line_no, DiagnosticKind::MixedContainer, key),
        }
    }

    fn last_object_index(&mut self, path: &[Seg]) -> Option<usize> {
        match node_mut(&mut self.root, path)? {
            FrontmatterValue::Sequence(items) => match items.last()? {
                FrontmatterValue::Mapping(_) => Some(items.len() - 1),
                _ => None,
            },
            _ => None,
        }
    }

    fn note(&mut self, line: usize, kind: DiagnosticKind, text: &str) {
        log::debug!("frontmatter line {line}: {kind:?}: {text}");
        self.diagnostics.push(Diagnostic {
            line,
            kind,
            text: text.to_string(),
        });
    }

    fn finish(mut self) -> ParsedFrontmatter {
        self.close_block();
        ParsedFrontmatter {
            fields: Frontmatter::from(self.root),
            diagnostics: self.diagnostics,
        }
    }
}

// ============================================================================
// Line helpers
// ============================================================================

fn node_mut<'a>(root: &'a mut Mapping, path: &[Seg]) -> Option<&'a mut FrontmatterValue> {
    let (first, rest) = path.split_first()?;
    let Seg::Key(key) = first else {
        return None;
    };
    let mut current = root.get_mut(key)?;
    for seg in rest {
        current = match (seg, current) {
            (Seg::Key(k), FrontmatterValue::Mapping(m)) => m.get_mut(k)?,
            (Seg::Index(i), FrontmatterValue::Sequence(items)) => items.get_mut(*i)?,
            _ => return None,
        };
    }
    Some(current)
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}

fn list_marker(trimmed: &str) -> Option<&str> {
    if trimmed == "-" {
        return Some("");
    }
    trimmed.strip_prefix("- ").map(str::trim)
}

/// Split `key: value` on the first colon. The space after it is optional.
fn split_key(s: &str) -> Option<(&str, &str)> {
    let (key, value) = s.split_once(':')?;
    Some((key.trim(), value.trim()))
}

/// Split a list item's `key: value`. Here the colon must be followed by
/// whitespace or end of line, so `- https://a.test` stays a scalar item.
fn split_object_key(s: &str) -> Option<(&str, &str)> {
    let bytes = s.as_bytes();
    let pos = bytes.iter().enumerate().position(|(i, &b)| {
        b == b':' && bytes.get(i + 1).is_none_or(|next| next.is_ascii_whitespace())
    })?;
    Some((s[..pos].trim(), s[pos + 1..].trim()))
}

fn is_word(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_block_indicator(value: &str) -> bool {
    matches!(value, "|" | ">" | "|-" | "|+" | ">-" | ">+")
}

fn classify(value: &str) -> ValueKind {
    if value.is_empty() {
        ValueKind::Container
    } else if is_block_indicator(value) {
        ValueKind::Block
    } else {
        ValueKind::Scalar(parse_scalar(value))
    }
}

// ============================================================================
// Scalars
// ============================================================================

/// Strip one matching pair of surrounding `"` or `'` quotes.
pub fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Whether `value` is a plain decimal numeral (`-12`, `0.5`, `270`).
///
/// Leading zeros (`007`) are not numerals, so zip codes and SKUs stay strings.
pub fn is_decimal(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };
    let int_ok = !int_part.is_empty()
        && int_part.bytes().all(|b| b.is_ascii_digit())
        && (int_part == "0" || !int_part.starts_with('0'));
    let frac_ok = frac_part.is_none_or(|f| !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()));
    int_ok && frac_ok
}

/// The text between `[` and `]` when `raw` is a single flow list.
///
/// `[Draft] Soap [New]` has brackets inside and is a plain string.
fn flow_list_body(raw: &str) -> Option<&str> {
    let inner = raw.strip_prefix('[')?.strip_suffix(']')?;
    (!inner.contains(['[', ']'])).then_some(inner)
}

/// Split flow list items on commas outside quotes. A quote only opens at
/// the start of an item, so `[kid's toy, ball]` has two items.
fn split_flow_items(inner: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in inner.char_indices() {
        match (quote, c) {
            (Some(q), _) if c == q => quote = None,
            (None, '"' | '\'') if inner[start..i].trim().is_empty() => quote = Some(c),
            (None, ',') => {
                items.push(&inner[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    items.push(&inner[start..]);
    items
}

/// Convert a raw scalar token into a typed value.
pub fn parse_scalar(raw: &str) -> FrontmatterValue {
    let raw = raw.trim();
    match raw {
        "[]" => return FrontmatterValue::Sequence(Vec::new()),
        "{}" => return FrontmatterValue::Mapping(Mapping::new()),
        _ => {}
    }
    if let Some(inner) = flow_list_body(raw) {
        let items = split_flow_items(inner)
            .into_iter()
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(parse_scalar)
            .collect();
        return FrontmatterValue::Sequence(items);
    }

    let value = strip_quotes(raw);
    match value {
        "true" => FrontmatterValue::Bool(true),
        "false" => FrontmatterValue::Bool(false),
        _ if is_decimal(value) => value
            .parse::<f64>()
            .map(FrontmatterValue::Number)
            .unwrap_or_else(|_| FrontmatterValue::String(value.to_string())),
        _ => FrontmatterValue::String(value.to_string()),
    }
}

// ============================================================================
// Tests
// ============================================================================
