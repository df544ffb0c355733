//! Page binding: write record fields into named output slots.
//!
//! A [`SlotMap`] declares which field feeds which slot and how it is
//! rendered. [`bind`] writes only the slots whose field has a value; every
//! other slot keeps whatever placeholder the page shipped with.
//!
//! # Example
//!
//! ```rust
//! use croft_content::binder::{bind, MemoryView, SlotMap};
//! use croft_content::record::normalize_document;
//! use croft_content::schema::FieldSchema;
//!
//! let record = normalize_document(
//!     "about",
//!     "---\nhero:\n  title: Our Farm\n---\n",
//!     &FieldSchema::new(),
//! );
//! let slots = SlotMap::new()
//!     .text("hero-title", "hero.title")
//!     .text("hero-subtitle", "hero.subtitle");
//! let mut view = MemoryView::new()
//!     .with_placeholder("hero-title", "Welcome")
//!     .with_placeholder("hero-subtitle", "Family farm since 1998");
//!
//! let report = bind(&record, &slots, &mut view);
//! assert_eq!(view.text("hero-title"), Some("Our Farm"));
//! assert_eq!(view.text("hero-subtitle"), Some("Family farm since 1998"));
//! assert_eq!(report.untouched, vec!["hero-subtitle"]);
//! ```

use indexmap::IndexMap;

use crate::markdown::render::{render_body_html, render_paragraphs};
use crate::record::NormalizedRecord;

/// Field path that refers to the document body rather than a frontmatter key.
pub const BODY_PATH: &str = "body";

/// What gets written into a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotContent {
    /// Plain text; the view escapes it.
    Text(String),
    /// Rendered HTML.
    Html(String),
}

impl SlotContent {
    /// The text or markup carried.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(s) | Self::Html(s) => s,
        }
    }
}

/// Somewhere slots can be written.
pub trait View {
    /// Replace the content of `slot`.
    fn write(&mut self, slot: &str, content: SlotContent);
}

/// A view that keeps slot contents in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryView {
    slots: IndexMap<String, SlotContent>,
}

impl MemoryView {
    /// An empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot with its placeholder text.
    pub fn with_placeholder(mut self, slot: impl Into<String>, text: impl Into<String>) -> Self {
        self.slots.insert(slot.into(), SlotContent::Text(text.into()));
        self
    }

    /// Current content of a slot.
    pub fn get(&self, slot: &str) -> Option<&SlotContent> {
        self.slots.get(slot)
    }

    /// Current content of a slot as a string.
    pub fn text(&self, slot: &str) -> Option<&str> {
        self.get(slot).map(SlotContent::as_str)
    }

    /// All slots in first-written order.
    pub fn slots(&self) -> impl Iterator<Item = (&str, &SlotContent)> {
        self.slots.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl View for MemoryView {
    fn write(&mut self, slot: &str, content: SlotContent) {
        self.slots.insert(slot.to_string(), content);
    }
}

/// How a bound field is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Render {
    /// Written as-is.
    Text,
    /// One `<p>` per non-blank line.
    Paragraphs,
    /// CommonMark to HTML.
    Markdown,
}

/// One slot declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotBinding {
    pub slot: String,
    pub path: String,
    pub render: Render,
    pub fallback: Option<String>,
}

/// Declarations of which field feeds which slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotMap {
    bindings: Vec<SlotBinding>,
    empty_state: Option<(String, String)>,
}

impl SlotMap {
    /// An empty slot map.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, slot: impl Into<String>, path: impl Into<String>, render: Render) -> Self {
        self.bindings.push(SlotBinding {
            slot: slot.into(),
            path: path.into(),
            render,
            fallback: None,
        });
        self
    }

    /// Bind a field as plain text.
    pub fn text(self, slot: impl Into<String>, path: impl Into<String>) -> Self {
        self.push(slot, path, Render::Text)
    }

    /// Bind a long text field as paragraphs.
    pub fn paragraphs(self, slot: impl Into<String>, path: impl Into<String>) -> Self {
        self.push(slot, path, Render::Paragraphs)
    }

    /// Bind a markdown field (or [`BODY_PATH`]) as HTML.
    pub fn markdown(self, slot: impl Into<String>, path: impl Into<String>) -> Self {
        self.push(slot, path, Render::Markdown)
    }

    /// Give the most recent binding a value to write when its field is missing.
    pub fn with_fallback(mut self, text: impl Into<String>) -> Self {
        if let Some(last) = self.bindings.last_mut() {
            last.fallback = Some(text.into());
        }
        self
    }

    /// Slot that shows `message` when the page's document cannot be loaded.
    pub fn empty_state(mut self, slot: impl Into<String>, message: impl Into<String>) -> Self {
        self.empty_state = Some((slot.into(), message.into()));
        self
    }

    /// Declared bindings, in order.
    pub fn bindings(&self) -> &[SlotBinding] {
        &self.bindings
    }

    /// The empty-state slot and its message, if declared.
    pub fn empty_state_slot(&self) -> Option<(&str, &str)> {
        self.empty_state
            .as_ref()
            .map(|(slot, message)| (slot.as_str(), message.as_str()))
    }
}

/// Which slots [`bind`] wrote and which it left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindReport {
    pub written: Vec<String>,
    pub untouched: Vec<String>,
}

fn field_text(record: &NormalizedRecord, path: &str) -> Option<String> {
    record.text(path).or_else(|| {
        (path == BODY_PATH && !record.body().is_empty()).then(|| record.body().to_string())
    })
}

/// Write every bound field that has a value; leave the rest untouched.
pub fn bind(record: &NormalizedRecord, slots: &SlotMap, view: &mut dyn View) -> BindReport {
    let mut report = BindReport::default();

    for binding in &slots.bindings {
        let Some(text) = field_text(record, &binding.path).or_else(|| binding.fallback.clone())
        else {
            log::trace!("{}: '{}' is empty, keeping placeholder", record.id(), binding.path);
            report.untouched.push(binding.slot.clone());
            continue;
        };

        let content = match binding.render {
            Render::Text => SlotContent::Text(text),
            Render::Paragraphs => SlotContent::Html(render_paragraphs(&text)),
            Render::Markdown => SlotContent::Html(render_body_html(&text)),
        };
        view.write(&binding.slot, content);
        report.written.push(binding.slot.clone());
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::normalize_document;
    use crate::schema::FieldSchema;

    fn record(raw: &str) -> NormalizedRecord {
        normalize_document("page", raw, &FieldSchema::new())
    }

    #[test]
    fn test_bind_writes_present_fields() {
        let r = record("---\ntitle: Hello\nstock: 3\n---\n");
        let slots = SlotMap::new().text("t", "title").text("s", "stock");
        let mut view = MemoryView::new();
        let report = bind(&r, &slots, &mut view);
        assert_eq!(view.text("t"), Some("Hello"));
        assert_eq!(view.text("s"), Some("3"));
        assert_eq!(report.written, vec!["t", "s"]);
        assert!(report.untouched.is_empty());
    }

    #[test]
    fn test_blank_field_keeps_placeholder() {
        let r = record("---\ntitle: \"\"\nhero:\n  subtitle: \"  \"\n---\n");
        let slots = SlotMap::new().text("t", "title").text("s", "hero.subtitle").text("m", "missing");
        let mut view = MemoryView::new()
            .with_placeholder("t", "Default title")
            .with_placeholder("s", "Default subtitle");
        let report = bind(&r, &slots, &mut view);
        assert_eq!(view.text("t"), Some("Default title"));
        assert_eq!(view.text("s"), Some("Default subtitle"));
        assert!(view.get("m").is_none());
        assert_eq!(report.untouched, vec!["t", "s", "m"]);
    }

    #[test]
    fn test_false_is_written() {
        let r = record("---\nopen: false\n---\n");
        let mut view = MemoryView::new().with_placeholder("o", "?");
        bind(&r, &SlotMap::new().text("o", "open"), &mut view);
        assert_eq!(view.text("o"), Some("false"));
    }

    #[test]
    fn test_fallback_used_when_missing() {
        let r = record("---\n---\n");
        let slots = SlotMap::new().text("name", "name").with_fallback("Unknown");
        let mut view = MemoryView::new();
        bind(&r, &slots, &mut view);
        assert_eq!(view.text("name"), Some("Unknown"));
    }

    #[test]
    fn test_paragraphs_rendering() {
        let r = record("---\nstory: |\n  We began.\n\n  We grew.\n---\n");
        let mut view = MemoryView::new();
        bind(&r, &SlotMap::new().paragraphs("story", "story"), &mut view);
        assert_eq!(
            view.get("story"),
            Some(&SlotContent::Html("<p>We began.</p><p>We grew.</p>".into()))
        );
    }

    #[test]
    fn test_markdown_body_binding() {
        let r = record("---\ntitle: x\n---\n\nSome **bold** words.");
        let mut view = MemoryView::new();
        bind(&r, &SlotMap::new().markdown("content", BODY_PATH), &mut view);
        assert_eq!(
            view.text("content"),
            Some("<p>Some <strong>bold</strong> words.</p>\n")
        );
    }

    #[test]
    fn test_empty_body_keeps_placeholder() {
        let r = record("---\ntitle: x\n---\n");
        let mut view = MemoryView::new().with_placeholder("content", "Coming soon");
        let report = bind(&r, &SlotMap::new().markdown("content", BODY_PATH), &mut view);
        assert_eq!(view.text("content"), Some("Coming soon"));
        assert_eq!(report.untouched, vec!["content"]);
    }

    #[test]
    fn test_empty_state_slot() {
        let slots = SlotMap::new().empty_state("main", "Check back soon!");
        assert_eq!(slots.empty_state_slot(), Some(("main", "Check back soon!")));
        assert!(SlotMap::new().empty_state_slot().is_none());
    }
}
