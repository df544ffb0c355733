//! Body rendering for pages and cards.
//!
//! Document bodies are CommonMark. Authors write single newlines expecting
//! line breaks, so soft breaks are rendered as `<br />`.
//!
//! # Example
//!
//! ```rust
//! use croft_content::markdown::render::{render_body_html, render_paragraphs};
//!
//! let html = render_body_html("Made with **fresh** milk.\nCured six weeks.");
//! assert_eq!(html, "<p>Made with <strong>fresh</strong> milk.<br />\nCured six weeks.</p>\n");
//!
//! assert_eq!(render_paragraphs("One\n\nTwo"), "<p>One</p><p>Two</p>");
//! ```

use pulldown_cmark::{html, Event, Options, Parser, Tag, TagEnd};

/// Render a markdown body to HTML.
pub fn render_body_html(body: &str) -> String {
    let parser = Parser::new_ext(body, Options::empty()).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        other => other,
    });

    let mut out = String::with_capacity(body.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Render long text as one `<p>` per non-blank line.
///
/// Text is HTML-escaped; no markdown is interpreted.
pub fn render_paragraphs(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| format!("<p>{}</p>", html_escape::encode_text(line)))
        .collect()
}

/// Extract the first paragraph of a body as plain text.
///
/// Headings are skipped and inline formatting is dropped. The result is cut
/// at a word boundary and suffixed with `...` when longer than `max_chars`.
///
/// # Example
///
/// ```rust
/// use croft_content::markdown::render::extract_first_paragraph;
///
/// let content = "# Title\n\nThis is a **bold** introduction.\n\nMore content.";
/// let paragraph = extract_first_paragraph(content, 50).unwrap();
/// assert_eq!(paragraph, "This is a bold introduction.");
/// ```
pub fn extract_first_paragraph(content: &str, max_chars: usize) -> Option<String> {
    let mut in_heading = false;
    let mut in_paragraph = false;
    let mut text = String::new();

    for event in Parser::new(content) {
        match event {
            Event::Start(Tag::Heading { .. }) => in_heading = true,
            Event::End(TagEnd::Heading(_)) => in_heading = false,

            Event::Start(Tag::Paragraph) if !in_heading => {
                in_paragraph = true;
                text.clear();
            }
            Event::End(TagEnd::Paragraph) if in_paragraph => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    return Some(truncate_text(trimmed, max_chars));
                }
                in_paragraph = false;
            }

            Event::Text(t) | Event::Code(t) if in_paragraph => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak if in_paragraph => text.push(' '),
            _ => {}
        }
    }

    None
}

/// Truncate to at most `max_chars` characters, preferring a word boundary.
fn truncate_text(text: &str, max_chars: usize) -> String {
    let Some((cut, _)) = text.char_indices().nth(max_chars) else {
        return text.to_string();
    };

    let head = &text[..cut];
    let at = head.rfind(char::is_whitespace).unwrap_or(cut);
    format!("{}...", head[..at].trim_end())
}

// ============================================================================
// Tests
// ============================================================================
