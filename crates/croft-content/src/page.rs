//! Page orchestration: the two entry points page scripts call.
//!
//! - [`load_and_bind`]: one document into one page's slots
//! - [`load_collection_and_render`]: a directory of documents into cards
//!
//! Neither returns an error. Failures degrade to an empty state so the rest
//! of the page keeps working.

use std::time::Duration;

use crate::binder::{bind, BindReport, SlotContent, SlotMap, View};
use crate::collection::{
    fetch_with_timeout, CollectionLoader, CollectionOutcome, EmptyState, DEFAULT_FETCH_TIMEOUT,
};
use crate::record::{normalize_document, NormalizedRecord};
use crate::schema::FieldSchema;
use crate::source::ContentSource;

/// Outcome of [`load_and_bind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageStatus {
    /// The document loaded and was bound.
    Bound(BindReport),
    /// The document could not be fetched; placeholders were kept.
    Unavailable(String),
}

/// Fetch one document and bind it into `view`.
///
/// When the fetch fails or takes longer than [`DEFAULT_FETCH_TIMEOUT`], the
/// slot map's empty-state slot (if any) receives its message and every other
/// slot keeps its placeholder.
pub async fn load_and_bind(
    source: &dyn ContentSource,
    path: &str,
    schema: &FieldSchema,
    slots: &SlotMap,
    view: &mut dyn View,
) -> PageStatus {
    load_and_bind_within(source, path, schema, slots, view, DEFAULT_FETCH_TIMEOUT).await
}

/// [`load_and_bind`] with an explicit fetch deadline.
pub async fn load_and_bind_within(
    source: &dyn ContentSource,
    path: &str,
    schema: &FieldSchema,
    slots: &SlotMap,
    view: &mut dyn View,
    timeout: Duration,
) -> PageStatus {
    match fetch_with_timeout(source, path, timeout).await {
        Ok(raw) => {
            let id = croft_core::slug_from_path(std::path::Path::new(path))
                .unwrap_or_else(|| path.to_string());
            let record = normalize_document(&id, &raw, schema);
            PageStatus::Bound(bind(&record, slots, view))
        }
        Err(e) => {
            log::warn!("Could not load {path}: {e}");
            if let Some((slot, message)) = slots.empty_state_slot() {
                view.write(slot, SlotContent::Text(message.to_string()));
            }
            PageStatus::Unavailable(e.to_string())
        }
    }
}

/// Outcome of [`load_collection_and_render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered<R> {
    /// One rendered item per record, in collection order.
    Items(Vec<R>),
    /// Nothing to render, and why.
    Empty(EmptyState),
}

/// Load a collection and hand each record to `renderer`.
pub async fn load_collection_and_render<P, K, F, R>(
    loader: &CollectionLoader,
    filter: P,
    sort_key: K,
    renderer: F,
) -> Rendered<R>
where
    P: Fn(&NormalizedRecord) -> bool,
    K: Fn(&NormalizedRecord) -> f64,
    F: FnMut(&NormalizedRecord) -> R,
{
    match loader.load(filter, sort_key).await {
        CollectionOutcome::Loaded(report) => {
            Rendered::Items(report.records.iter().map(renderer).collect())
        }
        CollectionOutcome::Empty(state) => Rendered::Empty(state),
    }
}
