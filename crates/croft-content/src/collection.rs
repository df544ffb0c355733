//! Collection loading: fetch many documents at once, keep what loads.
//!
//! Every document of a collection is fetched concurrently and joined with an
//! all-complete join. A document that fails to fetch is logged once and
//! left out; it never fails the others. The surviving records are filtered
//! and then sorted by a numeric key, ties keeping listing order.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use croft_content::collection::{by_order, CollectionLoader, CollectionOutcome};
//! use croft_content::schemas::animal_schema;
//! use croft_content::source::MemoryContentSource;
//!
//! # tokio_test::block_on(async {
//! let source = MemoryContentSource::new()
//!     .with_document("content/animals/a.md", "---\nname: A\norder: 2\n---\n")
//!     .with_document("content/animals/b.md", "---\nname: B\n---\n")
//!     .with_document("content/animals/c.md", "---\nname: C\norder: 1\n---\n");
//!
//! let loader = CollectionLoader::new(Arc::new(source), "content/animals", animal_schema());
//! let CollectionOutcome::Loaded(report) = loader.load(|_| true, by_order).await else {
//!     panic!("expected records");
//! };
//! let names: Vec<_> = report.records.iter().filter_map(|r| r.get_str("name")).collect();
//! assert_eq!(names, vec!["C", "A", "B"]);
//! # });
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use croft_core::{Error, Result};
use futures::future::join_all;

use crate::record::{normalize_document, NormalizedRecord};
use crate::schema::FieldSchema;
use crate::source::{document_path, ContentSource};

/// Sort key given to records that do not set `order`.
pub const UNORDERED_SENTINEL: f64 = 999.0;

/// Default per-document fetch deadline.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Sort key from the `order` field, or [`UNORDERED_SENTINEL`].
pub fn order_key(record: &NormalizedRecord) -> f64 {
    record.get_f64("order").unwrap_or(UNORDERED_SENTINEL)
}

/// `order_key` as a plain function, for passing to loaders.
pub fn by_order(record: &NormalizedRecord) -> f64 {
    order_key(record)
}

/// Fetch `path` from `source`, giving up after `timeout`.
pub async fn fetch_with_timeout(
    source: &dyn ContentSource,
    path: &str,
    timeout: Duration,
) -> Result<String> {
    match tokio::time::timeout(timeout, source.fetch(path)).await {
        Ok(result) => result,
        Err(_) => Err(Error::Timeout {
            path: path.to_string(),
            millis: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }),
    }
}

/// A document that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub id: String,
    pub reason: String,
}

/// Records that loaded, and the documents that did not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionReport {
    pub records: Vec<NormalizedRecord>,
    pub failures: Vec<LoadFailure>,
}

impl CollectionReport {
    /// Whether no record survived.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Fetch, parse, normalize, filter and sort a set of documents.
///
/// `fetch_one` is called once per id and all calls run concurrently. A
/// failed fetch is logged at warn level and recorded in
/// [`CollectionReport::failures`]; it never aborts the collection.
pub async fn load_collection<F, Fut, P, K>(
    ids: &[String],
    fetch_one: F,
    schema: &FieldSchema,
    filter: P,
    sort_key: K,
) -> CollectionReport
where
    F: Fn(&str) -> Fut,
    Fut: Future<Output = Result<String>>,
    P: Fn(&NormalizedRecord) -> bool,
    K: Fn(&NormalizedRecord) -> f64,
{
    let fetches = ids.iter().map(|id| fetch_one(id));
    let settled = join_all(fetches).await;

    let mut report = CollectionReport::default();
    for (id, outcome) in ids.iter().zip(settled) {
        match outcome {
            Ok(raw) => report.records.push(normalize_document(id, &raw, schema)),
            Err(e) => {
                log::warn!("Skipping '{id}': {e}");
                report.failures.push(LoadFailure {
                    id: id.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let loaded = report.records.len();
    report.records.retain(|r| filter(r));
    report
        .records
        .sort_by(|a, b| sort_key(a).total_cmp(&sort_key(b)));

    log::debug!(
        "Collection: {} requested, {loaded} loaded, {} kept, {} failed",
        ids.len(),
        report.records.len(),
        report.failures.len()
    );
    report
}

/// Why a collection has nothing to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState {
    /// The directory listing could not be fetched.
    ListingUnavailable(String),
    /// The listing was empty, or every document failed to load.
    NoDocuments,
    /// Documents loaded but the filter rejected all of them.
    NoMatches,
}

impl EmptyState {
    /// Message shown in place of the collection.
    pub fn message(&self) -> &'static str {
        match self {
            Self::ListingUnavailable(_) => {
                "This content is unavailable right now. Please check back soon!"
            }
            Self::NoDocuments => "Nothing has been added yet. Check back soon!",
            Self::NoMatches => "Nothing matches this selection yet.",
        }
    }
}

impl fmt::Display for EmptyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Result of [`CollectionLoader::load`]. Never an error.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionOutcome {
    Loaded(CollectionReport),
    Empty(EmptyState),
}

impl CollectionOutcome {
    /// Records to render; empty for [`CollectionOutcome::Empty`].
    pub fn records(&self) -> &[NormalizedRecord] {
        match self {
            Self::Loaded(report) => &report.records,
            Self::Empty(_) => &[],
        }
    }
}

/// Loads every document of one content directory.
#[derive(Clone)]
pub struct CollectionLoader {
    source: Arc<dyn ContentSource>,
    directory: String,
    schema: FieldSchema,
    timeout: Duration,
}

impl fmt::Debug for CollectionLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionLoader")
            .field("source", &self.source.name())
            .field("directory", &self.directory)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl CollectionLoader {
    /// Create a loader for `directory` (`content/animals`).
    pub fn new(
        source: Arc<dyn ContentSource>,
        directory: impl Into<String>,
        schema: FieldSchema,
    ) -> Self {
        Self {
            source,
            directory: directory.into(),
            schema,
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Set the per-document fetch deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The directory this loader reads.
    pub fn directory(&self) -> &str {
        &self.directory
    }

    /// Fetch one document by id, bounded by the loader's timeout.
    pub async fn fetch_document(&self, id: &str) -> Result<String> {
        let path = document_path(&self.directory, id);
        fetch_with_timeout(self.source.as_ref(), &path, self.timeout).await
    }

    /// Load the collection of explicitly named ids.
    pub async fn load_ids<P, K>(&self, ids: &[String], filter: P, sort_key: K) -> CollectionReport
    where
        P: Fn(&NormalizedRecord) -> bool,
        K: Fn(&NormalizedRecord) -> f64,
    {
        let fetch_one = |id: &str| {
            let id = id.to_string();
            async move { self.fetch_document(&id).await }
        };
        load_collection(ids, fetch_one, &self.schema, filter, sort_key).await
    }

    /// List the directory and load every document in it.
    pub async fn load<P, K>(&self, filter: P, sort_key: K) -> CollectionOutcome
    where
        P: Fn(&NormalizedRecord) -> bool,
        K: Fn(&NormalizedRecord) -> f64,
    {
        let ids = match self.source.list(&self.directory).await {
            Ok(ids) => ids,
            Err(e) => {
                log::warn!("Could not list {}: {e}", self.directory);
                return CollectionOutcome::Empty(EmptyState::ListingUnavailable(e.to_string()));
            }
        };
        if ids.is_empty() {
            return CollectionOutcome::Empty(EmptyState::NoDocuments);
        }

        let report = self.load_ids(&ids, filter, sort_key).await;
        if !report.is_empty() {
            CollectionOutcome::Loaded(report)
        } else if report.failures.len() == ids.len() {
            CollectionOutcome::Empty(EmptyState::NoDocuments)
        } else {
            CollectionOutcome::Empty(EmptyState::NoMatches)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
