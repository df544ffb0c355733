//! Content sources: where raw documents come from.
//!
//! [`ContentSource`] is the seam between the loaders and storage. Paths are
//! repository-relative (`content/products/soap.md`); listing returns
//! document ids (file stems) under a directory prefix.
//!
//! # Sources
//!
//! - [`FsContentSource`]: a local checkout of the content directory
//! - [`HttpContentSource`]: the published site, listing via `*-index.json`
//! - [`MemoryContentSource`]: fixed documents, for tests and previews

use std::collections::{BTreeMap, HashMap};
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use croft_core::{is_markdown, slug_from_path, Error, Result};

/// Where raw content documents are fetched from.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch the raw text of one document.
    ///
    /// A missing document is reported as [`Error::NotFound`].
    async fn fetch(&self, path: &str) -> Result<String>;

    /// List document ids available under a directory prefix, sorted.
    async fn list(&self, prefix: &str) -> Result<Vec<String>>;

    /// Source name for diagnostics.
    fn name(&self) -> &str;
}

/// Path of the document `id` inside `directory`.
pub fn document_path(directory: &str, id: &str) -> String {
    let directory = directory.trim_end_matches('/');
    if directory.is_empty() {
        format!("{id}.md")
    } else {
        format!("{directory}/{id}.md")
    }
}

/// Name of the manifest listing a directory's ids (`products-index.json`).
pub fn index_file_name(directory: &str) -> String {
    let last = directory
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();
    format!("{last}-index.json")
}

/// Path of a directory's manifest, beside the directory
/// (`content/products` gives `content/products-index.json`).
pub fn index_path(directory: &str) -> String {
    let directory = directory.trim_end_matches('/');
    let file = index_file_name(directory);
    match directory.rsplit_once('/') {
        Some((parent, _)) => format!("{parent}/{file}"),
        None => file,
    }
}

// ============================================================================
// Filesystem
// ============================================================================

/// Reads documents from a directory on disk.
#[derive(Debug, Clone)]
pub struct FsContentSource {
    root: PathBuf,
}

impl FsContentSource {
    /// Create a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Join a relative path onto the root, refusing to leave it.
    fn resolve(&self, relative: &str) -> Result<PathBuf> {
        let rel = Path::new(relative);
        let escapes = rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(Error::invalid_data(format!(
                "content path must stay inside the content root: {relative}"
            )));
        }
        Ok(self.root.join(rel))
    }
}

#[async_trait]
impl ContentSource for FsContentSource {
    async fn fetch(&self, path: &str) -> Result<String> {
        let full = self.resolve(path)?;
        tokio::fs::read_to_string(&full)
            .await
            .map_err(|e| Error::io_with_path(e, &full))
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let dir = self.resolve(prefix)?;
        let mut entries = tokio::fs::read_dir(&dir)
            .await
            .map_err(|e| Error::io_with_path(e, &dir))?;

        let mut ids = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| Error::io_with_path(e, &dir))?
        {
            let path = entry.path();
            if !is_markdown(&path) {
                continue;
            }
            let is_file = entry.file_type().await.is_ok_and(|t| t.is_file());
            if let (true, Some(slug)) = (is_file, slug_from_path(&path)) {
                ids.push(slug);
            }
        }

        ids.sort();
        log::debug!("Listed {} documents in {}", ids.len(), dir.display());
        Ok(ids)
    }

    fn name(&self) -> &str {
        "filesystem"
    }
}

// ============================================================================
// HTTP
// ============================================================================

/// Fetches documents from the published site.
#[derive(Debug, Clone)]
pub struct HttpContentSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpContentSource {
    /// Create a source for `base_url` (`https://example.com`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a source sharing an existing client.
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    /// URL a relative path is fetched from.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_text(&self, path: &str) -> Result<String> {
        let response = self
            .client
            .get(self.url_for(path))
            .send()
            .await
            .map_err(|e| Error::fetch(path, format!("request failed: {e}")))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::not_found(path));
        }
        if !status.is_success() {
            return Err(Error::fetch(path, format!("HTTP {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| Error::fetch(path, format!("reading body failed: {e}")))
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn fetch(&self, path: &str) -> Result<String> {
        self.get_text(path).await
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let manifest = index_path(prefix);
        let text = self.get_text(&manifest).await?;
        let mut ids: Vec<String> = serde_json::from_str(&text)
            .map_err(|e| Error::serialization(format!("{manifest}: {e}")))?;
        ids.sort();
        Ok(ids)
    }

    fn name(&self) -> &str {
        "http"
    }
}

// ============================================================================
// In-memory
// ============================================================================

/// Documents held in memory, with optional injected failures.
#[derive(Debug, Clone, Default)]
pub struct MemoryContentSource {
    documents: BTreeMap<String, String>,
    failures: HashMap<String, String>,
    listing_failure: Option<String>,
}

impl MemoryContentSource {
    /// An empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document at `path`.
    pub fn with_document(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.documents.insert(path.into(), text.into());
        self
    }

    /// Make fetching `path` fail with `message`.
    pub fn with_failure(mut self, path: impl Into<String>, message: impl Into<String>) -> Self {
        self.failures.insert(path.into(), message.into());
        self
    }

    /// Make every listing fail with `message`.
    pub fn with_listing_failure(mut self, message: impl Into<String>) -> Self {
        self.listing_failure = Some(message.into());
        self
    }
}

#[async_trait]
impl ContentSource for MemoryContentSource {
    async fn fetch(&self, path: &str) -> Result<String> {
        if let Some(message) = self.failures.get(path) {
            return Err(Error::fetch(path, message.clone()));
        }
        self.documents
            .get(path)
            .cloned()
            .ok_or_else(|| Error::not_found(path))
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        if let Some(message) = &self.listing_failure {
            return Err(Error::fetch(prefix, message.clone()));
        }
        let dir = format!("{}/", prefix.trim_end_matches('/'));
        let ids = self
            .documents
            .keys()
            .chain(self.failures.keys())
            .filter_map(|path| path.strip_prefix(&dir))
            .filter(|rest| !rest.contains('/'))
            .filter_map(|rest| rest.strip_suffix(".md"))
            .map(String::from)
            .collect::<std::collections::BTreeSet<_>>();
        Ok(ids.into_iter().collect())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

// ============================================================================
// Tests
// ============================================================================
