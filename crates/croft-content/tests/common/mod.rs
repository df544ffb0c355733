//! Shared fixtures for croft-content integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use croft_content::source::{ContentSource, MemoryContentSource};
use croft_core::Result;
use tokio::sync::Barrier;

pub const ANIMALS: &str = "content/animals";
pub const PRODUCTS: &str = "content/products";

/// An animal document with an optional `order`.
pub fn animal_doc(name: &str, order: Option<i32>) -> String {
    match order {
        Some(order) => format!("---\nname: \"{name}\"\norder: {order}\n---\n\nAbout {name}."),
        None => format!("---\nname: \"{name}\"\n---\n\nAbout {name}."),
    }
}

/// A product document.
pub fn product_doc(title: &str, price: &str, category: &str, available: bool) -> String {
    format!(
        "---\ntitle: \"{title}\"\nprice: \"{price}\"\nstock: 5\navailable: {available}\ncategory:\n  name: {category}\n---\n\nHandmade on the farm."
    )
}

/// Three animals where the second one fails with an HTTP error.
pub fn animals_with_one_failure() -> MemoryContentSource {
    MemoryContentSource::new()
        .with_document(format!("{ANIMALS}/1-buttercup.md"), animal_doc("Buttercup", Some(1)))
        .with_failure(format!("{ANIMALS}/2-clover.md"), "HTTP 500")
        .with_document(format!("{ANIMALS}/3-daisy.md"), animal_doc("Daisy", Some(3)))
}

/// Wraps a source and counts fetches.
pub struct CountingSource {
    inner: MemoryContentSource,
    fetches: AtomicUsize,
}

impl CountingSource {
    pub fn new(inner: MemoryContentSource) -> Self {
        Self {
            inner,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentSource for CountingSource {
    async fn fetch(&self, path: &str) -> Result<String> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch(path).await
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        self.inner.list(prefix).await
    }

    fn name(&self) -> &str {
        "counting"
    }
}

/// A source whose fetches only complete once `parties` of them are in
/// flight at the same time.
pub struct RendezvousSource {
    inner: MemoryContentSource,
    barrier: Arc<Barrier>,
}

impl RendezvousSource {
    pub fn new(inner: MemoryContentSource, parties: usize) -> Self {
        Self {
            inner,
            barrier: Arc::new(Barrier::new(parties)),
        }
    }
}

#[async_trait]
impl ContentSource for RendezvousSource {
    async fn fetch(&self, path: &str) -> Result<String> {
        self.barrier.wait().await;
        self.inner.fetch(path).await
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        self.inner.list(prefix).await
    }

    fn name(&self) -> &str {
        "rendezvous"
    }
}
