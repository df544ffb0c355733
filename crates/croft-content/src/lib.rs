//! Content loading for the farm site: frontmatter documents in, page slots
//! and card lists out.
//!
//! # Modules
//!
//! - [`markdown`]: document splitting, the frontmatter reader, body rendering
//! - [`schema`] / [`schemas`]: field aliases, defaults and coercions
//! - [`record`]: normalized records
//! - [`catalog`]: shop helpers (categories, stock, prices, product ids)
//! - [`source`]: where documents come from (disk, HTTP, memory)
//! - [`collection`]: concurrent, failure-tolerant collection loading
//! - [`binder`] / [`page`]: writing records into page slots
//! - [`index`]: build-time `*-index.json` generation
//!
//! # Example
//!
//! ```rust
//! use croft_content::{normalize_document, schemas::product_schema};
//!
//! let raw = "---\ntitle: Goat Milk Soap\nprice: \"$8\"\navailable: true\n---\nGentle.";
//! let record = normalize_document("goat-milk-soap", raw, &product_schema());
//!
//! assert_eq!(record.get_f64("price"), Some(8.0));
//! assert_eq!(record.get_i64("order"), Some(999));
//! assert_eq!(record.body(), "Gentle.");
//! ```

pub mod binder;
pub mod catalog;
pub mod collection;
pub mod index;
pub mod markdown;
pub mod page;
pub mod record;
pub mod schema;
pub mod schemas;
pub mod source;

// Re-export commonly used types
pub use binder::{bind, BindReport, MemoryView, SlotContent, SlotMap, View};
pub use collection::{
    load_collection, order_key, CollectionLoader, CollectionOutcome, CollectionReport, EmptyState,
    DEFAULT_FETCH_TIMEOUT, UNORDERED_SENTINEL,
};
pub use markdown::{
    extract_frontmatter, parse_frontmatter, split_document, Frontmatter, FrontmatterResult,
    FrontmatterValue,
};
pub use page::{
    load_and_bind, load_and_bind_within, load_collection_and_render, PageStatus, Rendered,
};
pub use record::{load_document, normalize_document, LoadedDocument, NormalizedRecord};
pub use schema::{Coercion, FieldSchema, FieldSpec};
pub use source::{ContentSource, FsContentSource, HttpContentSource, MemoryContentSource};
