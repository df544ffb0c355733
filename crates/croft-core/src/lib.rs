//! Croft Core — shared error type and identifier utilities.
//!
//! This crate has no internal Croft dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`util`]: Slug and ID utilities

pub mod error;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};

// Convenience re-exports from util
pub use util::ids::{is_markdown, normalize_id, slug_from_path};
