//! Utility modules shared by the Croft crates.
//!
//! - [`ids`]: Slug extraction and ID normalization

pub mod ids;
