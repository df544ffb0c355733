//! Error types for Croft operations.
//!
//! This module provides the common `Error` type and `Result<T>` alias used
//! across all Croft crates. Content loading is fail-soft at every public
//! boundary, so most of these variants are caught and degraded to an empty
//! state before they reach a page.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur in Croft operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error tied to a specific path.
    #[error("I/O error at {}: {source}", path.display())]
    IoWithPath {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Content not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data or format.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The document has no `---` delimited frontmatter block.
    #[error("No frontmatter block found")]
    MissingFrontmatter,

    /// A content fetch failed for a reason other than "not found".
    #[error("Failed to fetch {path}: {message}")]
    Fetch {
        /// Repository-relative path that was requested.
        path: String,
        /// What went wrong.
        message: String,
    },

    /// A content fetch did not complete in time.
    #[error("Fetching {path} timed out after {millis}ms")]
    Timeout {
        /// Repository-relative path that was requested.
        path: String,
        /// Deadline in milliseconds.
        millis: u64,
    },

    /// Persistent key-value storage failed.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an invalid data error.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Create a fetch error for the given path.
    pub fn fetch(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a persistence error.
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Wrap an I/O error with the path it occurred on.
    ///
    /// `NotFound` I/O errors become [`Error::NotFound`] so callers can tell a
    /// missing document apart from a broken one.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::NotFound(path.display().to_string());
        }
        Self::IoWithPath {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns `true` for the distinguishable "not found" condition.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

/// Result type alias using Croft's Error type.
pub type Result<T> = std::result::Result<T, Error>;
