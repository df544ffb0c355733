//! Key-value persistence for the cart snapshot.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use croft_core::{Error, Result};

/// A string key-value store.
pub trait KeyValueStore {
    /// Read a value; `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Values kept in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    unavailable: bool,
}

impl MemoryStore {
    /// An empty, writable store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects every read and write, like disabled storage.
    pub fn unavailable() -> Self {
        Self {
            values: HashMap::new(),
            unavailable: true,
        }
    }

    /// A store pre-populated with one value.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Raw value, bypassing availability.
    pub fn peek(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if self.unavailable {
            return Err(Error::persistence("storage is disabled"));
        }
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.unavailable {
            return Err(Error::persistence("storage is disabled"));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// A store writing into `dir` (created on first write).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The backing directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(Error::invalid_data(format!("invalid storage key: {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::io_with_path(e, &path)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir).map_err(|e| Error::io_with_path(e, &self.dir))?;

        // Replace atomically.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value).map_err(|e| Error::io_with_path(e, &tmp))?;
        std::fs::rename(&tmp, &path).map_err(|e| Error::io_with_path(e, &path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("cart").unwrap(), None);
        store.set("cart", "[]").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_memory_store_unavailable() {
        let mut store = MemoryStore::unavailable();
        assert!(store.get("cart").is_err());
        assert!(store.set("cart", "[]").is_err());
        assert!(store.peek("cart").is_none());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("state"));
        assert_eq!(store.get("wheatwhisper_cart").unwrap(), None);

        store.set("wheatwhisper_cart", "[1]").unwrap();
        store.set("wheatwhisper_cart", "[2]").unwrap();
        assert_eq!(store.get("wheatwhisper_cart").unwrap().as_deref(), Some("[2]"));
        assert!(dir.path().join("state/wheatwhisper_cart.json").exists());
        assert!(!dir.path().join("state/wheatwhisper_cart.json.tmp").exists());
    }

    #[test]
    fn test_file_store_rejects_bad_keys() {
        let store = FileStore::new("/tmp");
        assert!(store.path_for("../etc/passwd").is_err());
        assert!(store.path_for("").is_err());
        assert!(store.path_for("a.b").is_err());
    }
}
