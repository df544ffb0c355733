//! Build-time index generation.
//!
//! The published site cannot list directories, so each collection ships a
//! `<name>-index.json` manifest: a JSON array of the document slugs.

use std::path::{Path, PathBuf};

use croft_core::{is_markdown, slug_from_path, Error, Result};

use crate::source::index_file_name;

/// Sorted slugs of the `.md` files directly inside `dir`.
///
/// # Errors
///
/// Returns [`Error::NotFound`] when `dir` does not exist.
pub fn generate_index(dir: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(dir).map_err(|e| Error::io_with_path(e, dir))?;

    let mut slugs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io_with_path(e, dir))?;
        let path = entry.path();
        if path.is_file() && is_markdown(&path) {
            if let Some(slug) = slug_from_path(&path) {
                slugs.push(slug);
            }
        }
    }

    slugs.sort();
    Ok(slugs)
}

/// Default manifest location for `dir`: `<parent>/<name>-index.json`.
pub fn default_index_path(dir: &Path) -> PathBuf {
    let name = dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("content");
    let file = index_file_name(name);
    match dir.parent() {
        Some(parent) => parent.join(file),
        None => PathBuf::from(file),
    }
}

/// Generate the index of `dir` and write it as pretty JSON to `output`.
///
/// Returns the slugs written.
pub fn write_index(dir: &Path, output: &Path) -> Result<Vec<String>> {
    let slugs = generate_index(dir)?;
    let json = serde_json::to_string_pretty(&slugs)
        .map_err(|e| Error::serialization(e.to_string()))?;
    std::fs::write(output, json).map_err(|e| Error::io_with_path(e, output))?;
    log::info!("Wrote {} entries to {}", slugs.len(), output.display());
    Ok(slugs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_generate_index_sorted_md_only() {
        let dir = tempdir().unwrap();
        for name in ["soap.md", "apron.md", "readme.txt", "Zinnia.MD", "Yarrow.md"] {
            std::fs::write(dir.path().join(name), "x").unwrap();
        }
        std::fs::create_dir(dir.path().join("sub.md")).unwrap();

        let slugs = generate_index(dir.path()).unwrap();
        assert_eq!(slugs, vec!["Yarrow", "apron", "soap"]);
    }

    #[test]
    fn test_generate_index_missing_dir() {
        let dir = tempdir().unwrap();
        let err = generate_index(&dir.path().join("products")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_write_index_json() {
        let dir = tempdir().unwrap();
        let products = dir.path().join("products");
        std::fs::create_dir(&products).unwrap();
        std::fs::write(products.join("soap.md"), "x").unwrap();
        std::fs::write(products.join("candle.md"), "x").unwrap();

        let output = default_index_path(&products);
        assert_eq!(output, dir.path().join("products-index.json"));

        write_index(&products, &output).unwrap();
        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written, "[\n  \"candle\",\n  \"soap\"\n]");
    }

    #[test]
    fn test_empty_dir_writes_empty_array() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("out.json");
        assert!(write_index(dir.path(), &output).unwrap().is_empty());
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "[]");
    }
}
