//! Directory-backed key-value store, one JSON document per key

use super::{validate_key, KeyValueStore};
use crate::error::{Result, ResultExt};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const EXTENSION: &str = "json";

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Open (or create) the store directory
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let base_path = dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)
            .with_context(|| format!("Creating storage directory '{}'", base_path.display()))?;

        tracing::debug!("File store opened at {}", base_path.display());
        Ok(Self { base_path })
    }

    /// Default location: `$HOME/.storefront`, falling back to `./.storefront`
    pub fn default_dir() -> PathBuf {
        std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(".storefront")
    }

    /// Get storage path
    pub fn path(&self) -> &Path {
        &self.base_path
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.{}", key, EXTENSION))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let path = self.entry_path(key);

        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Reading '{}'", path.display())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        let path = self.entry_path(key);
        // Write-then-rename keeps a crash from leaving a half-written value.
        let tmp = self.base_path.join(format!(".{}.{}.tmp", key, EXTENSION));

        fs::write(&tmp, value).with_context(|| format!("Writing '{}'", tmp.display()))?;
        fs::rename(&tmp, &path).with_context(|| format!("Replacing '{}'", path.display()))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        validate_key(key)?;
        let path = self.entry_path(key);

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Removing '{}'", path.display())),
        }
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();

        for entry in fs::read_dir(&self.base_path)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if !stem.starts_with('.') {
                    keys.push(stem.to_string());
                }
            }
        }

        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();

        assert!(store.get("cart-storage").unwrap().is_none());
        store.set("cart-storage", r#"{"version":0}"#).unwrap();
        assert_eq!(
            store.get("cart-storage").unwrap().as_deref(),
            Some(r#"{"version":0}"#)
        );
        assert!(dir.path().join("cart-storage.json").exists());
    }

    #[test]
    fn test_file_store_creates_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileStore::open(&nested).unwrap();
        assert!(store.path().is_dir());
    }

    #[test]
    fn test_file_store_keys_skip_temp_and_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();

        store.set("b", "2").unwrap();
        store.set("a", "1").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::write(dir.path().join(".a.json.tmp"), "ignored").unwrap();

        assert_eq!(store.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_file_store_remove() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();

        store.set("cart-storage", "x").unwrap();
        store.remove("cart-storage").unwrap();
        store.remove("cart-storage").unwrap();

        assert!(store.get("cart-storage").unwrap().is_none());
    }

    #[test]
    fn test_file_store_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        assert!(store.set("../escape", "x").is_err());
    }
}
