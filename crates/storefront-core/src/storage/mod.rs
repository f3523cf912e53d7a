//! Persistent key-value storage
//!
//! The cart mirrors its state into a single string slot, the same way a
//! browser keeps it in local storage. Any backend that can hold string values
//! under string keys can serve as that slot.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              KeyValueStore                   │
//! ├──────────────┬───────────────┬───────────────┤
//! │ MemoryStore  │  FileStore    │  SqliteStore  │
//! │ (HashMap)    │ (<key>.json)  │ (kv_entries)  │
//! └──────────────┴───────────────┴───────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use storefront_core::storage::{KeyValueStore, MemoryStore};
//!
//! let mut store = MemoryStore::new();
//! store.set("cart-storage", "{}").unwrap();
//! assert_eq!(store.get("cart-storage").unwrap().as_deref(), Some("{}"));
//! ```

pub mod file_store;
pub mod memory_store;
pub mod sqlite_store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use sqlite_store::SqliteStore;

use crate::error::{Result, StorefrontError};

/// String-keyed, string-valued persistent slots
pub trait KeyValueStore {
    /// Read the value under `key`, `None` when absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`; deleting an absent key succeeds
    fn remove(&mut self, key: &str) -> Result<()>;

    /// All keys currently present, sorted
    fn keys(&self) -> Result<Vec<String>>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn keys(&self) -> Result<Vec<String>> {
        (**self).keys()
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn keys(&self) -> Result<Vec<String>> {
        (**self).keys()
    }
}

/// Keys become file names in [`FileStore`], so they are restricted to a safe
/// alphabet for every backend.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && !key.starts_with('.');

    if valid {
        Ok(())
    } else {
        Err(StorefrontError::InvalidInput(format!(
            "storage key '{}' must be non-empty [A-Za-z0-9._-] and not start with '.'",
            key
        )))
    }
}
