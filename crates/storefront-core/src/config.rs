//! Store configuration

use crate::error::{Result, ResultExt, StorefrontError};
use crate::storage::{FileStore, KeyValueStore, MemoryStore, SqliteStore};
use crate::DEFAULT_STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main cart store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Name of the persisted slot
    pub storage_key: String,

    /// When mutations reach the backend
    pub persist_mode: PersistMode,

    /// Where the slot lives. Must stay the last field: TOML tables follow
    /// plain values.
    pub backend: BackendConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            persist_mode: PersistMode::Immediate,
            backend: BackendConfig::default(),
        }
    }
}

impl StoreConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the storage key
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the backend
    pub fn with_backend(mut self, backend: BackendConfig) -> Self {
        self.backend = backend;
        self
    }

    /// Set the persistence mode
    pub fn with_persist_mode(mut self, mode: PersistMode) -> Self {
        self.persist_mode = mode;
        self
    }

    /// Open the configured backend
    pub fn open_backend(&self) -> Result<Box<dyn KeyValueStore>> {
        let backend: Box<dyn KeyValueStore> = match &self.backend {
            BackendConfig::Memory => Box::new(MemoryStore::new()),
            BackendConfig::File { dir } => Box::new(FileStore::open(dir)?),
            BackendConfig::Sqlite { path } => Box::new(SqliteStore::open(path)?),
        };
        Ok(backend)
    }

    /// Load configuration from a file. `.json` files are read as JSON,
    /// everything else as TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Reading config '{}'", path.display()))?;

        let config: Self = if is_json(path) {
            serde_json::from_str(&content)?
        } else {
            toml::from_str(&content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file, format chosen by extension
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        crate::storage::validate_key(&self.storage_key)
            .map_err(|e| StorefrontError::Config(e.to_string()))
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}

/// Storage backend selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackendConfig {
    /// Nothing survives the process
    Memory,
    /// One JSON file per key under `dir`
    File { dir: PathBuf },
    /// SQLite database at `path`
    Sqlite { path: PathBuf },
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig::File {
            dir: FileStore::default_dir(),
        }
    }
}

/// When the cart writes its snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistMode {
    /// After every mutation
    #[default]
    Immediate,
    /// On `flush()` or when the store is dropped
    Deferred,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.storage_key, "cart-storage");
        assert_eq!(config.persist_mode, PersistMode::Immediate);
        assert!(matches!(config.backend, BackendConfig::File { .. }));
    }

    #[test]
    fn test_config_builder() {
        let config = StoreConfig::new()
            .with_storage_key("cart-test")
            .with_backend(BackendConfig::Memory)
            .with_persist_mode(PersistMode::Deferred);

        assert_eq!(config.storage_key, "cart-test");
        assert_eq!(config.backend, BackendConfig::Memory);
        assert_eq!(config.persist_mode, PersistMode::Deferred);
    }

    #[test]
    fn test_toml_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        let config = StoreConfig::new().with_backend(BackendConfig::Sqlite {
            path: dir.path().join("cart.db"),
        });

        config.to_file(&path).unwrap();
        let parsed = StoreConfig::from_file(&path).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_json_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.json");
        let config = StoreConfig::new()
            .with_backend(BackendConfig::Memory)
            .with_persist_mode(PersistMode::Deferred);

        config.to_file(&path).unwrap();
        assert_eq!(StoreConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(&path, "persist_mode = \"deferred\"\n").unwrap();

        let config = StoreConfig::from_file(&path).unwrap();
        assert_eq!(config.persist_mode, PersistMode::Deferred);
        assert_eq!(config.storage_key, "cart-storage");
    }

    #[test]
    fn test_invalid_key_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(&path, "storage_key = \"../cart\"\n").unwrap();

        let err = StoreConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, StorefrontError::Config(_)));
    }

    #[test]
    fn test_open_memory_backend() {
        let config = StoreConfig::new().with_backend(BackendConfig::Memory);
        let mut backend = config.open_backend().unwrap();
        backend.set("cart-storage", "x").unwrap();
        assert_eq!(backend.get("cart-storage").unwrap().as_deref(), Some("x"));
    }
}
