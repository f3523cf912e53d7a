//! Error types for Storefront Core
//!
//! Cart mutations never fail: a missing product id is a silent no-op. The
//! errors below come from the persistence backends and from configuration.
//! We use `thiserror` for the Display/Error implementations.

use thiserror::Error;

/// Result type alias for Storefront operations
pub type Result<T> = std::result::Result<T, StorefrontError>;

/// Main error type for Storefront operations
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// Storage backend errors (SQLite, key validation)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Invalid caller input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        source: Box<StorefrontError>,
    },
}

impl From<rusqlite::Error> for StorefrontError {
    fn from(e: rusqlite::Error) -> Self {
        StorefrontError::Storage(e.to_string())
    }
}

impl From<toml::de::Error> for StorefrontError {
    fn from(e: toml::de::Error) -> Self {
        StorefrontError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for StorefrontError {
    fn from(e: toml::ser::Error) -> Self {
        StorefrontError::Config(e.to_string())
    }
}

impl StorefrontError {
    /// Add context to an error
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to a Result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add lazy context to a Result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<StorefrontError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().context(f()))
    }
}
