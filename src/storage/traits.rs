//! Storage traits and error types
//!
//! This module defines the trait interface for page cache backends and
//! associated error types.

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Persistent mapping from exact request URL to raw response body
///
/// Entries only ever accumulate during a run. `insert` must have persisted
/// the entry by the time it returns, so a crash loses nothing that was
/// inserted successfully.
pub trait CacheStore {
    /// Returns the cached body for a URL
    fn get(&self, url: &str) -> Option<String>;

    /// Stores a body and persists it
    fn insert(&mut self, url: &str, body: &str) -> StorageResult<()>;

    /// Number of cached URLs
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, url: &str) -> bool {
        self.get(url).is_some()
    }

    /// Forces any buffered state to disk
    fn flush(&mut self) -> StorageResult<()>;
}
