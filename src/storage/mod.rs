//! Storage module for the persistent page cache
//!
//! Fetched response bodies are cached by exact request URL so repeated runs
//! do not hit directory sites again. Two backends are available:
//! - `JsonFileCache`: a flat JSON object rewritten on every insertion
//! - `SqliteCache`: one row per URL, upserted individually
//!
//! With caching disabled a throwaway `MemoryCache` stands in, so no cache
//! file is touched.

mod json_file;
mod memory;
mod schema;
mod sqlite;
mod traits;

pub use json_file::JsonFileCache;
pub use memory::MemoryCache;
pub use sqlite::SqliteCache;
pub use traits::{CacheStore, StorageError, StorageResult};

use crate::config::{CacheBackend, CrawlSettings};

/// Opens the page cache configured in `settings`
///
/// # Returns
///
/// * `Ok(Box<dyn CacheStore + Send>)` - Cache loaded and ready
/// * `Err(StorageError)` - The cache file could not be read or created
pub fn open_cache(settings: &CrawlSettings) -> StorageResult<Box<dyn CacheStore + Send>> {
    if !settings.cache_enabled {
        tracing::info!("Page cache disabled");
        return Ok(Box::new(MemoryCache::new()));
    }

    let path = settings.cache_path.as_path();
    let cache: Box<dyn CacheStore + Send> = match settings.cache_backend {
        CacheBackend::Json => Box::new(JsonFileCache::open(path)?),
        CacheBackend::Sqlite => Box::new(SqliteCache::new(path)?),
    };

    tracing::info!(
        "Page cache at {} holds {} entries",
        path.display(),
        cache.len()
    );

    Ok(cache)
}
