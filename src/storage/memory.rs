//! In-memory page cache
//!
//! Used when caching is disabled: nothing is read from or written to disk.

use crate::storage::traits::{CacheStore, StorageResult};
use std::collections::BTreeMap;

/// Page cache that lives only as long as the run
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: BTreeMap<String, String>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, url: &str) -> Option<String> {
        self.entries.get(url).cloned()
    }

    fn insert(&mut self, url: &str, body: &str) -> StorageResult<()> {
        self.entries.insert(url.to_string(), body.to_string());
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn flush(&mut self) -> StorageResult<()> {
        Ok(())
    }
}
