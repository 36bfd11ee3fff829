//! Flat JSON page cache
//!
//! The whole cache is one JSON object `{ "<url>": "<body>", ... }`, read
//! wholesale on open and rewritten in full after every insertion.

use crate::storage::traits::{CacheStore, StorageResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// JSON file backed page cache
#[derive(Debug)]
pub struct JsonFileCache {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileCache {
    /// Opens the cache file, starting empty if it does not exist yet
    pub fn open(path: &Path) -> StorageResult<Self> {
        let entries = if path.exists() {
            let content = fs::read_to_string(path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!(
            "Loaded {} cached pages from {}",
            entries.len(),
            path.display()
        );

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the full map to a sibling temp file, then renames it into place
    fn persist(&self) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, serde_json::to_string(&self.entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl CacheStore for JsonFileCache {
    fn get(&self, url: &str) -> Option<String> {
        self.entries.get(url).cloned()
    }

    fn insert(&mut self, url: &str, body: &str) -> StorageResult<()> {
        self.entries.insert(url.to_string(), body.to_string());
        self.persist()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn flush(&mut self) -> StorageResult<()> {
        self.persist()
    }
}
