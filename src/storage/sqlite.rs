//! SQLite page cache
//!
//! One row per URL, upserted individually, so each insertion is its own
//! atomic write instead of a full-file rewrite.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{CacheStore, StorageResult};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite backed page cache
pub struct SqliteCache {
    conn: Connection,
}

impl SqliteCache {
    /// Opens or creates the cache database
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory cache (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl CacheStore for SqliteCache {
    fn get(&self, url: &str) -> Option<String> {
        let body = self
            .conn
            .query_row(
                "SELECT body FROM page_cache WHERE url = ?1",
                params![url],
                |row| row.get(0),
            )
            .optional();

        match body {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Page cache lookup failed for {}: {}", url, e);
                None
            }
        }
    }

    fn insert(&mut self, url: &str, body: &str) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO page_cache (url, body, fetched_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(url) DO UPDATE SET body = excluded.body, fetched_at = excluded.fetched_at",
            params![url, body, now],
        )?;
        Ok(())
    }

    fn len(&self) -> usize {
        self.conn
            .query_row("SELECT COUNT(*) FROM page_cache", [], |row| {
                row.get::<_, i64>(0)
            })
            .map(|n| n as usize)
            .unwrap_or(0)
    }

    fn flush(&mut self) -> StorageResult<()> {
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
