//! Database schema for the SQLite page cache

use rusqlite::Connection;

/// SQL schema for the page cache
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS page_cache (
    url TEXT PRIMARY KEY NOT NULL,
    body TEXT NOT NULL,
    fetched_at TEXT NOT NULL
);
"#;

/// Creates the page cache table if it does not exist
pub fn initialize_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}
