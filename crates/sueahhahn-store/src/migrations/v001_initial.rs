//! v001 -- Initial schema creation.
//!
//! Creates the `kv_store` table that holds durable slots such as the
//! marketplace snapshot document.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Key-value slots
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS kv_store (
    key        TEXT PRIMARY KEY NOT NULL,
    value      TEXT NOT NULL,              -- serialized document
    updated_at TEXT NOT NULL               -- ISO-8601 / RFC-3339
);
"#;

/// Apply the v001 migration.
pub fn up(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(UP_SQL)
}
