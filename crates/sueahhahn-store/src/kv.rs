//! Key-value access to the `kv_store` table.

use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use crate::database::Database;
use crate::error::PersistenceError;

impl Database {
    /// Fetch the value stored under `key`, if any.
    pub fn get_value(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let value = self
            .conn()
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Insert or overwrite the value stored under `key`.
    pub fn put_value(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.conn().execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}
