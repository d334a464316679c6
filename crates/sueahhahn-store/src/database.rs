//! Database connection management.
//!
//! The [`Database`] struct owns a [`rusqlite::Connection`] and guarantees that
//! migrations are run before any other operation.  It is the on-disk home of
//! the durable slots used by the [`Store`](crate::Store).

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use rusqlite::Connection;

use crate::error::PersistenceError;
use crate::migrations;

/// Wrapper around a [`rusqlite::Connection`].
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the default application database.
    ///
    /// The database file is placed in the platform-appropriate data directory:
    /// - Linux:   `~/.local/share/sueahhahn/sueahhahn.db`
    /// - macOS:   `~/Library/Application Support/com.sueahhahn.sueahhahn/sueahhahn.db`
    /// - Windows: `{FOLDERID_RoamingAppData}\sueahhahn\sueahhahn\data\sueahhahn.db`
    pub fn new() -> Result<Self, PersistenceError> {
        let project_dirs = ProjectDirs::from("com", "sueahhahn", "sueahhahn")
            .ok_or(PersistenceError::NoDataDir)?;

        Self::open_in_dir(project_dirs.data_dir())
    }

    /// Open (or create) `sueahhahn.db` inside `dir`, creating the directory.
    pub fn open_in_dir(dir: &Path) -> Result<Self, PersistenceError> {
        std::fs::create_dir_all(dir)?;
        let db_path = dir.join("sueahhahn.db");

        tracing::info!(path = %db_path.display(), "opening database");

        Self::open_at(&db_path)
    }

    /// Open (or create) a database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, PersistenceError> {
        let conn = Connection::open(path)?;

        // Recommended SQLite settings.
        conn.pragma_update(None, "journal_mode", "WAL")?;

        migrations::run_migrations(&conn)?;

        Ok(Self { conn })
    }

    /// A private, non-durable database. Contents vanish on drop.
    pub fn open_in_memory() -> Result<Self, PersistenceError> {
        let conn = Connection::open_in_memory()?;
        migrations::run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Return a reference to the underlying `rusqlite::Connection`.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Return the filesystem path of the open database (if any).
    pub fn path(&self) -> Option<PathBuf> {
        self.conn
            .path()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }
}
