use sueahhahn_shared::types::{EntityKind, Uid};
use thiserror::Error;

/// Errors returned by the store's read/write API.
///
/// Durable-storage failures are reported as [`PersistenceError`] by the
/// persistence layer and never reach a caller of a mutation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// A uniqueness, referential or range invariant would be violated.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The operation referenced an id that does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },
}

impl StoreError {
    pub(crate) fn not_found(kind: EntityKind, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

/// The specific invariant a rejected write would have broken.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: EntityKind, id: String },

    #[error("username already taken: {0}")]
    DuplicateUsername(String),

    #[error("username must not be empty")]
    EmptyUsername,

    #[error("username has leading or trailing whitespace: {0:?}")]
    PaddedUsername(String),

    #[error("unknown user: {0}")]
    UnknownUser(Uid),

    #[error("a user cannot follow themselves")]
    SelfFollow,

    #[error("a user cannot review themselves")]
    SelfReview,

    #[error("bio is {len} characters, limit is {max}")]
    BioTooLong { len: usize, max: usize },

    #[error("rating {0} is outside 0..=5")]
    RatingOutOfRange(f64),

    #[error("price must be a finite, non-negative number (got {0})")]
    InvalidPrice(f64),
}

/// Failures of the durable copy. Logged, never fatal.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// SQLite error.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to determine a platform data directory.
    #[error("Could not determine application data directory")]
    NoDataDir,

    /// Generic I/O error (e.g. creating the database directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Migration failure.
    #[error("Migration error: {0}")]
    Migration(String),

    /// The stored document is not valid JSON for a snapshot.
    #[error("Malformed snapshot document: {0}")]
    Json(#[from] serde_json::Error),

    /// The stored document parsed but breaks a store invariant.
    #[error("Inconsistent snapshot document: {0}")]
    Inconsistent(#[from] ValidationError),

    /// Write refused by the slot (used by test slots and read-only media).
    #[error("Slot unavailable: {0}")]
    Unavailable(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
