//! Error types for the questions data layer.

use std::io;
use std::path::PathBuf;

/// Result type alias for questions operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for the questions data layer.
///
/// Lookups that find nothing are not errors: single-row lookups return
/// `Ok(None)` and multi-row lookups return an empty `Vec`. The `NotFound`
/// variants are only raised at the CLI edge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database error (failed query, schema mismatch, or failure to open).
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The store file does not exist.
    #[error("No database found at {}", .0.display())]
    NotInitialized(PathBuf),

    /// The store is missing one of the forum tables.
    #[error("Database is missing table `{0}`")]
    MissingTable(String),

    /// A single entity lookup came back empty.
    #[error("{entity} #{id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// No user matches the given name.
    #[error("User {fname} {lname} not in database")]
    UserNotFound { fname: String, lname: String },
}

impl Error {
    /// Shorthand for a missing entity of type `entity`.
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }
}
