//! Database connection management.

use crate::error::{Error, Result};
use rusqlite::{Connection as SqliteConnection, OpenFlags, OptionalExtension, Params, Row};
use std::path::{Path, PathBuf};

/// Path to the forum database file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbPath {
    path: PathBuf,
}

impl DbPath {
    /// Default database filename.
    pub const DEFAULT_FILE: &'static str = "questions.db";

    /// Create a new DbPath with the default filename "questions.db".
    pub fn default_path() -> Self {
        Self {
            path: PathBuf::from(Self::DEFAULT_FILE),
        }
    }

    /// Create a DbPath from a string path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the path as a reference.
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// Check if the database file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl Default for DbPath {
    fn default() -> Self {
        Self::default_path()
    }
}

/// Database connection wrapper.
///
/// One handle is opened by the caller and lent to every repository. Rows are
/// always read by column name and SQLite values are converted to Rust types
/// through `FromSql`.
pub struct Connection {
    conn: SqliteConnection,
}

impl Connection {
    /// Open a read-write connection, creating the file if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let conn = SqliteConnection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        tracing::info!(path = %path.display(), "opened database");
        Ok(Self { conn })
    }

    /// Open an existing database without write access.
    pub fn open_read_only(path: &DbPath) -> Result<Self> {
        if !path.exists() {
            return Err(Error::NotInitialized(path.as_path().to_path_buf()));
        }
        let conn = SqliteConnection::open_with_flags(
            path.as_path(),
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        tracing::info!(path = %path.as_path().display(), "opened database read-only");
        Ok(Self { conn })
    }

    /// Open an in-memory database for testing.
    pub fn open_in_memory() -> Result<Self> {
        let conn = SqliteConnection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    /// Close the connection, reporting any error from SQLite.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| Error::from(e))?;
        tracing::info!("closed database");
        Ok(())
    }

    /// Get a reference to the underlying SqliteConnection.
    pub fn as_conn(&self) -> &SqliteConnection {
        &self.conn
    }

    /// Run one or more `;`-separated statements that return no rows.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        tracing::debug!(sql, "execute_batch");
        self.conn.execute_batch(sql).map_err(Error::from)
    }

    /// Query at most one row. No match yields `Ok(None)`.
    pub fn query_row_optional<T, P, F>(&self, sql: &str, params: P, f: F) -> Result<Option<T>>
    where
        P: Params,
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        tracing::debug!(sql, "query_row");
        self.conn
            .query_row(sql, params, f)
            .optional()
            .map_err(Error::from)
    }

    /// Query multiple rows.
    pub fn query<T, P, F>(&self, sql: &str, params: P, f: F) -> Result<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        tracing::debug!(sql, "query");
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, f)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Check if a table exists.
    pub fn table_exists(&self, table_name: &str) -> Result<bool> {
        let found = self.query_row_optional(
            "SELECT name FROM sqlite_master WHERE type='table' AND name=?",
            [table_name],
            |_| Ok(()),
        )?;
        Ok(found.is_some())
    }
}
