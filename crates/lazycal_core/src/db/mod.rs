//! SQLite bootstrap for the calendar's key-value storage.
//!
//! # Responsibility
//! - Open the database file that backs [`crate::repo::kv_repo::SqliteKvRepository`].
//! - Bring its schema up to date and confirm the storage table is usable.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - A returned connection always has the [`STORAGE_TABLE`] table and the
//!   trigger that keeps its `updated_at` column current.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

/// Table holding one row per storage key.
pub const STORAGE_TABLE: &str = "kv_store";

pub type DbResult<T> = Result<T, DbError>;

/// Failure to open or upgrade the calendar database.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// File was written by a newer release; opening it would risk data loss.
    SchemaTooNew { found: u32, supported: u32 },
    /// File claims a current schema but has no storage table, e.g. a
    /// database created by another application.
    MissingStorageTable { schema_version: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "calendar database schema {found} was written by a newer release (supported up to {supported})"
            ),
            Self::MissingStorageTable { schema_version } => write!(
                f,
                "database at schema {schema_version} has no `{STORAGE_TABLE}` table; not a calendar database"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } | Self::MissingStorageTable { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
