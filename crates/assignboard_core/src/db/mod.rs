//! Task storage database and the storage error taxonomy.
//!
//! # Responsibility
//! - Hand out SQLite connections whose `kv_entries` schema is current.
//! - Define `StorageError`, shared by the database and every store above it.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - A file stamped by a newer build is left untouched and refused.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure reading or writing persisted state.
#[derive(Debug)]
pub enum StorageError {
    /// SQLite rejected a statement or could not open the file.
    Sqlite(rusqlite::Error),
    /// The file was written by a build with a newer `kv_entries` schema.
    SchemaTooNew { found: u32, supported: u32 },
    /// One migration script failed; nothing from the batch was committed.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    Serialize(serde_json::Error),
    /// A stored value exists but does not decode.
    CorruptData { key: String, message: String },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite error: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "task database schema v{found} is newer than this build (v{supported})"
            ),
            Self::Migration { version, source } => {
                write!(f, "migration v{version} failed: {source}")
            }
            Self::Serialize(err) => write!(f, "failed to serialize stored value: {err}"),
            Self::CorruptData { key, message } => {
                write!(f, "corrupt stored value under `{key}`: {message}")
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Migration { source: err, .. } => Some(err),
            Self::Serialize(err) => Some(err),
            Self::SchemaTooNew { .. } | Self::CorruptData { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}
