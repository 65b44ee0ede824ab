//! Error types for the table store boundary.
//!
//! Errors are classified by what the caller should do with them:
//! - Unavailable: backing store unreachable, render a degraded/empty state
//! - Everything else: a real fault worth surfacing to the operator
//!
//! Schema mismatches and unparseable field values are deliberately NOT
//! errors; they coerce to defaults during row conversion (see `table`).

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by [`crate::store::TableStore`] and its backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Backing store unavailable: {0}")]
    Unavailable(String),

    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Home directory not found")]
    HomeDirNotFound,

    #[error("Failed to create store directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Schema migration failed: {0}")]
    Migration(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Returns true when the caller should degrade to an empty state
    /// rather than treat the failure as fatal.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            StoreError::Unavailable(_) | StoreError::HomeDirNotFound | StoreError::CreateDir(..)
        )
    }
}
