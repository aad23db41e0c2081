//! Typed error enum for the storage layer.
//!
//! Callers match on [`StorageError::Unavailable`] to tell "the database
//! could not be reached" apart from genuine SQL failures.

use rusqlite::ErrorCode;
use thiserror::Error;

/// Storage-layer error.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Pool exhausted, file cannot be opened, or the database stayed busy.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// SQL failure that retrying will not fix.
    #[error("database error: {0}")]
    Database(#[source] rusqlite::Error),

    /// Schema creation failed.
    #[error("migration error: {0}")]
    Migration(String),

    /// Creating the database directory failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Busy, locked and cannot-open map to `Unavailable`; everything else is
/// a plain database error.
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked | ErrorCode::CannotOpen) => {
                Self::Unavailable(err.to_string())
            },
            _ => Self::Database(err),
        }
    }
}

impl From<r2d2::Error> for StorageError {
    fn from(err: r2d2::Error) -> Self {
        Self::Unavailable(format!("failed to get connection from pool: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sqlite_failure(code: i32) -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(rusqlite::ffi::Error::new(code), None)
    }

    #[test]
    fn busy_and_locked_are_transient() {
        let busy = StorageError::from(sqlite_failure(rusqlite::ffi::SQLITE_BUSY));
        let locked = StorageError::from(sqlite_failure(rusqlite::ffi::SQLITE_LOCKED));
        let cant_open = StorageError::from(sqlite_failure(rusqlite::ffi::SQLITE_CANTOPEN));
        assert!(busy.is_transient());
        assert!(locked.is_transient());
        assert!(cant_open.is_transient());
    }

    #[test]
    fn constraint_failures_are_not_transient() {
        let err = StorageError::from(sqlite_failure(rusqlite::ffi::SQLITE_CONSTRAINT));
        assert!(!err.is_transient());
        assert!(matches!(err, StorageError::Database(_)));
        assert!(!StorageError::from(rusqlite::Error::QueryReturnedNoRows).is_transient());
    }
}
