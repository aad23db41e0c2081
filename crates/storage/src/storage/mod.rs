//! `SQLite` storage implementation
//!
//! One r2d2 pool per table file. All methods are synchronous; the HTTP
//! layer moves them onto the blocking pool.

#![allow(
    clippy::as_conversions,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "SQLite i64 <-> Rust usize conversions are safe within DB row counts"
)]

mod measurements;
mod registry;

use std::path::Path;
use std::time::Duration;

use physlog_core::AppConfig;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use rusqlite::types::Value;

use crate::error::StorageError;
use crate::retry::RetryConfig;

pub use measurements::MeasurementTable;
pub use registry::RegistryTable;

/// Type alias for pooled connection
pub(crate) type PooledConn = PooledConnection<SqliteConnectionManager>;

type Migration = fn(&Connection) -> Result<(), rusqlite::Error>;

/// Both tables, opened from one configuration.
#[derive(Clone, Debug)]
pub struct Storage {
    pub registry: RegistryTable,
    pub measurements: MeasurementTable,
}

impl Storage {
    /// Open (creating if needed) both database files.
    ///
    /// # Errors
    /// Returns error if a file cannot be opened or its schema cannot be created.
    pub fn open(config: &AppConfig) -> Result<Self, StorageError> {
        let retry = RetryConfig::with_attempts(config.store_attempts);
        Ok(Self {
            registry: RegistryTable::open(&config.registry_db, config.pool_size, retry)?,
            measurements: MeasurementTable::open(&config.measurement_db, config.pool_size, retry)?,
        })
    }
}

/// Get a connection from the pool
pub(crate) fn get_conn(pool: &Pool<SqliteConnectionManager>) -> Result<PooledConn, StorageError> {
    Ok(pool.get()?)
}

/// Concurrency settings applied to every new connection.
fn init_connection(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "PRAGMA busy_timeout = 5000;
         PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;",
    )?;
    Ok(())
}

/// Build a pool for `db_path` and run `migrate` on its first connection.
pub(crate) fn open_pool(
    db_path: &Path,
    pool_size: u32,
    migrate: Migration,
) -> Result<Pool<SqliteConnectionManager>, StorageError> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let manager = SqliteConnectionManager::file(db_path).with_init(init_connection);
    let pool = Pool::builder()
        .max_size(pool_size.max(1))
        .connection_timeout(Duration::from_secs(5))
        .build(manager)?;

    let conn = get_conn(&pool)?;
    migrate(&conn).map_err(|e| StorageError::Migration(e.to_string()))?;
    drop(conn);

    tracing::info!(
        path = %db_path.display(),
        pool_size,
        "Storage initialized with connection pool"
    );
    Ok(pool)
}

/// Read a loosely typed column as text.
///
/// Rows written by other tools may hold REAL results, text identifiers or
/// NULLs; they are surfaced as text and judged later by the join-filter
/// engine, so no stored row is lost on read.
pub(crate) fn column_as_text(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(match row.get::<_, Value>(idx)? {
        Value::Null => String::new(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s,
        Value::Blob(b) => String::from_utf8_lossy(&b).into_owned(),
    })
}
