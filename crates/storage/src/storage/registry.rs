use std::path::Path;

use physlog_core::RegistryRecord;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{OptionalExtension as _, params};

use super::{column_as_text, get_conn, open_pool};
use crate::error::StorageError;
use crate::migrations;
use crate::retry::{RetryConfig, with_retry};
use crate::traits::RegistryStore;

const COLUMNS: &str = "seq, local_name, external_name, identifier";

/// `id_table` in its own database file.
#[derive(Clone, Debug)]
pub struct RegistryTable {
    pool: Pool<SqliteConnectionManager>,
    retry: RetryConfig,
}

impl RegistryTable {
    /// Open the registry database, creating the table if needed.
    ///
    /// # Errors
    /// Returns error if the file cannot be opened or migrated.
    pub fn open(db_path: &Path, pool_size: u32, retry: RetryConfig) -> Result<Self, StorageError> {
        let pool = open_pool(db_path, pool_size, migrations::run_registry_migrations)?;
        Ok(Self { pool, retry })
    }

    fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<RegistryRecord> {
        Ok(RegistryRecord {
            seq: row.get(0)?,
            local_name: column_as_text(row, 1)?,
            external_name: column_as_text(row, 2)?,
            identifier: column_as_text(row, 3)?,
        })
    }
}

impl RegistryStore for RegistryTable {
    fn list_all(&self) -> Result<Vec<RegistryRecord>, StorageError> {
        with_retry(&self.retry, "registry.list_all", || {
            let conn = get_conn(&self.pool)?;
            let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM id_table ORDER BY seq"))?;
            let records = stmt.query_map([], Self::row_to_record)?.collect::<Result<Vec<_>, _>>()?;
            Ok(records)
        })
    }

    fn insert(
        &self,
        local_name: &str,
        external_name: &str,
        identifier: i64,
    ) -> Result<RegistryRecord, StorageError> {
        with_retry(&self.retry, "registry.insert", || {
            let conn = get_conn(&self.pool)?;
            conn.execute(
                "INSERT INTO id_table (local_name, external_name, identifier) VALUES (?1, ?2, ?3)",
                params![local_name, external_name, identifier],
            )?;
            Ok(RegistryRecord {
                seq: conn.last_insert_rowid(),
                local_name: local_name.to_owned(),
                external_name: external_name.to_owned(),
                identifier: identifier.to_string(),
            })
        })
    }

    fn delete_last(&self) -> Result<Option<RegistryRecord>, StorageError> {
        with_retry(&self.retry, "registry.delete_last", || {
            let conn = get_conn(&self.pool)?;
            let deleted = conn
                .query_row(
                    &format!(
                        "DELETE FROM id_table WHERE seq = (SELECT MAX(seq) FROM id_table)
                           RETURNING {COLUMNS}"
                    ),
                    [],
                    Self::row_to_record,
                )
                .optional()?;
            Ok(deleted)
        })
    }

    fn count(&self) -> Result<usize, StorageError> {
        with_retry(&self.retry, "registry.count", || {
            let conn = get_conn(&self.pool)?;
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM id_table", [], |row| row.get(0))?;
            Ok(count as usize)
        })
    }
}
