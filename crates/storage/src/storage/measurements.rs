use std::path::Path;

use physlog_core::{MeasurementRecord, NewMeasurement};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{OptionalExtension as _, params};

use super::{column_as_text, get_conn, open_pool};
use crate::error::StorageError;
use crate::migrations;
use crate::retry::{RetryConfig, with_retry};
use crate::traits::MeasurementStore;

const COLUMNS: &str =
    "seq, subject_external_name, date, identifier, composite_label, position, test_item, result";

/// `physical_rawdata` in its own database file.
#[derive(Clone, Debug)]
pub struct MeasurementTable {
    pool: Pool<SqliteConnectionManager>,
    retry: RetryConfig,
}

impl MeasurementTable {
    /// Open the measurement database, creating the table if needed.
    ///
    /// # Errors
    /// Returns error if the file cannot be opened or migrated.
    pub fn open(db_path: &Path, pool_size: u32, retry: RetryConfig) -> Result<Self, StorageError> {
        let pool = open_pool(db_path, pool_size, migrations::run_measurement_migrations)?;
        Ok(Self { pool, retry })
    }

    fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<MeasurementRecord> {
        Ok(MeasurementRecord {
            seq: row.get(0)?,
            subject_external_name: column_as_text(row, 1)?,
            date: column_as_text(row, 2)?,
            identifier: column_as_text(row, 3)?,
            composite_label: column_as_text(row, 4)?,
            position: column_as_text(row, 5)?,
            test_item: column_as_text(row, 6)?,
            result: column_as_text(row, 7)?,
        })
    }
}

impl MeasurementStore for MeasurementTable {
    fn list_all(&self) -> Result<Vec<MeasurementRecord>, StorageError> {
        with_retry(&self.retry, "measurements.list_all", || {
            let conn = get_conn(&self.pool)?;
            let mut stmt =
                conn.prepare(&format!("SELECT {COLUMNS} FROM physical_rawdata ORDER BY seq"))?;
            let records = stmt.query_map([], Self::row_to_record)?.collect::<Result<Vec<_>, _>>()?;
            Ok(records)
        })
    }

    fn insert(&self, measurement: &NewMeasurement) -> Result<MeasurementRecord, StorageError> {
        let date = measurement.date_text();
        let position = measurement.position.as_str();
        with_retry(&self.retry, "measurements.insert", || {
            let conn = get_conn(&self.pool)?;
            conn.execute(
                "INSERT INTO physical_rawdata
                   (subject_external_name, date, identifier, composite_label,
                    position, test_item, result)
                   VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    measurement.subject_external_name,
                    date,
                    measurement.identifier,
                    measurement.composite_label,
                    position,
                    measurement.test_item,
                    measurement.result,
                ],
            )?;
            Ok(MeasurementRecord {
                seq: conn.last_insert_rowid(),
                subject_external_name: measurement.subject_external_name.clone(),
                date: date.clone(),
                identifier: measurement.identifier.to_string(),
                composite_label: measurement.composite_label.clone(),
                position: position.to_owned(),
                test_item: measurement.test_item.clone(),
                result: measurement.result.clone(),
            })
        })
    }

    fn delete_last(&self) -> Result<Option<MeasurementRecord>, StorageError> {
        with_retry(&self.retry, "measurements.delete_last", || {
            let conn = get_conn(&self.pool)?;
            let deleted = conn
                .query_row(
                    &format!(
                        "DELETE FROM physical_rawdata
                           WHERE seq = (SELECT MAX(seq) FROM physical_rawdata)
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
        with_retry(&self.retry, "measurements.count", || {
            let conn = get_conn(&self.pool)?;
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM physical_rawdata", [], |row| row.get(0))?;
            Ok(count as usize)
        })
    }
}
