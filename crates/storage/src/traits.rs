//! Store contracts used by the service layer.
//!
//! Both tables are append-only from the caller's point of view: rows are
//! listed in insertion order, added at the end, and removed from the end.

use physlog_core::{MeasurementRecord, NewMeasurement, RegistryRecord};

use crate::error::StorageError;

pub trait RegistryStore: Send + Sync {
    /// All rows in insertion order.
    fn list_all(&self) -> Result<Vec<RegistryRecord>, StorageError>;

    /// Append one row. Duplicate names or identifiers are accepted.
    fn insert(
        &self,
        local_name: &str,
        external_name: &str,
        identifier: i64,
    ) -> Result<RegistryRecord, StorageError>;

    /// Remove the most recently inserted row; `None` when the table is empty.
    fn delete_last(&self) -> Result<Option<RegistryRecord>, StorageError>;

    fn count(&self) -> Result<usize, StorageError>;
}

pub trait MeasurementStore: Send + Sync {
    /// All rows in insertion order.
    fn list_all(&self) -> Result<Vec<MeasurementRecord>, StorageError>;

    /// Append one row. The identifier is not checked against the registry.
    fn insert(&self, measurement: &NewMeasurement) -> Result<MeasurementRecord, StorageError>;

    /// Remove the most recently inserted row; `None` when the table is empty.
    fn delete_last(&self) -> Result<Option<MeasurementRecord>, StorageError>;

    fn count(&self) -> Result<usize, StorageError>;
}
