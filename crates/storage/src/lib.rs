//! Storage layer for physlog
//!
//! Two SQLite files, one table each, accessed through r2d2 pools. Rows are
//! only ever appended or removed from the end; `seq` is the insertion
//! counter that defines "last".

pub mod error;
mod migrations;
mod retry;
mod storage;
#[cfg(test)]
mod tests;
pub mod traits;

pub use error::StorageError;
pub use retry::RetryConfig;
pub use storage::{MeasurementTable, RegistryTable, Storage};
pub use traits::{MeasurementStore, RegistryStore};
