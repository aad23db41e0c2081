//! Test utilities and module declarations for storage tests.

use crate::Storage;
use chrono::NaiveDate;
use physlog_core::{AppConfig, NewMeasurement, Position, composite_label};
use tempfile::TempDir;

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_storage() -> (Storage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let storage = Storage::open(&AppConfig::in_dir(temp_dir.path())).unwrap();
    (storage, temp_dir)
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_measurement(
    external: &str,
    local: &str,
    id: i64,
    date: (i32, u32, u32),
    test_item: &str,
    result: &str,
) -> NewMeasurement {
    NewMeasurement {
        subject_external_name: external.to_owned(),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        identifier: id,
        composite_label: composite_label(Position::P, local),
        position: Position::P,
        test_item: test_item.to_owned(),
        result: result.to_owned(),
    }
}

mod registry_tests;
