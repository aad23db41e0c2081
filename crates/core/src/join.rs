//! Join-filter engine.
//!
//! Merges measurement rows with the deduplicated registry on `identifier`,
//! then narrows the merged view to one subject and one test item. Every
//! function here is pure; inputs are snapshot slices.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::measurement::{MeasurementRecord, parse_result, parse_stored_date};
use crate::registry::{RegistryRecord, parse_identifier};

/// A measurement row with its parsed values and the registry name attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRow {
    pub seq: i64,
    /// `None` when no registry row carries this identifier.
    pub local_name: Option<String>,
    pub subject_external_name: String,
    pub date: NaiveDate,
    pub identifier: i64,
    pub composite_label: String,
    pub position: String,
    pub test_item: String,
    pub result: f64,
}

/// Table a skipped row was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowSource {
    Registry,
    Measurement,
}

/// A stored row that could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    pub source: RowSource,
    pub seq: i64,
    pub local_name: Option<String>,
    pub test_item: String,
    pub reason: String,
}

/// Every measurement row joined to the registry, in storage order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergedView {
    pub rows: Vec<MergedRow>,
    pub skipped: Vec<SkippedRow>,
}

/// Rows for one subject and test item, sorted by date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilteredSeries {
    pub rows: Vec<MergedRow>,
    /// Matching rows dropped because their date or result did not parse.
    pub skipped_rows: usize,
}

impl FilteredSeries {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Keep the first registry row for every `local_name`, in storage order.
#[must_use]
pub fn dedup_registry(registry: &[RegistryRecord]) -> Vec<&RegistryRecord> {
    let mut seen: HashSet<&str> = HashSet::new();
    registry.iter().filter(|r| seen.insert(r.local_name.as_str())).collect()
}

/// Left-join measurements to the deduplicated registry on `identifier`.
///
/// When two surviving registry rows share an identifier the earlier one
/// names the measurement, so no raw row appears twice. Registry rows whose
/// identifier is not an integer name nothing and are reported first in
/// `skipped`, followed by measurement rows whose identifier, date or
/// result does not parse.
#[must_use]
pub fn merge(registry: &[RegistryRecord], measurements: &[MeasurementRecord]) -> MergedView {
    let mut view = MergedView::default();

    let mut names: HashMap<i64, &str> = HashMap::new();
    for record in dedup_registry(registry) {
        match record.parsed_identifier() {
            Ok(id) => {
                names.entry(id).or_insert(record.local_name.as_str());
            },
            Err(e) => {
                tracing::warn!(seq = record.seq, error = %e, "skipping malformed registry row");
                view.skipped.push(SkippedRow {
                    source: RowSource::Registry,
                    seq: record.seq,
                    local_name: Some(record.local_name.clone()),
                    test_item: String::new(),
                    reason: e.to_string(),
                });
            },
        }
    }

    for m in measurements {
        let identifier = parse_identifier(&m.identifier);
        let local_name =
            identifier.as_ref().ok().and_then(|id| names.get(id)).map(|n| (*n).to_owned());
        let parsed = identifier.and_then(|id| {
            let date = parse_stored_date(&m.date)?;
            let result = parse_result(&m.result)?;
            Ok((id, date, result))
        });
        match parsed {
            Ok((identifier, date, result)) => view.rows.push(MergedRow {
                seq: m.seq,
                local_name,
                subject_external_name: m.subject_external_name.clone(),
                date,
                identifier,
                composite_label: m.composite_label.clone(),
                position: m.position.clone(),
                test_item: m.test_item.clone(),
                result,
            }),
            Err(e) => {
                tracing::warn!(seq = m.seq, error = %e, "skipping malformed measurement row");
                view.skipped.push(SkippedRow {
                    source: RowSource::Measurement,
                    seq: m.seq,
                    local_name,
                    test_item: m.test_item.clone(),
                    reason: e.to_string(),
                });
            },
        }
    }
    view
}

/// Narrow a merged view to one subject and test item, sorted by date.
///
/// The sort is stable, so rows sharing a date keep their storage order.
#[must_use]
pub fn filter_series(view: &MergedView, subject: &str, test_item: &str) -> FilteredSeries {
    let matches = |name: Option<&str>, item: &str| name == Some(subject) && item == test_item;

    let mut rows: Vec<MergedRow> = view
        .rows
        .iter()
        .filter(|r| matches(r.local_name.as_deref(), &r.test_item))
        .cloned()
        .collect();
    rows.sort_by_key(|r| r.date);

    let skipped_rows = view
        .skipped
        .iter()
        .filter(|s| s.source == RowSource::Measurement)
        .filter(|s| matches(s.local_name.as_deref(), &s.test_item))
        .count();

    FilteredSeries { rows, skipped_rows }
}

/// Merge and filter in one go.
#[must_use]
pub fn join_filter(
    registry: &[RegistryRecord],
    measurements: &[MeasurementRecord],
    subject: &str,
    test_item: &str,
) -> FilteredSeries {
    filter_series(&merge(registry, measurements), subject, test_item)
}

/// Distinct test items in order of first appearance.
#[must_use]
pub fn distinct_test_items(measurements: &[MeasurementRecord]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    measurements
        .iter()
        .filter(|m| seen.insert(m.test_item.as_str()))
        .map(|m| m.test_item.clone())
        .collect()
}

/// Distinct joined subject names in order of first appearance.
///
/// Orphan rows (no registry match) contribute nothing.
#[must_use]
pub fn distinct_subject_names(view: &MergedView) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    view.rows
        .iter()
        .filter_map(|r| r.local_name.as_deref())
        .filter(|n| seen.insert(n))
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "join_tests.rs"]
mod tests;
