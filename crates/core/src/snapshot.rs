use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::join::{
    FilteredSeries, MergedView, distinct_subject_names, distinct_test_items, filter_series, merge,
};
use crate::measurement::MeasurementRecord;
use crate::registry::RegistryRecord;

/// Immutable copy of both tables taken at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub registry: Vec<RegistryRecord>,
    pub measurements: Vec<MeasurementRecord>,
    pub taken_at: DateTime<Utc>,
}

impl Snapshot {
    #[must_use]
    pub fn new(registry: Vec<RegistryRecord>, measurements: Vec<MeasurementRecord>) -> Self {
        Self { registry, measurements, taken_at: Utc::now() }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// First registry row with this local name, in storage order.
    #[must_use]
    pub fn find_subject(&self, local_name: &str) -> Option<&RegistryRecord> {
        self.registry.iter().find(|r| r.local_name == local_name)
    }

    #[must_use]
    pub fn has_identifier(&self, identifier: i64) -> bool {
        self.registry.iter().any(|r| r.parsed_identifier() == Ok(identifier))
    }

    #[must_use]
    pub fn merged(&self) -> MergedView {
        merge(&self.registry, &self.measurements)
    }

    #[must_use]
    pub fn filtered(&self, subject: &str, test_item: &str) -> FilteredSeries {
        filter_series(&self.merged(), subject, test_item)
    }

    #[must_use]
    pub fn test_items(&self) -> Vec<String> {
        distinct_test_items(&self.measurements)
    }

    #[must_use]
    pub fn subject_names(&self) -> Vec<String> {
        distinct_subject_names(&self.merged())
    }
}
