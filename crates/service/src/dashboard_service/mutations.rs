//! Validated insert and delete-last commands.
//!
//! Validation always completes before the store is touched, so a failed
//! command writes nothing.

use std::sync::PoisonError;

use chrono::NaiveDate;
use physlog_core::{
    MeasurementRecord, NewMeasurement, Position, RegistryRecord, composite_label, parse_identifier,
    parse_result,
};
use serde::{Deserialize, Serialize};

use super::DashboardService;
use crate::error::ServiceError;

/// Measurement form fields as the user entered them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementInput {
    /// Registry local name.
    pub subject: String,
    pub date: NaiveDate,
    pub position: String,
    pub test_item: String,
    pub result: String,
}

impl DashboardService {
    /// Append a registry row. The identifier must be an integer.
    pub fn add_registry_entry(
        &self,
        local_name: &str,
        external_name: &str,
        raw_identifier: &str,
    ) -> Result<RegistryRecord, ServiceError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let local_name = local_name.trim();
        if local_name.is_empty() {
            return Err(ServiceError::Validation("empty local name".to_owned()));
        }
        let identifier = parse_identifier(raw_identifier)?;

        if self.options.strict {
            let snapshot = self.snapshot();
            if snapshot.find_subject(local_name).is_some() {
                return Err(ServiceError::Conflict(format!("duplicate local name: {local_name}")));
            }
            if snapshot.has_identifier(identifier) {
                return Err(ServiceError::Conflict(format!("duplicate identifier: {identifier}")));
            }
        }

        let record = self.registry.insert(local_name, external_name.trim(), identifier)?;
        tracing::info!(seq = record.seq, identifier, local_name, "registry row added");
        self.reload_after_write("registry.insert");
        Ok(record)
    }

    /// Remove the most recently inserted registry row.
    ///
    /// `Ok(None)` means the table was already empty.
    pub fn delete_last_registry_entry(&self) -> Result<Option<RegistryRecord>, ServiceError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let deleted = self.registry.delete_last()?;
        match &deleted {
            Some(record) => {
                tracing::info!(seq = record.seq, "last registry row deleted");
                self.reload_after_write("registry.delete_last");
            },
            None => tracing::info!("registry is empty, nothing to delete"),
        }
        Ok(deleted)
    }

    /// Validate and append a measurement.
    ///
    /// Checks run in order and the first failure wins: subject lookup,
    /// numeric result, position, non-empty test item, then the subject's
    /// stored identifier. The subject name is trimmed like registry names.
    pub fn add_measurement(
        &self,
        input: &MeasurementInput,
    ) -> Result<MeasurementRecord, ServiceError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let snapshot = self.snapshot();

        let subject_name = input.subject.trim();
        let subject = snapshot
            .find_subject(subject_name)
            .ok_or_else(|| ServiceError::Lookup(format!("unknown subject: {subject_name}")))?;
        parse_result(&input.result)?;
        let position: Position = input.position.parse()?;
        let test_item = input.test_item.trim();
        if test_item.is_empty() {
            return Err(ServiceError::Validation("empty test item".to_owned()));
        }
        let identifier = subject.parsed_identifier()?;

        let new = NewMeasurement {
            subject_external_name: subject.external_name.clone(),
            date: input.date,
            identifier,
            composite_label: composite_label(position, &subject.local_name),
            position,
            test_item: test_item.to_owned(),
            result: input.result.trim().to_owned(),
        };
        let record = self.measurements.insert(&new)?;
        tracing::info!(
            seq = record.seq,
            label = %record.composite_label,
            test_item = %record.test_item,
            "measurement row added"
        );
        self.reload_after_write("measurements.insert");
        Ok(record)
    }

    /// Remove the most recently inserted measurement row.
    ///
    /// `Ok(None)` means the table was already empty.
    pub fn delete_last_measurement(&self) -> Result<Option<MeasurementRecord>, ServiceError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let deleted = self.measurements.delete_last()?;
        match &deleted {
            Some(record) => {
                tracing::info!(seq = record.seq, "last measurement row deleted");
                self.reload_after_write("measurements.delete_last");
            },
            None => tracing::info!("measurement table is empty, nothing to delete"),
        }
        Ok(deleted)
    }
}
