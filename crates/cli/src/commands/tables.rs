//! Registry and measurement table commands.

use anyhow::Result;
use physlog_core::{
    MSG_MEASUREMENT_ADDED, MSG_NOTHING_TO_DELETE, MSG_REGISTRY_ADDED, MSG_ROW_DELETED,
};
use physlog_service::{DashboardService, MeasurementInput};
use serde::Serialize;
use serde_json::json;

use super::print_json;
use crate::user_error;

fn print_deleted<T: Serialize>(deleted: Option<T>) -> Result<()> {
    match deleted {
        Some(record) => print_json(&json!({ "message": MSG_ROW_DELETED, "record": record })),
        None => print_json(&json!({ "message": MSG_NOTHING_TO_DELETE })),
    }
}

pub(crate) fn list_registry(service: &DashboardService) -> Result<()> {
    print_json(&serde_json::to_value(&service.snapshot().registry)?)
}

pub(crate) fn add_registry(
    service: &DashboardService,
    local_name: &str,
    external_name: &str,
    identifier: &str,
) -> Result<()> {
    let record = service
        .add_registry_entry(local_name, external_name, identifier)
        .map_err(user_error)?;
    print_json(&json!({ "message": MSG_REGISTRY_ADDED, "record": record }))
}

pub(crate) fn delete_last_registry(service: &DashboardService) -> Result<()> {
    print_deleted(service.delete_last_registry_entry().map_err(user_error)?)
}

pub(crate) fn list_measurements(service: &DashboardService) -> Result<()> {
    print_json(&serde_json::to_value(&service.snapshot().measurements)?)
}

pub(crate) fn add_measurement(service: &DashboardService, input: MeasurementInput) -> Result<()> {
    let record = service.add_measurement(&input).map_err(user_error)?;
    print_json(&json!({ "message": MSG_MEASUREMENT_ADDED, "record": record }))
}

pub(crate) fn delete_last_measurement(service: &DashboardService) -> Result<()> {
    print_deleted(service.delete_last_measurement().map_err(user_error)?)
}
