//! Response types (Serialize)

use physlog_core::{MergedRow, SkippedRow};
use serde::Serialize;

/// Result of a mutation: a status message plus the affected row, if any.
#[derive(Debug, Serialize)]
pub struct MutationResponse<T> {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<T>,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub message: &'static str,
    pub registry_rows: usize,
    pub measurement_rows: usize,
    pub taken_at: String,
}

#[derive(Debug, Serialize)]
pub struct MergedResponse {
    pub rows: Vec<MergedRow>,
    pub skipped_rows: usize,
    pub skipped: Vec<SkippedRow>,
}

#[derive(Debug, Serialize)]
#[non_exhaustive]
pub struct VersionResponse {
    pub version: &'static str,
}
