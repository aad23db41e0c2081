//! Measurement rows and the value types used to build them.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Playing position of the subject at measurement time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Position {
    /// Pitcher
    P,
    /// Catcher
    C,
    /// Infielder
    IF,
    /// Outfielder
    OF,
}

impl Position {
    pub const ALL_VARIANTS: &'static [Position] =
        &[Position::P, Position::C, Position::IF, Position::OF];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::P => "P",
            Self::C => "C",
            Self::IF => "IF",
            Self::OF => "OF",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "P" => Ok(Self::P),
            "C" => Ok(Self::C),
            "IF" => Ok(Self::IF),
            "OF" => Ok(Self::OF),
            _ => Err(CoreError::InvalidPosition(s.to_owned())),
        }
    }
}

/// One row of `physical_rawdata` exactly as stored.
///
/// Every column stays textual here: rows written by other tools may not
/// parse, and the join-filter engine decides what to do with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub seq: i64,
    pub subject_external_name: String,
    pub date: String,
    pub identifier: String,
    pub composite_label: String,
    pub position: String,
    pub test_item: String,
    pub result: String,
}

/// A validated measurement ready to be written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMeasurement {
    pub subject_external_name: String,
    pub date: NaiveDate,
    pub identifier: i64,
    pub composite_label: String,
    pub position: Position,
    pub test_item: String,
    /// Result text as typed; already checked to parse as `f64`.
    pub result: String,
}

impl NewMeasurement {
    /// Date in the form it is persisted.
    #[must_use]
    pub fn date_text(&self) -> String {
        self.date.format(STORED_DATE_FORMAT).to_string()
    }
}

/// `{position}_{local_name}`
#[must_use]
pub fn composite_label(position: Position, local_name: &str) -> String {
    format!("{position}_{local_name}")
}

/// Format used when writing dates.
pub const STORED_DATE_FORMAT: &str = "%Y-%m-%d";

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] =
    &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a stored date. Accepts plain dates with `-` or `/` separators and
/// datetimes, whose time part is dropped.
///
/// # Errors
/// Returns [`CoreError::InvalidDate`] when no known format matches.
pub fn parse_stored_date(raw: &str) -> Result<NaiveDate> {
    let text = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
        .ok_or_else(|| CoreError::InvalidDate(raw.to_owned()))
}

/// Parse a result value. Non-finite values are rejected.
///
/// # Errors
/// Returns [`CoreError::InvalidResult`] when the text is not a finite number.
pub fn parse_result(raw: &str) -> Result<f64> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(CoreError::InvalidResult(raw.to_owned())),
    }
}
