//! Service layer for physlog
//!
//! Owns the current snapshot and runs every command the dashboard offers:
//! refresh, merged view, chart, and the four validated mutations.

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod chart;
mod dashboard_service;
mod error;

pub use chart::{ChartView, Selectors};
pub use dashboard_service::{DashboardService, MeasurementInput, ServiceOptions};
pub use error::ServiceError;
