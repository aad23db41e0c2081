//! Core types and pure logic for physlog
//!
//! Registry and measurement records, the in-memory snapshot, the
//! join-filter engine and the trend estimator. Nothing in here touches
//! storage; callers hand in snapshots.

mod constants;
mod env_config;
mod error;
mod join;
mod measurement;
mod registry;
mod snapshot;
mod trend;

pub use constants::*;
pub use env_config::*;
pub use error::*;
pub use join::*;
pub use measurement::*;
pub use registry::*;
pub use snapshot::*;
pub use trend::*;
