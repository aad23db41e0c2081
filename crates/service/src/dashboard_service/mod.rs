//! Dashboard commands over the two stores.
//!
//! Reads go against an immutable [`Snapshot`]; writes are serialized by a
//! single writer lock and followed by a snapshot reload.

mod mutations;

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use physlog_core::{MergedView, Snapshot};
use physlog_storage::{MeasurementStore, RegistryStore, Storage};

use crate::chart::{ChartView, Selectors};
use crate::error::ServiceError;

pub use mutations::MeasurementInput;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceOptions {
    /// Reject registry rows whose name or identifier already exists.
    pub strict: bool,
}

pub struct DashboardService {
    registry: Arc<dyn RegistryStore>,
    measurements: Arc<dyn MeasurementStore>,
    snapshot: RwLock<Arc<Snapshot>>,
    write_lock: Mutex<()>,
    options: ServiceOptions,
}

impl std::fmt::Debug for DashboardService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardService").field("options", &self.options).finish_non_exhaustive()
    }
}

impl DashboardService {
    /// Build the service and take the first snapshot.
    pub fn new(
        registry: Arc<dyn RegistryStore>,
        measurements: Arc<dyn MeasurementStore>,
        options: ServiceOptions,
    ) -> Result<Self, ServiceError> {
        let initial = load_snapshot(registry.as_ref(), measurements.as_ref())?;
        tracing::info!(
            registry_rows = initial.registry.len(),
            measurement_rows = initial.measurements.len(),
            strict = options.strict,
            "Dashboard service initialized"
        );
        Ok(Self {
            registry,
            measurements,
            snapshot: RwLock::new(Arc::new(initial)),
            write_lock: Mutex::new(()),
            options,
        })
    }

    pub fn from_storage(storage: Storage, options: ServiceOptions) -> Result<Self, ServiceError> {
        Self::new(Arc::new(storage.registry), Arc::new(storage.measurements), options)
    }

    #[must_use]
    pub fn options(&self) -> ServiceOptions {
        self.options
    }

    /// Current snapshot. Cheap; callers keep the `Arc` as long as they like.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Re-read both tables and replace the current snapshot.
    ///
    /// Holds the writer lock for the read and the swap, so a snapshot read
    /// before a mutation can never replace the one installed after it.
    pub fn refresh(&self) -> Result<Arc<Snapshot>, ServiceError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.reload()
    }

    /// Read both tables and install the result. Callers hold `write_lock`.
    fn reload(&self) -> Result<Arc<Snapshot>, ServiceError> {
        let fresh = Arc::new(load_snapshot(self.registry.as_ref(), self.measurements.as_ref())?);
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&fresh);
        tracing::debug!(
            registry_rows = fresh.registry.len(),
            measurement_rows = fresh.measurements.len(),
            "snapshot refreshed"
        );
        Ok(fresh)
    }

    #[must_use]
    pub fn merged_view(&self) -> MergedView {
        self.snapshot().merged()
    }

    #[must_use]
    pub fn selectors(&self) -> Selectors {
        Selectors::from_snapshot(&self.snapshot())
    }

    #[must_use]
    pub fn chart(&self, subject: &str, test_item: &str) -> ChartView {
        ChartView::build(&self.snapshot(), subject, test_item)
    }

    /// Reload after a successful write, with `write_lock` still held. A
    /// failed reload leaves the old snapshot in place; the row is already
    /// written.
    fn reload_after_write(&self, operation: &str) {
        if let Err(e) = self.reload() {
            tracing::warn!(operation, error = %e, "snapshot reload after write failed");
        }
    }
}

fn load_snapshot(
    registry: &dyn RegistryStore,
    measurements: &dyn MeasurementStore,
) -> Result<Snapshot, ServiceError> {
    Ok(Snapshot::new(registry.list_all()?, measurements.list_all()?))
}
