//! Steps shared by the lifecycle workflows.

use tracing::warn;

use super::WorkflowOptions;
use crate::domain::{AppError, Registry};
use crate::ports::{Driver, RegistryStore};

/// Validate, then reload. Used once the change has been committed on disk.
pub(crate) fn test_and_reload<D: Driver>(driver: &D, options: &WorkflowOptions) -> Result<(), AppError> {
    if !options.skip_test {
        driver.validate()?;
    }
    reload_unless_skipped(driver, options)
}

pub(crate) fn reload_unless_skipped<D: Driver>(
    driver: &D,
    options: &WorkflowOptions,
) -> Result<(), AppError> {
    if options.no_reload {
        return Ok(());
    }
    driver.reload()
}

/// Best-effort [`test_and_reload`] for changes that are never reverted.
pub(crate) fn test_and_reload_or_warn<D: Driver>(
    driver: &D,
    options: &WorkflowOptions,
    warnings: &mut Vec<String>,
) {
    if let Err(e) = test_and_reload(driver, options) {
        warn!(backend = %driver.kind(), error = %e, "Post-change test or reload failed");
        warnings.push(e.to_string());
    }
}

/// Persist the registry; a failure leaves the on-disk change in place.
pub(crate) fn save_or_warn<S: RegistryStore>(
    store: &S,
    registry: &Registry,
    warnings: &mut Vec<String>,
) {
    if let Err(e) = store.save(registry) {
        warn!(error = %e, "Registry not updated");
        warnings.push(format!("registry not updated: {e}"));
    }
}
