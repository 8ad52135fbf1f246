//! Reconcile the registry's cached `enabled` flags with the driver.

use serde::Serialize;
use tracing::info;

use super::apply::save_or_warn;
use crate::app::AppContext;
use crate::domain::AppError;
use crate::ports::{ConfigRenderer, Driver, RegistryStore};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncChange {
    pub domain: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncOutcome {
    pub changes: Vec<SyncChange>,
    /// Configs on disk with no registry entry.
    pub untracked: Vec<String>,
    /// Registry entries whose config file is gone.
    pub missing: Vec<String>,
    pub warnings: Vec<String>,
}

/// Never touches the backend directories; only the registry is rewritten.
pub fn execute<D, S, R>(ctx: &AppContext<D, S, R>, dry_run: bool) -> Result<SyncOutcome, AppError>
where
    D: Driver,
    S: RegistryStore,
    R: ConfigRenderer,
{
    let mut registry = ctx.store().load()?;
    let driver = ctx.driver();
    let mut outcome = SyncOutcome::default();

    for (domain, vhost) in registry.vhosts.iter_mut() {
        let active = driver.is_active(domain)?;
        if vhost.enabled != active {
            info!(domain = %domain, enabled = active, "Repairing cached activation state");
            vhost.enabled = active;
            outcome.changes.push(SyncChange { domain: domain.clone(), enabled: active });
        }
        if !driver.has_config(domain)? {
            outcome.missing.push(domain.clone());
        }
    }

    outcome.untracked =
        driver.list()?.into_iter().filter(|domain| !registry.contains(domain)).collect();

    if !dry_run && !outcome.changes.is_empty() {
        save_or_warn(ctx.store(), &registry, &mut outcome.warnings);
    }
    Ok(outcome)
}
