//! Disable: deactivate, then best-effort test and reload.
//!
//! Once the link is gone the change is never reverted; later failures are
//! reported as warnings.

use tracing::{info, warn};

use super::apply::{save_or_warn, test_and_reload_or_warn};
use super::{DryRunPlan, Outcome, WorkflowOptions, WorkflowResult};
use crate::app::AppContext;
use crate::domain::validation::validate_domain;
use crate::domain::{Action, AppError};
use crate::ports::{ConfigRenderer, Driver, RegistryStore};

pub fn execute<D, S, R>(
    ctx: &AppContext<D, S, R>,
    domain: &str,
    options: &WorkflowOptions,
) -> Result<WorkflowResult, AppError>
where
    D: Driver,
    S: RegistryStore,
    R: ConfigRenderer,
{
    validate_domain(domain)?;
    let mut registry = ctx.store().load()?;
    let driver = ctx.driver();

    if options.dry_run {
        let plan = DryRunPlan::new(Action::Disable, domain)
            .step(format!("remove link {}", driver.activation_path(domain).display()))
            .step_if(!options.skip_test, format!("test {} configuration", driver.kind()))
            .step_if(!options.no_reload, format!("reload {}", driver.kind()))
            .step_if(registry.contains(domain), "mark vhost disabled in registry");
        return Ok(WorkflowResult::DryRun(plan));
    }

    info!(domain, backend = %driver.kind(), "Disabling vhost");
    driver.deactivate(domain).map_err(|e| e.in_workflow(Action::Disable, domain))?;

    let mut warnings = Vec::new();
    test_and_reload_or_warn(driver, options, &mut warnings);

    if registry.set_enabled(domain, false) {
        save_or_warn(ctx.store(), &registry, &mut warnings);
    } else {
        warn!(domain, "Disabled a vhost that is not tracked in the registry");
    }

    Ok(WorkflowResult::Completed(Outcome::new(Action::Disable, domain, warnings)))
}
