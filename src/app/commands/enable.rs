//! Enable: activate, test, reload, then mark the registry entry enabled.

use tracing::{info, warn};

use super::apply::{reload_unless_skipped, save_or_warn};
use super::{DryRunPlan, Outcome, WorkflowOptions, WorkflowResult};
use crate::app::AppContext;
use crate::app::rollback::Rollback;
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
        let plan = DryRunPlan::new(Action::Enable, domain)
            .step(format!(
                "link {} -> {}",
                driver.activation_path(domain).display(),
                driver.config_path(domain).display()
            ))
            .step_if(!options.skip_test, format!("test {} configuration", driver.kind()))
            .step_if(!options.no_reload, format!("reload {}", driver.kind()))
            .step_if(registry.contains(domain), "mark vhost enabled in registry");
        return Ok(WorkflowResult::DryRun(plan));
    }

    info!(domain, backend = %driver.kind(), "Enabling vhost");
    driver.activate(domain).map_err(|e| e.in_workflow(Action::Enable, domain))?;

    let mut rollback = Rollback::new();
    rollback.push("deactivate", || driver.deactivate(domain));

    if !options.skip_test
        && let Err(e) = driver.validate()
    {
        return Err(rollback.fail(e, Action::Enable, domain));
    }
    drop(rollback);

    let reloaded = reload_unless_skipped(driver, options);

    let mut warnings = Vec::new();
    if registry.set_enabled(domain, true) {
        save_or_warn(ctx.store(), &registry, &mut warnings);
    } else {
        warn!(domain, "Enabled a vhost that is not tracked in the registry");
        warnings.push(format!("'{domain}' is not tracked in the registry"));
    }

    reloaded.map_err(|e| e.in_workflow(Action::Enable, domain))?;
    Ok(WorkflowResult::Completed(Outcome::new(Action::Enable, domain, warnings)))
}
