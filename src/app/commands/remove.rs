//! Remove: confirm, delete config and link, best-effort test and reload,
//! then forget the vhost.

use tracing::{info, warn};

use super::apply::{save_or_warn, test_and_reload_or_warn};
use super::{DryRunPlan, Outcome, WorkflowOptions, WorkflowResult};
use crate::app::AppContext;
use crate::domain::validation::validate_domain;
use crate::domain::{Action, AppError};
use crate::ports::{ConfigRenderer, Confirmation, Driver, RegistryStore};

pub fn execute<D, S, R, C>(
    ctx: &AppContext<D, S, R>,
    confirmation: &C,
    domain: &str,
    force: bool,
    options: &WorkflowOptions,
) -> Result<WorkflowResult, AppError>
where
    D: Driver,
    S: RegistryStore,
    R: ConfigRenderer,
    C: Confirmation + ?Sized,
{
    validate_domain(domain)?;
    let mut registry = ctx.store().load()?;
    let driver = ctx.driver();

    let tracked = registry.contains(domain);
    let has_config = driver.has_config(domain)?;
    let linked = driver.is_active(domain)?;
    if !tracked && !has_config && !linked {
        return Err(AppError::NotFound { domain: domain.to_string() });
    }

    if options.dry_run {
        let plan = DryRunPlan::new(Action::Remove, domain)
            .step_if(linked, format!("remove link {}", driver.activation_path(domain).display()))
            .step_if(has_config, format!("delete config {}", driver.config_path(domain).display()))
            .step_if(!options.skip_test, format!("test {} configuration", driver.kind()))
            .step_if(!options.no_reload, format!("reload {}", driver.kind()))
            .step_if(tracked, "remove vhost from registry");
        return Ok(WorkflowResult::DryRun(plan));
    }

    if !force && !confirmation.confirm(&format!("Remove vhost '{domain}'?"))? {
        info!(domain, "Removal cancelled");
        return Ok(WorkflowResult::Cancelled { action: Action::Remove, domain: domain.to_string() });
    }

    info!(domain, backend = %driver.kind(), "Removing vhost");
    let mut warnings = Vec::new();

    match driver.delete_config(domain) {
        Ok(()) => {}
        Err(AppError::NotFound { .. }) => {
            // Config already gone; a dangling link may still be left behind.
            if linked {
                driver.deactivate(domain).map_err(|e| e.in_workflow(Action::Remove, domain))?;
            }
            if tracked {
                warn!(domain, "Config file was already missing");
                warnings.push(format!(
                    "config file {} was already missing",
                    driver.config_path(domain).display()
                ));
            }
        }
        Err(e) => return Err(e.in_workflow(Action::Remove, domain)),
    }

    test_and_reload_or_warn(driver, options, &mut warnings);

    if registry.remove(domain).is_some() {
        save_or_warn(ctx.store(), &registry, &mut warnings);
    }

    Ok(WorkflowResult::Completed(Outcome::new(Action::Remove, domain, warnings)))
}
