//! Add: render, write, activate, test, reload, then register.

use std::path::PathBuf;

use tracing::info;

use super::apply::{reload_unless_skipped, save_or_warn};
use super::{DryRunPlan, Outcome, WorkflowOptions, WorkflowResult};
use crate::app::AppContext;
use crate::app::rollback::Rollback;
use crate::domain::validation::{
    normalize_proxy_url, validate_domain, validate_php_version, validate_root,
};
use crate::domain::{Action, AppError, VHost, VHostKind};
use crate::ports::{ConfigRenderer, Driver, RegistryStore};

/// A request to create and enable a new vhost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddRequest {
    pub domain: String,
    pub kind: VHostKind,
    pub root: Option<PathBuf>,
    pub proxy_pass: Option<String>,
    /// Falls back to the registry's `default_php` for PHP kinds.
    pub php_version: Option<String>,
}

impl AddRequest {
    /// Validate the request and build the vhost it describes.
    fn into_vhost(self, default_php: &str) -> Result<VHost, AppError> {
        validate_domain(&self.domain)?;
        if let Some(root) = &self.root {
            validate_root(root)?;
        }
        let proxy_pass = self.proxy_pass.as_deref().map(normalize_proxy_url).transpose()?;

        let php_version = if self.kind.requires_php() {
            let version = self.php_version.unwrap_or_else(|| default_php.to_string());
            validate_php_version(&version)?;
            Some(version)
        } else {
            None
        };

        VHost::new(self.domain, self.kind, self.root, proxy_pass, php_version)
    }
}

pub fn execute<D, S, R>(
    ctx: &AppContext<D, S, R>,
    request: AddRequest,
    options: &WorkflowOptions,
) -> Result<WorkflowResult, AppError>
where
    D: Driver,
    S: RegistryStore,
    R: ConfigRenderer,
{
    let mut registry = ctx.store().load()?;
    let vhost = request.into_vhost(&registry.default_php)?;
    let driver = ctx.driver();
    let domain = vhost.domain.clone();

    if registry.contains(&domain) || driver.has_config(&domain)? {
        return Err(AppError::AlreadyExists { domain });
    }
    if driver.is_active(&domain)? {
        return Err(AppError::AlreadyActive { domain });
    }

    let content = ctx.renderer().render(driver.kind(), &vhost)?;

    if options.dry_run {
        return Ok(WorkflowResult::DryRun(plan(driver, &vhost, options).preview(content)));
    }

    info!(domain = %domain, backend = %driver.kind(), kind = %vhost.kind, "Adding vhost");
    let mut rollback = Rollback::new();

    driver.write_config(&vhost, &content).map_err(|e| e.in_workflow(Action::Add, &domain))?;
    rollback.push("delete config", || driver.delete_config(&domain));

    if let Err(e) = driver.activate(&domain) {
        return Err(rollback.fail(e, Action::Add, &domain));
    }
    rollback.push("deactivate", || driver.deactivate(&domain));

    if !options.skip_test
        && let Err(e) = driver.validate()
    {
        return Err(rollback.fail(e, Action::Add, &domain));
    }
    drop(rollback);

    // Past validation the vhost stays on disk even if the reload fails.
    let reloaded = reload_unless_skipped(driver, options);

    let mut warnings = Vec::new();
    let mut vhost = vhost;
    vhost.enabled = true;
    registry.insert(vhost)?;
    save_or_warn(ctx.store(), &registry, &mut warnings);

    reloaded.map_err(|e| e.in_workflow(Action::Add, &domain))?;

    info!(domain = %domain, "VHost added");
    Ok(WorkflowResult::Completed(Outcome::new(Action::Add, domain, warnings)))
}

fn plan<D: Driver>(driver: &D, vhost: &VHost, options: &WorkflowOptions) -> DryRunPlan {
    let domain = vhost.domain.as_str();
    let config = driver.config_path(domain);
    let link = driver.activation_path(domain);

    let mut plan = DryRunPlan::new(Action::Add, domain)
        .step(format!("write config {}", config.display()));
    if let Some(root) = &vhost.root {
        plan = plan.step(format!("create document root {}", root.display()));
    }
    plan.step(format!("link {} -> {}", link.display(), config.display()))
        .step_if(!options.skip_test, format!("test {} configuration", driver.kind()))
        .step_if(!options.no_reload, format!("reload {}", driver.kind()))
        .step("record vhost in registry")
}
