//! TLS provisioning: obtain certificates, then re-apply the vhost with TLS
//! fields through the same write, activate and test sequence as add.

use serde::Serialize;
use tracing::info;

use super::apply::{reload_unless_skipped, save_or_warn, test_and_reload_or_warn};
use super::{Outcome, WorkflowOptions};
use crate::app::AppContext;
use crate::app::rollback::Rollback;
use crate::domain::validation::{validate_domain, validate_email};
use crate::domain::{Action, AppError};
use crate::ports::{CertificateIssuer, ConfigRenderer, Driver, RegistryStore};

/// Which certificates to renew.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenewTarget {
    Domain(String),
    All,
}

pub fn install<D, S, R, I>(
    ctx: &AppContext<D, S, R>,
    issuer: &I,
    domain: &str,
    email: &str,
    options: &WorkflowOptions,
) -> Result<Outcome, AppError>
where
    D: Driver,
    S: RegistryStore,
    R: ConfigRenderer,
    I: CertificateIssuer + ?Sized,
{
    validate_domain(domain)?;
    validate_email(email)?;
    let mut registry = ctx.store().load()?;
    let previous = registry
        .get(domain)
        .cloned()
        .ok_or_else(|| AppError::NotFound { domain: domain.to_string() })?;
    let driver = ctx.driver();
    let renderer = ctx.renderer();

    info!(domain, "Requesting certificate");
    let certificate = issuer
        .issue(domain, email, previous.root.as_deref())
        .map_err(|e| e.in_workflow(Action::InstallTls, domain))?;

    let mut updated = previous.clone().with_tls(certificate.cert_path, certificate.key_path);
    updated.enabled = true;
    let content = renderer.render(driver.kind(), &updated)?;
    let previous_content = renderer.render(driver.kind(), &previous)?;

    let mut rollback = Rollback::new();

    if driver.is_active(domain)? {
        driver.deactivate(domain).map_err(|e| e.in_workflow(Action::InstallTls, domain))?;
        rollback.push("reactivate previous config", || driver.activate(domain));
    }

    let had_config = driver.has_config(domain)?;
    if had_config {
        if let Err(e) = driver.delete_config(domain) {
            return Err(rollback.fail(e, Action::InstallTls, domain));
        }
        rollback.push("restore previous config", || {
            driver.write_config(&previous, &previous_content)
        });
    }

    if let Err(e) = driver.write_config(&updated, &content) {
        return Err(rollback.fail(e, Action::InstallTls, domain));
    }
    if !had_config {
        rollback.push("delete config", || driver.delete_config(domain));
    }
    if let Err(e) = driver.activate(domain) {
        return Err(rollback.fail(e, Action::InstallTls, domain));
    }
    rollback.push("deactivate", || driver.deactivate(domain));

    if !options.skip_test
        && let Err(e) = driver.validate()
    {
        return Err(rollback.fail(e, Action::InstallTls, domain));
    }
    drop(rollback);

    let reloaded = reload_unless_skipped(driver, options);

    let mut warnings = Vec::new();
    registry.vhosts.insert(domain.to_string(), updated);
    save_or_warn(ctx.store(), &registry, &mut warnings);

    reloaded.map_err(|e| e.in_workflow(Action::InstallTls, domain))?;
    info!(domain, "TLS installed");
    Ok(Outcome::new(Action::InstallTls, domain, warnings))
}

/// Renew certificates, then reload so the server picks them up.
pub fn renew<D, S, R, I>(
    ctx: &AppContext<D, S, R>,
    issuer: &I,
    target: &RenewTarget,
    options: &WorkflowOptions,
) -> Result<Outcome, AppError>
where
    D: Driver,
    S: RegistryStore,
    R: ConfigRenderer,
    I: CertificateIssuer + ?Sized,
{
    let label = match target {
        RenewTarget::Domain(domain) => {
            validate_domain(domain)?;
            issuer.renew(domain).map_err(|e| e.in_workflow(Action::RenewTls, domain))?;
            domain.as_str()
        }
        RenewTarget::All => {
            issuer.renew_all()?;
            "all certificates"
        }
    };

    let mut warnings = Vec::new();
    test_and_reload_or_warn(ctx.driver(), options, &mut warnings);
    Ok(Outcome::new(Action::RenewTls, label, warnings))
}

/// A certificate known to the issuer, matched against the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateEntry {
    pub name: String,
    pub tracked: bool,
    /// The tracked vhost serves TLS with this certificate.
    pub in_use: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CertificateStatus {
    pub certificates: Vec<CertificateEntry>,
    /// TLS-enabled vhosts for which the issuer holds no certificate.
    pub missing: Vec<String>,
}

/// List managed certificates and cross-check them with TLS-enabled vhosts.
pub fn status<D, S, R, I>(ctx: &AppContext<D, S, R>, issuer: &I) -> Result<CertificateStatus, AppError>
where
    D: Driver,
    S: RegistryStore,
    R: ConfigRenderer,
    I: CertificateIssuer + ?Sized,
{
    let registry = ctx.store().load()?;
    let mut names = issuer.list()?;
    names.sort();
    names.dedup();

    let certificates = names
        .iter()
        .map(|name| {
            let vhost = registry.get(name);
            CertificateEntry {
                name: name.clone(),
                tracked: vhost.is_some(),
                in_use: vhost.is_some_and(|vhost| vhost.ssl),
            }
        })
        .collect();
    let missing = registry
        .vhosts
        .values()
        .filter(|vhost| vhost.ssl && !names.contains(&vhost.domain))
        .map(|vhost| vhost.domain.clone())
        .collect();

    Ok(CertificateStatus { certificates, missing })
}
