//! Doctor: read-only health report over tools, backend directories and
//! every tracked vhost.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::app::AppContext;
use crate::domain::{AppError, BackendKind, Registry, VHost};
use crate::ports::{CommandExecutor, ConfigRenderer, Driver, RegistryStore};

const CERTBOT: &str = "certbot";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Check {
    pub status: CheckStatus,
    pub message: String,
}

impl Check {
    fn ok(message: impl Into<String>) -> Self {
        Self { status: CheckStatus::Ok, message: message.into() }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self { status: CheckStatus::Warning, message: message.into() }
    }

    fn error(message: impl Into<String>) -> Self {
        Self { status: CheckStatus::Error, message: message.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VHostReport {
    pub domain: String,
    /// Activation state read from the backend, not the registry.
    pub active: bool,
    pub checks: Vec<Check>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoctorReport {
    pub backend: BackendKind,
    pub available: PathBuf,
    pub enabled: PathBuf,
    pub system: Vec<Check>,
    pub configuration: Vec<Check>,
    pub vhosts: Vec<VHostReport>,
}

impl DoctorReport {
    /// Worst status across every check.
    pub fn status(&self) -> CheckStatus {
        self.system
            .iter()
            .chain(&self.configuration)
            .chain(self.vhosts.iter().flat_map(|vhost| &vhost.checks))
            .map(|check| check.status)
            .max()
            .unwrap_or(CheckStatus::Ok)
    }
}

/// Program whose presence shows the backend is installed.
fn server_program(kind: BackendKind) -> &'static str {
    match kind {
        BackendKind::Nginx => "nginx",
        BackendKind::Apache => "apache2ctl",
        BackendKind::Caddy => "caddy",
    }
}

/// Build the report. `exists` answers filesystem checks on document roots,
/// certificates, PHP-FPM sockets and the backend directories.
pub fn execute<D, S, R, E>(
    ctx: &AppContext<D, S, R>,
    executor: &E,
    exists: impl Fn(&Path) -> bool,
) -> Result<DoctorReport, AppError>
where
    D: Driver,
    S: RegistryStore,
    R: ConfigRenderer,
    E: CommandExecutor + ?Sized,
{
    let registry = ctx.store().load()?;
    let driver = ctx.driver();
    let paths = driver.paths();

    let system = system_checks(driver.kind(), &registry, executor, &exists);
    let configuration = configuration_checks(driver, &registry, &exists)?;
    let vhosts = registry
        .vhosts
        .values()
        .map(|vhost| vhost_report(driver, vhost, &exists))
        .collect::<Result<Vec<_>, _>>()?;

    let report = DoctorReport {
        backend: driver.kind(),
        available: paths.available().to_path_buf(),
        enabled: paths.enabled().to_path_buf(),
        system,
        configuration,
        vhosts,
    };
    debug!(status = ?report.status(), vhosts = report.vhosts.len(), "Doctor finished");
    Ok(report)
}

fn system_checks<E: CommandExecutor + ?Sized>(
    backend: BackendKind,
    registry: &Registry,
    executor: &E,
    exists: &impl Fn(&Path) -> bool,
) -> Vec<Check> {
    let mut checks = Vec::new();

    let program = server_program(backend);
    checks.push(if executor.is_available(program) {
        Check::ok(format!("{backend} installed ({program})"))
    } else {
        Check::error(format!("{backend} not installed ({program} not on PATH)"))
    });

    let needs_tls = registry.vhosts.values().any(|vhost| vhost.ssl);
    checks.push(match (executor.is_available(CERTBOT), needs_tls) {
        (true, _) => Check::ok("certbot installed"),
        (false, true) => Check::error("certbot not installed but TLS vhosts exist"),
        (false, false) => Check::warning("certbot not installed (optional)"),
    });

    let php_versions: BTreeSet<&str> = registry
        .vhosts
        .values()
        .filter(|vhost| vhost.kind.requires_php())
        .filter_map(|vhost| vhost.php_version.as_deref())
        .collect();
    for version in php_versions {
        let socket = PathBuf::from(format!("/run/php/php{version}-fpm.sock"));
        checks.push(if exists(&socket) {
            Check::ok(format!("PHP-FPM {version} socket present"))
        } else {
            Check::error(format!("PHP-FPM {version} socket missing ({})", socket.display()))
        });
    }

    checks
}

fn configuration_checks<D: Driver>(
    driver: &D,
    registry: &Registry,
    exists: &impl Fn(&Path) -> bool,
) -> Result<Vec<Check>, AppError> {
    let mut checks = Vec::new();

    let paths = driver.paths();
    for dir in [paths.available(), paths.enabled()] {
        checks.push(if exists(dir) {
            Check::ok(format!("{} exists", dir.display()))
        } else {
            Check::warning(format!("{} does not exist yet", dir.display()))
        });
    }

    checks.push(match driver.validate() {
        Ok(()) => Check::ok(format!("{} configuration test passed", driver.kind())),
        Err(e) => Check::error(e.to_string()),
    });

    for domain in driver.list()? {
        if !registry.contains(&domain) {
            checks.push(Check::warning(format!("'{domain}' exists on disk but is not tracked")));
        }
    }

    Ok(checks)
}

fn vhost_report<D: Driver>(
    driver: &D,
    vhost: &VHost,
    exists: &impl Fn(&Path) -> bool,
) -> Result<VHostReport, AppError> {
    let domain = vhost.domain.as_str();
    let active = driver.is_active(domain)?;
    let mut checks = Vec::new();

    if !driver.has_config(domain)? {
        checks.push(Check::error(format!(
            "config file missing ({})",
            driver.config_path(domain).display()
        )));
    }
    if active != vhost.enabled {
        checks.push(Check::warning(format!(
            "enabled mismatch (registry: {}, actual: {active}); run `vhost sync`",
            vhost.enabled
        )));
    }
    if let Some(root) = &vhost.root
        && !exists(root)
    {
        checks.push(Check::warning(format!("document root missing ({})", root.display())));
    }
    if vhost.ssl {
        for (label, path) in [("certificate", &vhost.ssl_cert), ("key", &vhost.ssl_key)] {
            match path {
                Some(path) if exists(path) => {}
                Some(path) => {
                    checks.push(Check::error(format!("TLS {label} missing ({})", path.display())))
                }
                None => checks.push(Check::error(format!("TLS {label} not recorded"))),
            }
        }
    }

    if checks.is_empty() {
        let state = if active { "enabled" } else { "disabled" };
        checks.push(Check::ok(format!("{state}, config present")));
    }

    Ok(VHostReport { domain: domain.to_string(), active, checks })
}
