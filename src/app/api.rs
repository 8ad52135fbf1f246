//! API facade: builds the context from the config file and runs a command.

use tracing::debug;

use crate::adapters::drivers::create_driver;
use crate::adapters::platform::detect_paths;
use crate::adapters::{
    CertbotIssuer, DialoguerConfirmation, EmbeddedTemplateRenderer, SystemCommandExecutor,
    YamlRegistryStore,
};
use crate::app::AppContext;
use crate::app::commands::{add, disable, doctor, enable, list, remove, show, ssl, sync};
use crate::ports::{Driver, RegistryStore};

pub use crate::app::commands::{
    AddRequest, CertificateEntry, CertificateStatus, Check, CheckStatus, DoctorReport, DryRunPlan,
    ListEntry, Outcome, RenewTarget, SyncChange, SyncOutcome, VHostDetails, VHostReport,
    WorkflowOptions, WorkflowResult,
};
pub use crate::domain::AppError;

type SystemContext = AppContext<Box<dyn Driver>, YamlRegistryStore, EmbeddedTemplateRenderer>;

/// Resolve driver and paths from the config file, falling back to platform
/// detection when no explicit paths are configured.
fn create_context() -> Result<SystemContext, AppError> {
    let store = YamlRegistryStore::new_default()?;
    let registry = store.load()?;

    let paths = match registry.configured_paths()? {
        Some(paths) => paths,
        None => detect_paths(registry.driver)?,
    };
    debug!(
        config = %store.path().display(),
        backend = %registry.driver,
        available = %paths.available().display(),
        enabled = %paths.enabled().display(),
        "Resolved backend"
    );

    let driver = create_driver(registry.driver, paths, SystemCommandExecutor);
    Ok(AppContext::new(driver, store, EmbeddedTemplateRenderer::new()?))
}

/// Create, activate and reload a new vhost.
pub fn add(request: AddRequest, options: &WorkflowOptions) -> Result<WorkflowResult, AppError> {
    add::execute(&create_context()?, request, options)
}

pub fn enable(domain: &str, options: &WorkflowOptions) -> Result<WorkflowResult, AppError> {
    enable::execute(&create_context()?, domain, options)
}

pub fn disable(domain: &str, options: &WorkflowOptions) -> Result<WorkflowResult, AppError> {
    disable::execute(&create_context()?, domain, options)
}

/// Remove a vhost, prompting on the terminal unless `force` is set.
pub fn remove(
    domain: &str,
    force: bool,
    options: &WorkflowOptions,
) -> Result<WorkflowResult, AppError> {
    remove::execute(&create_context()?, &DialoguerConfirmation, domain, force, options)
}

pub fn list() -> Result<Vec<ListEntry>, AppError> {
    list::execute(&create_context()?)
}

pub fn show(domain: &str) -> Result<VHostDetails, AppError> {
    show::execute(&create_context()?, domain)
}

/// Repair cached activation flags from the backend directories.
pub fn sync(dry_run: bool) -> Result<SyncOutcome, AppError> {
    sync::execute(&create_context()?, dry_run)
}

/// Health report over tools, backend directories and tracked vhosts.
pub fn doctor() -> Result<DoctorReport, AppError> {
    doctor::execute(&create_context()?, &SystemCommandExecutor, |path| path.exists())
}

pub fn ssl_install(domain: &str, email: &str, options: &WorkflowOptions) -> Result<Outcome, AppError> {
    ssl::install(&create_context()?, &CertbotIssuer::new(SystemCommandExecutor), domain, email, options)
}

pub fn ssl_renew(target: &RenewTarget, options: &WorkflowOptions) -> Result<Outcome, AppError> {
    ssl::renew(&create_context()?, &CertbotIssuer::new(SystemCommandExecutor), target, options)
}

pub fn ssl_status() -> Result<CertificateStatus, AppError> {
    ssl::status(&create_context()?, &CertbotIssuer::new(SystemCommandExecutor))
}
