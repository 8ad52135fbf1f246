use std::path::PathBuf;

use serde::Serialize;

use crate::app::AppContext;
use crate::domain::validation::validate_domain;
use crate::domain::{AppError, BackendKind, VHost};
use crate::ports::{ConfigRenderer, Driver, RegistryStore};

/// Registry entry plus what the driver reports for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VHostDetails {
    pub vhost: VHost,
    pub backend: BackendKind,
    pub config_path: PathBuf,
    pub activation_path: PathBuf,
    pub config_present: bool,
    /// Driver view; the cached flag lives in `vhost.enabled`.
    pub active: bool,
}

impl VHostDetails {
    pub fn drift(&self) -> bool {
        self.vhost.enabled != self.active
    }
}

pub fn execute<D, S, R>(ctx: &AppContext<D, S, R>, domain: &str) -> Result<VHostDetails, AppError>
where
    D: Driver,
    S: RegistryStore,
    R: ConfigRenderer,
{
    validate_domain(domain)?;
    let registry = ctx.store().load()?;
    let vhost = registry
        .get(domain)
        .cloned()
        .ok_or_else(|| AppError::NotFound { domain: domain.to_string() })?;
    let driver = ctx.driver();

    Ok(VHostDetails {
        backend: driver.kind(),
        config_path: driver.config_path(domain),
        activation_path: driver.activation_path(domain),
        config_present: driver.has_config(domain)?,
        active: driver.is_active(domain)?,
        vhost,
    })
}
