//! List tracked and on-disk vhosts, with the driver deciding activation.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::app::AppContext;
use crate::domain::{AppError, VHostKind};
use crate::ports::{ConfigRenderer, Driver, RegistryStore};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    pub domain: String,
    /// `None` for configs found on disk that the registry does not track.
    #[serde(rename = "type")]
    pub kind: Option<VHostKind>,
    pub target: Option<String>,
    pub ssl: bool,
    /// Activation as reported by the driver.
    pub enabled: bool,
    pub tracked: bool,
    pub config_present: bool,
    /// The registry's cached `enabled` flag disagrees with the driver.
    pub drift: bool,
}

impl ListEntry {
    pub fn kind_label(&self) -> &'static str {
        self.kind.as_ref().map_or("unknown", VHostKind::name)
    }
}

pub fn execute<D, S, R>(ctx: &AppContext<D, S, R>) -> Result<Vec<ListEntry>, AppError>
where
    D: Driver,
    S: RegistryStore,
    R: ConfigRenderer,
{
    let registry = ctx.store().load()?;
    let driver = ctx.driver();
    let on_disk: BTreeSet<String> = driver.list()?.into_iter().collect();

    let domains: BTreeSet<&String> = registry.vhosts.keys().chain(on_disk.iter()).collect();

    let mut entries = Vec::with_capacity(domains.len());
    for domain in domains {
        let enabled = driver.is_active(domain)?;
        let config_present = on_disk.contains(domain);
        let entry = match registry.get(domain) {
            Some(vhost) => ListEntry {
                domain: domain.clone(),
                kind: Some(vhost.kind),
                target: Some(vhost.target_display()),
                ssl: vhost.ssl,
                enabled,
                tracked: true,
                config_present,
                drift: vhost.enabled != enabled,
            },
            None => ListEntry {
                domain: domain.clone(),
                kind: None,
                target: None,
                ssl: false,
                enabled,
                tracked: false,
                config_present,
                drift: false,
            },
        };
        entries.push(entry);
    }
    Ok(entries)
}
