use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{AppError, BackendKind, BackendPaths, VHost};

/// PHP version applied to PHP kinds when the request leaves it unset.
pub const DEFAULT_PHP_VERSION: &str = "8.2";

/// Explicit `paths:` override from the config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathsOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<PathBuf>,
}

impl PathsOverride {
    /// Resolve into backend paths; `None` when neither path is configured.
    pub fn resolve(&self) -> Result<Option<BackendPaths>, AppError> {
        match (&self.available, &self.enabled) {
            (Some(available), Some(enabled)) => {
                BackendPaths::new(available.clone(), enabled.clone()).map(Some)
            }
            (None, None) => Ok(None),
            _ => Err(AppError::config_error(
                "both paths.available and paths.enabled must be set if either is specified",
            )),
        }
    }
}

/// Tracked vhosts plus the settings stored alongside them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registry {
    #[serde(default)]
    pub driver: BackendKind,
    #[serde(default = "default_php")]
    pub default_php: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<PathsOverride>,
    #[serde(default)]
    pub vhosts: BTreeMap<String, VHost>,
}

fn default_php() -> String {
    DEFAULT_PHP_VERSION.to_string()
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            driver: BackendKind::default(),
            default_php: default_php(),
            paths: None,
            vhosts: BTreeMap::new(),
        }
    }
}

impl Registry {
    pub fn get(&self, domain: &str) -> Option<&VHost> {
        self.vhosts.get(domain)
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.vhosts.contains_key(domain)
    }

    /// Track a new vhost; the domain must not be tracked yet.
    pub fn insert(&mut self, vhost: VHost) -> Result<(), AppError> {
        if self.contains(&vhost.domain) {
            return Err(AppError::AlreadyExists { domain: vhost.domain });
        }
        self.vhosts.insert(vhost.domain.clone(), vhost);
        Ok(())
    }

    pub fn remove(&mut self, domain: &str) -> Option<VHost> {
        self.vhosts.remove(domain)
    }

    /// Update the cached activation flag; returns false when untracked.
    pub fn set_enabled(&mut self, domain: &str, enabled: bool) -> bool {
        match self.vhosts.get_mut(domain) {
            Some(vhost) => {
                vhost.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Backend paths from the explicit override, if configured.
    pub fn configured_paths(&self) -> Result<Option<BackendPaths>, AppError> {
        match &self.paths {
            Some(paths) => paths.resolve(),
            None => Ok(None),
        }
    }
}
