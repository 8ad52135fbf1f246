use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::domain::{AppError, BackendKind, BackendPaths, VHost};
use crate::ports::Driver;

/// In-memory driver that keeps a trace of mutating calls.
///
/// Failures are injected per operation name (`write_config`, `delete_config`,
/// `activate`, `deactivate`, `validate`, `reload`).
pub struct RecordingDriver {
    kind: BackendKind,
    paths: BackendPaths,
    configs: Mutex<BTreeMap<String, String>>,
    active: Mutex<BTreeSet<String>>,
    blocked: Mutex<BTreeSet<String>>,
    failing: Mutex<BTreeSet<&'static str>>,
    calls: Mutex<Vec<String>>,
}

impl Default for RecordingDriver {
    fn default() -> Self {
        Self::new(BackendKind::Nginx)
    }
}

impl RecordingDriver {
    pub fn new(kind: BackendKind) -> Self {
        Self {
            kind,
            paths: BackendPaths::new("/srv/sites-available", "/srv/sites-enabled").unwrap(),
            configs: Mutex::new(BTreeMap::new()),
            active: Mutex::new(BTreeSet::new()),
            blocked: Mutex::new(BTreeSet::new()),
            failing: Mutex::new(BTreeSet::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_config(self, domain: &str, content: &str) -> Self {
        self.configs.lock().unwrap().insert(domain.to_string(), content.to_string());
        self
    }

    pub fn with_active(self, domain: &str) -> Self {
        self.active.lock().unwrap().insert(domain.to_string());
        self
    }

    /// Put a regular file where the activation link belongs.
    pub fn with_blocked_link(self, domain: &str) -> Self {
        self.blocked.lock().unwrap().insert(domain.to_string());
        self
    }

    pub fn fail_on(self, operation: &'static str) -> Self {
        self.failing.lock().unwrap().insert(operation);
        self
    }

    pub fn config(&self, domain: &str) -> Option<String> {
        self.configs.lock().unwrap().get(domain).cloned()
    }

    pub fn linked(&self, domain: &str) -> bool {
        self.active.lock().unwrap().contains(domain)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, operation: &'static str, domain: Option<&str>) -> Result<(), AppError> {
        let entry = match domain {
            Some(domain) => format!("{operation} {domain}"),
            None => operation.to_string(),
        };
        self.calls.lock().unwrap().push(entry);

        if !self.failing.lock().unwrap().contains(operation) {
            return Ok(());
        }
        Err(match operation {
            "validate" => AppError::ConfigTest {
                backend: self.kind,
                output: "injected syntax error".into(),
            },
            "reload" => AppError::Reload {
                backend: self.kind,
                primary: "injected reload failure".into(),
                fallback: "injected fallback failure".into(),
            },
            _ => AppError::filesystem(
                operation,
                self.config_path(domain.unwrap_or_default()),
                io::Error::new(io::ErrorKind::PermissionDenied, "injected failure"),
            ),
        })
    }
}

impl Driver for RecordingDriver {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    fn paths(&self) -> &BackendPaths {
        &self.paths
    }

    fn config_path(&self, domain: &str) -> PathBuf {
        self.paths.available().join(domain)
    }

    fn activation_path(&self, domain: &str) -> PathBuf {
        self.paths.enabled().join(domain)
    }

    fn write_config(&self, vhost: &VHost, content: &str) -> Result<(), AppError> {
        self.record("write_config", Some(&vhost.domain))?;
        self.configs.lock().unwrap().insert(vhost.domain.clone(), content.to_string());
        Ok(())
    }

    fn delete_config(&self, domain: &str) -> Result<(), AppError> {
        self.record("delete_config", Some(domain))?;
        if !self.configs.lock().unwrap().contains_key(domain) {
            return Err(AppError::NotFound { domain: domain.to_string() });
        }
        if self.blocked.lock().unwrap().contains(domain) {
            return Err(AppError::Integrity {
                domain: domain.to_string(),
                path: self.activation_path(domain),
            });
        }
        self.active.lock().unwrap().remove(domain);
        self.configs.lock().unwrap().remove(domain);
        Ok(())
    }

    fn activate(&self, domain: &str) -> Result<(), AppError> {
        self.record("activate", Some(domain))?;
        if !self.configs.lock().unwrap().contains_key(domain) {
            return Err(AppError::NotFound { domain: domain.to_string() });
        }
        if self.is_active(domain)? {
            return Err(AppError::AlreadyActive { domain: domain.to_string() });
        }
        self.active.lock().unwrap().insert(domain.to_string());
        Ok(())
    }

    fn deactivate(&self, domain: &str) -> Result<(), AppError> {
        self.record("deactivate", Some(domain))?;
        if self.blocked.lock().unwrap().contains(domain) {
            return Err(AppError::Integrity {
                domain: domain.to_string(),
                path: self.activation_path(domain),
            });
        }
        if !self.active.lock().unwrap().remove(domain) {
            return Err(AppError::NotActive { domain: domain.to_string() });
        }
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, AppError> {
        Ok(self.configs.lock().unwrap().keys().cloned().collect())
    }

    fn is_active(&self, domain: &str) -> Result<bool, AppError> {
        Ok(self.active.lock().unwrap().contains(domain)
            || self.blocked.lock().unwrap().contains(domain))
    }

    fn has_config(&self, domain: &str) -> Result<bool, AppError> {
        Ok(self.configs.lock().unwrap().contains_key(domain))
    }

    fn validate(&self) -> Result<(), AppError> {
        self.record("validate", None)
    }

    fn reload(&self) -> Result<(), AppError> {
        self.record("reload", None)
    }
}
