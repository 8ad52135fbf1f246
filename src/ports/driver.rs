use std::path::PathBuf;

use crate::domain::{AppError, BackendKind, BackendPaths, VHost};

/// Port for a web-server backend's on-disk layout and control commands.
///
/// Implementations keep one config file per vhost under the "available"
/// directory and express activation as a symlink under "enabled".
pub trait Driver {
    /// Which backend this driver manages.
    fn kind(&self) -> BackendKind;

    /// Directories this driver operates on.
    fn paths(&self) -> &BackendPaths;

    /// Path of the config file for `domain` under "available".
    fn config_path(&self, domain: &str) -> PathBuf;

    /// Path of the activation link for `domain` under "enabled".
    fn activation_path(&self, domain: &str) -> PathBuf;

    /// Write `content` as the config file for `vhost`, overwriting any previous
    /// content, and create the document root if one is set.
    fn write_config(&self, vhost: &VHost, content: &str) -> Result<(), AppError>;

    /// Remove the config file, deactivating it first when active.
    fn delete_config(&self, domain: &str) -> Result<(), AppError>;

    /// Create the activation link.
    fn activate(&self, domain: &str) -> Result<(), AppError>;

    /// Remove the activation link, refusing to touch anything that is not a symlink.
    fn deactivate(&self, domain: &str) -> Result<(), AppError>;

    /// Domains with a config file under "available".
    fn list(&self) -> Result<Vec<String>, AppError>;

    /// Whether anything exists at the activation path.
    fn is_active(&self, domain: &str) -> Result<bool, AppError>;

    /// Whether a config file exists for `domain`.
    fn has_config(&self, domain: &str) -> Result<bool, AppError>;

    /// Run the backend's syntax check.
    fn validate(&self) -> Result<(), AppError>;

    /// Ask the running server to reload its configuration.
    fn reload(&self) -> Result<(), AppError>;
}

impl<D: Driver + ?Sized> Driver for Box<D> {
    fn kind(&self) -> BackendKind {
        (**self).kind()
    }

    fn paths(&self) -> &BackendPaths {
        (**self).paths()
    }

    fn config_path(&self, domain: &str) -> PathBuf {
        (**self).config_path(domain)
    }

    fn activation_path(&self, domain: &str) -> PathBuf {
        (**self).activation_path(domain)
    }

    fn write_config(&self, vhost: &VHost, content: &str) -> Result<(), AppError> {
        (**self).write_config(vhost, content)
    }

    fn delete_config(&self, domain: &str) -> Result<(), AppError> {
        (**self).delete_config(domain)
    }

    fn activate(&self, domain: &str) -> Result<(), AppError> {
        (**self).activate(domain)
    }

    fn deactivate(&self, domain: &str) -> Result<(), AppError> {
        (**self).deactivate(domain)
    }

    fn list(&self) -> Result<Vec<String>, AppError> {
        (**self).list()
    }

    fn is_active(&self, domain: &str) -> Result<bool, AppError> {
        (**self).is_active(domain)
    }

    fn has_config(&self, domain: &str) -> Result<bool, AppError> {
        (**self).has_config(domain)
    }

    fn validate(&self) -> Result<(), AppError> {
        (**self).validate()
    }

    fn reload(&self) -> Result<(), AppError> {
        (**self).reload()
    }
}
