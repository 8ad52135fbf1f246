use std::fs;
use std::io;
use std::os::unix::fs as unix_fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::profile::{BackendProfile, command_line};
use crate::domain::{AppError, BackendKind, BackendPaths, VHost};
use crate::ports::{CommandExecutor, CommandOutput, Driver};

/// Driver for the sites-available / sites-enabled symlink layout.
///
/// nginx, apache and caddy differ only in their [`BackendProfile`].
#[derive(Debug)]
pub struct SiteDriver<E: CommandExecutor> {
    profile: &'static BackendProfile,
    paths: BackendPaths,
    executor: E,
}

impl<E: CommandExecutor> SiteDriver<E> {
    pub fn new(profile: &'static BackendProfile, paths: BackendPaths, executor: E) -> Self {
        Self { profile, paths, executor }
    }

    fn run(&self, command: &[&str]) -> Result<CommandOutput, AppError> {
        let (program, args) = command.split_first().ok_or_else(|| {
            AppError::config_error(format!("empty command configured for {}", self.profile.kind))
        })?;
        debug!(backend = %self.profile.kind, command = %command_line(command), "Running backend command");
        self.executor.execute(program, args)
    }
}

fn create_dir(path: &Path) -> Result<(), AppError> {
    fs::create_dir_all(path).map_err(|e| AppError::filesystem("create directory", path, e))
}

/// `lstat` existence: a dangling symlink still counts.
fn entry_exists(path: &Path) -> Result<bool, AppError> {
    match fs::symlink_metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(AppError::filesystem("inspect", path, e)),
    }
}

impl<E: CommandExecutor> Driver for SiteDriver<E> {
    fn kind(&self) -> BackendKind {
        self.profile.kind
    }

    fn paths(&self) -> &BackendPaths {
        &self.paths
    }

    fn config_path(&self, domain: &str) -> PathBuf {
        self.paths.available().join(self.profile.file_name(domain))
    }

    fn activation_path(&self, domain: &str) -> PathBuf {
        self.paths.enabled().join(self.profile.file_name(domain))
    }

    fn write_config(&self, vhost: &VHost, content: &str) -> Result<(), AppError> {
        create_dir(self.paths.available())?;
        create_dir(self.paths.enabled())?;

        let path = self.config_path(&vhost.domain);
        fs::write(&path, content).map_err(|e| AppError::filesystem("write config", &path, e))?;

        if let Some(root) = &vhost.root {
            create_dir(root)?;
        }

        debug!(
            backend = %self.profile.kind,
            domain = %vhost.domain,
            path = %path.display(),
            "Wrote vhost config"
        );
        Ok(())
    }

    fn delete_config(&self, domain: &str) -> Result<(), AppError> {
        let path = self.config_path(domain);
        if !entry_exists(&path)? {
            return Err(AppError::NotFound { domain: domain.to_string() });
        }

        if self.is_active(domain)? {
            self.deactivate(domain)?;
        }

        fs::remove_file(&path).map_err(|e| AppError::filesystem("remove config", &path, e))?;
        debug!(backend = %self.profile.kind, domain, path = %path.display(), "Removed vhost config");
        Ok(())
    }

    fn activate(&self, domain: &str) -> Result<(), AppError> {
        let source = self.config_path(domain);
        if !entry_exists(&source)? {
            return Err(AppError::NotFound { domain: domain.to_string() });
        }

        let link = self.activation_path(domain);
        if entry_exists(&link)? {
            return Err(AppError::AlreadyActive { domain: domain.to_string() });
        }

        create_dir(self.paths.enabled())?;
        unix_fs::symlink(&source, &link)
            .map_err(|e| AppError::filesystem("create symlink", &link, e))?;

        debug!(
            backend = %self.profile.kind,
            domain,
            available_path = %source.display(),
            enabled_path = %link.display(),
            "Activated vhost"
        );
        Ok(())
    }

    fn deactivate(&self, domain: &str) -> Result<(), AppError> {
        let link = self.activation_path(domain);
        let metadata = match fs::symlink_metadata(&link) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(AppError::NotActive { domain: domain.to_string() });
            }
            Err(e) => return Err(AppError::filesystem("inspect", &link, e)),
        };

        if !metadata.file_type().is_symlink() {
            warn!(domain, path = %link.display(), "Activation path is not a symlink, leaving it in place");
            return Err(AppError::Integrity { domain: domain.to_string(), path: link });
        }

        fs::remove_file(&link).map_err(|e| AppError::filesystem("remove symlink", &link, e))?;
        debug!(backend = %self.profile.kind, domain, path = %link.display(), "Deactivated vhost");
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, AppError> {
        let dir = self.paths.available();
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(AppError::filesystem("read directory", dir, e)),
        };

        let mut domains = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| AppError::filesystem("read directory", dir, e))?;
            let file_type =
                entry.file_type().map_err(|e| AppError::filesystem("inspect", entry.path(), e))?;
            if file_type.is_dir() {
                continue;
            }
            let name = entry.file_name();
            if let Some(name) = name.to_str()
                && let Some(domain) = self.profile.domain_of(name)
            {
                domains.push(domain.to_string());
            }
        }
        domains.sort();
        Ok(domains)
    }

    fn is_active(&self, domain: &str) -> Result<bool, AppError> {
        entry_exists(&self.activation_path(domain))
    }

    fn has_config(&self, domain: &str) -> Result<bool, AppError> {
        entry_exists(&self.config_path(domain))
    }

    fn validate(&self) -> Result<(), AppError> {
        let backend = self.profile.kind;
        let output = match self.run(self.profile.validate) {
            Ok(output) => output,
            Err(e) => return Err(AppError::ConfigTest { backend, output: e.to_string() }),
        };

        if !output.success {
            warn!(backend = %backend, "Configuration test failed");
            return Err(AppError::ConfigTest { backend, output: output.output.trim().to_string() });
        }
        debug!(backend = %backend, "Configuration test passed");
        Ok(())
    }

    fn reload(&self) -> Result<(), AppError> {
        let backend = self.profile.kind;
        let primary = match self.run(self.profile.reload) {
            Ok(output) if output.success => {
                info!(backend = %backend, "Reloaded web server");
                return Ok(());
            }
            Ok(output) => output.output.trim().to_string(),
            Err(e) => e.to_string(),
        };

        warn!(
            backend = %backend,
            fallback = %command_line(self.profile.fallback_reload),
            "Service manager reload failed, trying fallback"
        );
        let fallback = match self.run(self.profile.fallback_reload) {
            Ok(output) if output.success => {
                info!(backend = %backend, "Reloaded web server via fallback");
                return Ok(());
            }
            Ok(output) => output.output.trim().to_string(),
            Err(e) => e.to_string(),
        };

        Err(AppError::Reload { backend, primary, fallback })
    }
}
