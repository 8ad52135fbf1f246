use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::{AppError, Registry};
use crate::ports::RegistryStore;

/// Environment variable that points at an alternative config file.
pub const CONFIG_ENV: &str = "VHOST_CONFIG";

/// Registry persisted as `config.yaml`.
#[derive(Debug, Clone)]
pub struct YamlRegistryStore {
    path: PathBuf,
}

impl YamlRegistryStore {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `$VHOST_CONFIG`, or `$HOME/.config/vhost/config.yaml`.
    pub fn new_default() -> Result<Self, AppError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|value| !value.is_empty()) {
            return Ok(Self::with_path(path));
        }
        let home = std::env::var("HOME")
            .map_err(|_| AppError::config_error("HOME environment variable not set"))?;
        Ok(Self::with_path(PathBuf::from(home).join(".config").join("vhost").join("config.yaml")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RegistryStore for YamlRegistryStore {
    fn load(&self) -> Result<Registry, AppError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No config file, using defaults");
                return Ok(Registry::default());
            }
            Err(e) => return Err(AppError::filesystem("read config", &self.path, e)),
        };

        if content.trim().is_empty() {
            return Ok(Registry::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }

    fn save(&self, registry: &Registry) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::filesystem("create directory", parent, e))?;
        }
        let content = serde_yaml::to_string(registry)?;
        fs::write(&self.path, content)
            .map_err(|e| AppError::filesystem("write config", &self.path, e))?;
        debug!(path = %self.path.display(), vhosts = registry.vhosts.len(), "Saved config");
        Ok(())
    }
}
