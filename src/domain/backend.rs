use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::AppError;

/// Supported web-server configuration conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Nginx,
    Apache,
    Caddy,
}

impl BackendKind {
    /// All backends in display order.
    pub const ALL: [BackendKind; 3] = [BackendKind::Nginx, BackendKind::Apache, BackendKind::Caddy];

    /// Short lowercase name, also used as the template directory.
    pub fn name(&self) -> &'static str {
        match self {
            BackendKind::Nginx => "nginx",
            BackendKind::Apache => "apache",
            BackendKind::Caddy => "caddy",
        }
    }

    /// Parse a backend from its name.
    pub fn from_name(name: &str) -> Option<BackendKind> {
        match name.to_lowercase().as_str() {
            "nginx" => Some(BackendKind::Nginx),
            "apache" | "apache2" | "httpd" => Some(BackendKind::Apache),
            "caddy" => Some(BackendKind::Caddy),
            _ => None,
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BackendKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BackendKind::from_name(s).ok_or_else(|| {
            AppError::config_error(format!(
                "Unknown driver: {s} (available: nginx, apache, caddy)"
            ))
        })
    }
}

/// The directory pair a backend reads its site configurations from.
///
/// `available` holds every defined configuration; `enabled` holds one symlink
/// per configuration currently in effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendPaths {
    available: PathBuf,
    enabled: PathBuf,
}

impl BackendPaths {
    pub fn new(available: impl Into<PathBuf>, enabled: impl Into<PathBuf>) -> Result<Self, AppError> {
        let available = available.into();
        let enabled = enabled.into();

        for (label, path) in [("available", &available), ("enabled", &enabled)] {
            if !path.is_absolute() {
                return Err(AppError::config_error(format!(
                    "paths.{label} must be an absolute path: {}",
                    path.display()
                )));
            }
        }
        if available == enabled {
            return Err(AppError::config_error(format!(
                "paths.available and paths.enabled must differ (both are {})",
                available.display()
            )));
        }

        Ok(Self { available, enabled })
    }

    pub fn available(&self) -> &Path {
        &self.available
    }

    pub fn enabled(&self) -> &Path {
        &self.enabled
    }
}
