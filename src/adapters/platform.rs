//! Default backend directories for the host platform.

use std::path::{Path, PathBuf};

use crate::domain::{AppError, BackendKind, BackendPaths};

const HOMEBREW_PREFIXES: [&str; 2] = ["/opt/homebrew", "/usr/local"];

/// Directory name of each backend under `/etc` or a Homebrew `etc/`.
///
/// Homebrew ships Apache as `httpd`; Debian calls it `apache2`.
fn server_dir(kind: BackendKind, os: &str) -> &'static str {
    match (kind, os) {
        (BackendKind::Nginx, _) => "nginx",
        (BackendKind::Apache, "macos") => "httpd",
        (BackendKind::Apache, _) => "apache2",
        (BackendKind::Caddy, _) => "caddy",
    }
}

/// Detect the available/enabled directories for `kind` on this host.
pub fn detect_paths(kind: BackendKind) -> Result<BackendPaths, AppError> {
    detect_paths_with(kind, std::env::consts::OS, |path| path.exists())
}

/// Detection with the OS name and existence check supplied by the caller.
pub fn detect_paths_with(
    kind: BackendKind,
    os: &str,
    exists: impl Fn(&Path) -> bool,
) -> Result<BackendPaths, AppError> {
    let etc = match os {
        "linux" => linux_etc(&exists)?,
        "macos" => homebrew_etc(&exists)?,
        other => {
            return Err(AppError::config_error(format!(
                "unsupported platform: {other}; set paths.available and paths.enabled in the config file"
            )));
        }
    };

    let base = etc.join(server_dir(kind, os));
    BackendPaths::new(base.join("sites-available"), base.join("sites-enabled"))
}

fn linux_etc(exists: &impl Fn(&Path) -> bool) -> Result<PathBuf, AppError> {
    let etc = PathBuf::from("/etc");
    if BackendKind::ALL.iter().any(|kind| exists(&etc.join(server_dir(*kind, "linux")))) {
        return Ok(etc);
    }
    Err(AppError::config_error(
        "web server configuration paths not found (checked /etc/nginx, /etc/apache2, /etc/caddy); \
         set paths.available and paths.enabled in the config file",
    ))
}

fn homebrew_etc(exists: &impl Fn(&Path) -> bool) -> Result<PathBuf, AppError> {
    HOMEBREW_PREFIXES
        .iter()
        .map(Path::new)
        .find(|prefix| exists(prefix))
        .map(|prefix| prefix.join("etc"))
        .ok_or_else(|| {
            AppError::config_error(
                "homebrew installation not found (checked /opt/homebrew and /usr/local)",
            )
        })
}
