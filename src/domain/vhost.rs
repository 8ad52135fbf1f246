use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AppError;

/// The site flavours a vhost can be rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VHostKind {
    Static,
    Php,
    Proxy,
    Laravel,
    WordPress,
}

impl VHostKind {
    pub const ALL: [VHostKind; 5] = [
        VHostKind::Static,
        VHostKind::Php,
        VHostKind::Proxy,
        VHostKind::Laravel,
        VHostKind::WordPress,
    ];

    /// Lowercase name, also used as the template file stem.
    pub fn name(&self) -> &'static str {
        match self {
            VHostKind::Static => "static",
            VHostKind::Php => "php",
            VHostKind::Proxy => "proxy",
            VHostKind::Laravel => "laravel",
            VHostKind::WordPress => "wordpress",
        }
    }

    pub fn from_name(name: &str) -> Option<VHostKind> {
        VHostKind::ALL.into_iter().find(|kind| kind.name() == name.to_lowercase())
    }

    /// Kinds served through PHP-FPM need a PHP version.
    pub fn requires_php(&self) -> bool {
        matches!(self, VHostKind::Php | VHostKind::Laravel | VHostKind::WordPress)
    }

    /// Every kind except reverse proxies serves files from a document root.
    pub fn requires_root(&self) -> bool {
        !matches!(self, VHostKind::Proxy)
    }
}

impl fmt::Display for VHostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VHostKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VHostKind::from_name(s).ok_or_else(|| {
            let valid: Vec<&str> = VHostKind::ALL.iter().map(VHostKind::name).collect();
            AppError::validation(format!("invalid type: {s}. Valid types: {}", valid.join(", ")))
        })
    }
}

/// A tracked virtual host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VHost {
    pub domain: String,
    #[serde(rename = "type")]
    pub kind: VHostKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_pass: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub php_version: Option<String>,
    #[serde(default)]
    pub ssl: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_cert: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_key: Option<PathBuf>,
    #[serde(default)]
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
}

impl VHost {
    /// Build a vhost, enforcing the root/proxy exclusivity of its kind.
    pub fn new(
        domain: impl Into<String>,
        kind: VHostKind,
        root: Option<PathBuf>,
        proxy_pass: Option<String>,
        php_version: Option<String>,
    ) -> Result<Self, AppError> {
        let vhost = Self {
            domain: domain.into(),
            kind,
            root,
            proxy_pass,
            php_version,
            ssl: false,
            ssl_cert: None,
            ssl_key: None,
            enabled: false,
            created_at: Utc::now(),
        };
        vhost.check_target()?;
        Ok(vhost)
    }

    /// Verify that exactly the target field required by the kind is set.
    pub fn check_target(&self) -> Result<(), AppError> {
        match (self.kind.requires_root(), &self.root, &self.proxy_pass) {
            (true, None, _) => Err(AppError::validation(format!("--root is required for type {}", self.kind))),
            (true, Some(_), Some(_)) => Err(AppError::validation(format!(
                "--proxy cannot be combined with type {}",
                self.kind
            ))),
            (false, _, None) => Err(AppError::validation("--proxy is required for type proxy")),
            (false, Some(_), Some(_)) => {
                Err(AppError::validation("--root cannot be combined with type proxy"))
            }
            _ => Ok(()),
        }
    }

    /// Populate the TLS fields once certificates exist.
    pub fn with_tls(mut self, cert: PathBuf, key: PathBuf) -> Self {
        self.ssl = true;
        self.ssl_cert = Some(cert);
        self.ssl_key = Some(key);
        self
    }

    /// Document root or proxy target, whichever the kind uses.
    pub fn target_display(&self) -> String {
        match (&self.root, &self.proxy_pass) {
            (_, Some(proxy)) => proxy.clone(),
            (Some(root), None) => root.display().to_string(),
            (None, None) => String::new(),
        }
    }
}
