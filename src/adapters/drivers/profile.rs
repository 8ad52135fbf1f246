use crate::domain::BackendKind;

/// Per-backend conventions layered over the shared site driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendProfile {
    pub kind: BackendKind,
    /// Appended to the domain to form the config filename.
    pub suffix: &'static str,
    /// Syntax check, program first.
    pub validate: &'static [&'static str],
    /// Service-manager reload, program first.
    pub reload: &'static [&'static str],
    /// Tried once when `reload` fails.
    pub fallback_reload: &'static [&'static str],
}

const NGINX: BackendProfile = BackendProfile {
    kind: BackendKind::Nginx,
    suffix: "",
    validate: &["nginx", "-t"],
    reload: &["systemctl", "reload", "nginx"],
    fallback_reload: &["nginx", "-s", "reload"],
};

const APACHE: BackendProfile = BackendProfile {
    kind: BackendKind::Apache,
    suffix: ".conf",
    validate: &["apache2ctl", "configtest"],
    reload: &["systemctl", "reload", "apache2"],
    fallback_reload: &["apache2ctl", "graceful"],
};

const CADDY: BackendProfile = BackendProfile {
    kind: BackendKind::Caddy,
    suffix: "",
    validate: &["caddy", "validate", "--config", "/etc/caddy/Caddyfile"],
    reload: &["systemctl", "reload", "caddy"],
    fallback_reload: &["caddy", "reload", "--config", "/etc/caddy/Caddyfile"],
};

impl BackendProfile {
    pub fn for_kind(kind: BackendKind) -> &'static BackendProfile {
        match kind {
            BackendKind::Nginx => &NGINX,
            BackendKind::Apache => &APACHE,
            BackendKind::Caddy => &CADDY,
        }
    }

    /// Config filename for `domain`.
    pub fn file_name(&self, domain: &str) -> String {
        format!("{domain}{}", self.suffix)
    }

    /// Domain for a config filename, `None` when the name does not belong to
    /// this backend.
    pub fn domain_of<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        if file_name.starts_with('.') {
            return None;
        }
        let domain = file_name.strip_suffix(self.suffix)?;
        (!domain.is_empty()).then_some(domain)
    }
}

/// Render a command line for logs and error messages.
pub fn command_line(command: &[&str]) -> String {
    command.join(" ")
}
