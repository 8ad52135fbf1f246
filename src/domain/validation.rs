//! Input validation applied before any lifecycle workflow touches disk.

use std::path::{Component, Path};

use url::Url;

use super::AppError;

/// Maximum length of a domain name (RFC 1035).
const MAX_DOMAIN_LENGTH: usize = 253;

/// Maximum length of a single label between dots.
const MAX_LABEL_LENGTH: usize = 63;

const SHELL_META_CHARS: [char; 9] = [';', '|', '&', '$', '`', '<', '>', '\n', '\r'];

/// Validates a vhost domain.
///
/// The domain doubles as a filename under the backend directories, so besides
/// the RFC 1035 shape this rejects anything that could escape those
/// directories or reach a shell.
pub fn validate_domain(domain: &str) -> Result<(), AppError> {
    if domain.is_empty() {
        return Err(AppError::validation("domain cannot be empty"));
    }
    if domain.trim() != domain || domain.contains(char::is_whitespace) {
        return Err(AppError::validation("domain cannot contain whitespace"));
    }
    if domain.len() > MAX_DOMAIN_LENGTH {
        return Err(AppError::validation(format!(
            "domain exceeds maximum length of {MAX_DOMAIN_LENGTH} characters"
        )));
    }
    if domain.contains('\0') {
        return Err(AppError::validation("domain contains null byte"));
    }
    if domain.contains(SHELL_META_CHARS) {
        return Err(AppError::validation("domain contains invalid shell metacharacters"));
    }
    if domain.contains('/') || domain.contains('\\') {
        return Err(AppError::validation("domain contains invalid path separators"));
    }

    for label in domain.split('.') {
        validate_label(label)?;
    }

    Ok(())
}

fn validate_label(label: &str) -> Result<(), AppError> {
    if label.is_empty() {
        return Err(AppError::validation("domain contains an empty label"));
    }
    if label.len() > MAX_LABEL_LENGTH {
        return Err(AppError::validation(format!(
            "domain label '{label}' exceeds maximum length of {MAX_LABEL_LENGTH} characters"
        )));
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err(AppError::validation("domain cannot start or end with hyphen"));
    }
    if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(AppError::validation(
            "invalid domain format: must contain only letters, numbers, hyphens, and dots",
        ));
    }
    Ok(())
}

/// Validates a document root: absolute and already in canonical form.
pub fn validate_root(root: &Path) -> Result<(), AppError> {
    let display = root.display();
    if !root.is_absolute() {
        return Err(AppError::validation(format!("root path must be absolute: {display}")));
    }
    if root.to_string_lossy().contains('\0') {
        return Err(AppError::validation("root path contains null byte"));
    }
    let canonical = root
        .components()
        .all(|component| matches!(component, Component::RootDir | Component::Normal(_)));
    if !canonical {
        return Err(AppError::validation(format!(
            "root path contains invalid traversal sequences: {display}"
        )));
    }
    Ok(())
}

/// Validates a proxy target and returns it normalized with a scheme.
///
/// `host:port` without a scheme is accepted and treated as `http://`. One
/// trailing slash is dropped.
pub fn normalize_proxy_url(proxy: &str) -> Result<String, AppError> {
    let candidate =
        if proxy.contains("://") { proxy.to_string() } else { format!("http://{proxy}") };

    let url = Url::parse(&candidate)
        .map_err(|e| AppError::validation(format!("invalid proxy URL '{proxy}': {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::validation(format!(
            "invalid proxy URL '{proxy}': scheme must be http or https"
        )));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(AppError::validation(format!("invalid proxy URL '{proxy}': missing host")));
    }

    // Templates append their own path separator.
    match candidate.strip_suffix('/') {
        Some(stripped) => Ok(stripped.to_string()),
        None => Ok(candidate),
    }
}

/// Validates a `<major>.<minor>` PHP version such as `8.2`.
pub fn validate_php_version(version: &str) -> Result<(), AppError> {
    let mut parts = version.split('.');
    let well_formed = matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(major), Some(minor), None) if is_number(major) && is_number(minor)
    );
    if !well_formed {
        return Err(AppError::validation(format!(
            "invalid PHP version '{version}': expected <major>.<minor>, e.g. 8.2"
        )));
    }
    Ok(())
}

fn is_number(part: &str) -> bool {
    !part.is_empty() && part.len() <= 2 && part.chars().all(|c| c.is_ascii_digit())
}

/// Validates the contact address passed to the ACME client.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    let invalid = || AppError::validation(format!("invalid email address: {email}"));
    let (local, host) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || local.contains(SHELL_META_CHARS) || local.contains(char::is_whitespace)
    {
        return Err(invalid());
    }
    validate_domain(host).map_err(|_| invalid())?;
    if !host.contains('.') {
        return Err(invalid());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_common_domains() {
        for domain in ["example.com", "api.example.com", "my-site.co.uk", "localhost", "a1.b2"] {
            assert!(validate_domain(domain).is_ok(), "{domain} should be valid");
        }
    }

    #[test]
    fn rejects_unsafe_domains() {
        for domain in [
            "",
            " example.com",
            "exa mple.com",
            "../etc/passwd",
            "example.com;rm -rf /",
            "-example.com",
            "example-.com",
            "example..com",
            "exam_ple.com",
            "a\0b.com",
            "sub/example.com",
        ] {
            assert!(validate_domain(domain).is_err(), "{domain:?} should be rejected");
        }
    }

    #[test]
    fn rejects_overlong_labels() {
        let label = "a".repeat(64);
        assert!(validate_domain(&format!("{label}.com")).is_err());
        assert!(validate_domain(&format!("{}.com", "a".repeat(63))).is_ok());
    }

    #[test]
    fn root_must_be_absolute_and_canonical() {
        assert!(validate_root(Path::new("/srv/www/example")).is_ok());
        assert!(validate_root(Path::new("srv/www")).is_err());
        assert!(validate_root(Path::new("/srv/../etc")).is_err());
        assert!(validate_root(Path::new("/srv/./www")).is_err());
    }

    #[test]
    fn proxy_without_scheme_defaults_to_http() {
        assert_eq!(normalize_proxy_url("127.0.0.1:3000").unwrap(), "http://127.0.0.1:3000");
        assert_eq!(
            normalize_proxy_url("https://backend.internal").unwrap(),
            "https://backend.internal"
        );
        assert!(normalize_proxy_url("ftp://files.example.com").is_err());
        assert!(normalize_proxy_url("http://").is_err());
    }

    #[test]
    fn proxy_trailing_slash_is_dropped() {
        assert_eq!(normalize_proxy_url("http://127.0.0.1:3000/").unwrap(), "http://127.0.0.1:3000");
        assert_eq!(normalize_proxy_url("backend.internal/").unwrap(), "http://backend.internal");
        assert_eq!(
            normalize_proxy_url("http://backend.internal/api/").unwrap(),
            "http://backend.internal/api"
        );
    }

    #[test]
    fn php_versions() {
        assert!(validate_php_version("8.2").is_ok());
        assert!(validate_php_version("7.4").is_ok());
        assert!(validate_php_version("8").is_err());
        assert!(validate_php_version("8.2.1").is_err());
        assert!(validate_php_version("8.x").is_err());
    }

    #[test]
    fn emails() {
        assert!(validate_email("admin@example.com").is_ok());
        assert!(validate_email("admin").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("admin@localhost").is_err());
        assert!(validate_email("a;b@example.com").is_err());
    }

    proptest! {
        #[test]
        fn generated_hostnames_are_accepted(
            labels in prop::collection::vec("[a-z0-9]([a-z0-9-]{0,20}[a-z0-9])?", 1..5)
        ) {
            let domain = labels.join(".");
            prop_assert!(validate_domain(&domain).is_ok());
        }

        #[test]
        fn domains_with_separators_are_rejected(prefix in "[a-z]{1,10}", suffix in "[a-z]{1,10}") {
            let traversal = format!("{prefix}/../{suffix}");
            let backslash = format!("{prefix}\\{suffix}");
            prop_assert!(validate_domain(&traversal).is_err());
            prop_assert!(validate_domain(&backslash).is_err());
        }
    }
}
