use std::path::{Path, PathBuf};

use crate::domain::AppError;

/// Certificate and key issued for a domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCertificate {
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

/// Port for the external ACME client.
pub trait CertificateIssuer {
    /// Obtain a certificate for `domain`.
    ///
    /// With a `webroot` the challenge is answered from the vhost's document
    /// root; without one the issuer answers it on its own.
    fn issue(
        &self,
        domain: &str,
        email: &str,
        webroot: Option<&Path>,
    ) -> Result<IssuedCertificate, AppError>;

    fn renew(&self, domain: &str) -> Result<(), AppError>;

    fn renew_all(&self) -> Result<(), AppError>;

    /// Names of the certificates the issuer manages.
    fn list(&self) -> Result<Vec<String>, AppError>;
}
