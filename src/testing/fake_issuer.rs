use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::domain::AppError;
use crate::ports::{CertificateIssuer, IssuedCertificate};

#[derive(Default)]
pub struct FakeIssuer {
    fail: bool,
    certificates: Vec<String>,
    pub issued: Mutex<Vec<(String, Option<PathBuf>)>>,
    pub renewed: Mutex<Vec<String>>,
}

impl FakeIssuer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub fn with_certificates(names: &[&str]) -> Self {
        Self { certificates: names.iter().map(|name| name.to_string()).collect(), ..Self::default() }
    }

    fn check(&self) -> Result<(), AppError> {
        if self.fail {
            return Err(AppError::Certificate("certbot failed: challenge rejected".into()));
        }
        Ok(())
    }
}

impl CertificateIssuer for FakeIssuer {
    fn issue(
        &self,
        domain: &str,
        _email: &str,
        webroot: Option<&Path>,
    ) -> Result<IssuedCertificate, AppError> {
        self.check()?;
        self.issued.lock().unwrap().push((domain.to_string(), webroot.map(Path::to_path_buf)));
        let dir = PathBuf::from("/etc/letsencrypt/live").join(domain);
        Ok(IssuedCertificate {
            cert_path: dir.join("fullchain.pem"),
            key_path: dir.join("privkey.pem"),
        })
    }

    fn renew(&self, domain: &str) -> Result<(), AppError> {
        self.check()?;
        self.renewed.lock().unwrap().push(domain.to_string());
        Ok(())
    }

    fn renew_all(&self) -> Result<(), AppError> {
        self.check()?;
        self.renewed.lock().unwrap().push("*".to_string());
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, AppError> {
        self.check()?;
        Ok(self.certificates.clone())
    }
}
