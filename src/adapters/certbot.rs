use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::domain::AppError;
use crate::ports::{CertificateIssuer, CommandExecutor, IssuedCertificate};

const CERTBOT: &str = "certbot";
const LETSENCRYPT_LIVE_DIR: &str = "/etc/letsencrypt/live";

/// Let's Encrypt issuance through the `certbot` CLI in `certonly` mode.
#[derive(Debug, Clone)]
pub struct CertbotIssuer<E: CommandExecutor> {
    executor: E,
    live_dir: PathBuf,
}

impl<E: CommandExecutor> CertbotIssuer<E> {
    pub fn new(executor: E) -> Self {
        Self { executor, live_dir: PathBuf::from(LETSENCRYPT_LIVE_DIR) }
    }

    fn certificate_paths(&self, domain: &str) -> IssuedCertificate {
        let dir = self.live_dir.join(domain);
        IssuedCertificate { cert_path: dir.join("fullchain.pem"), key_path: dir.join("privkey.pem") }
    }

    fn run(&self, args: &[&str]) -> Result<String, AppError> {
        if !self.executor.is_available(CERTBOT) {
            return Err(AppError::Certificate(
                "certbot is not installed. Install it with: apt install certbot".into(),
            ));
        }
        debug!(args = ?args, "Running certbot");
        let output = self.executor.execute(CERTBOT, args)?;
        if !output.success {
            return Err(AppError::Certificate(format!("certbot failed: {}", output.output.trim())));
        }
        Ok(output.output)
    }
}

/// Certificate names from `certbot certificates` output.
fn parse_certificate_names(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.trim().strip_prefix("Certificate Name:"))
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

impl<E: CommandExecutor> CertificateIssuer for CertbotIssuer<E> {
    fn issue(
        &self,
        domain: &str,
        email: &str,
        webroot: Option<&Path>,
    ) -> Result<IssuedCertificate, AppError> {
        let webroot_arg = webroot.map(|path| path.display().to_string());
        let mut args = vec!["certonly"];
        match &webroot_arg {
            Some(path) => args.extend(["--webroot", "-w", path.as_str()]),
            None => args.push("--standalone"),
        }
        args.extend(["-d", domain, "--email", email, "--agree-tos", "--non-interactive"]);

        self.run(&args)?;
        info!(domain, "Certificate issued");
        Ok(self.certificate_paths(domain))
    }

    fn renew(&self, domain: &str) -> Result<(), AppError> {
        self.run(&["renew", "--cert-name", domain, "--non-interactive"])?;
        info!(domain, "Certificate renewed");
        Ok(())
    }

    fn renew_all(&self) -> Result<(), AppError> {
        self.run(&["renew", "--non-interactive"])?;
        info!("All certificates renewed");
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, AppError> {
        let output = self.run(&["certificates"])?;
        Ok(parse_certificate_names(&output))
    }
}
