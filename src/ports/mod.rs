mod certificate_issuer;
mod command_executor;
mod config_renderer;
mod confirmation;
mod driver;
mod registry_store;

pub use certificate_issuer::{CertificateIssuer, IssuedCertificate};
pub use command_executor::{CommandExecutor, CommandOutput};
pub use config_renderer::ConfigRenderer;
pub use confirmation::{AssumeYes, Confirmation};
pub use driver::Driver;
pub use registry_store::RegistryStore;
