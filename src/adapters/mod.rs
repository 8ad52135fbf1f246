pub mod certbot;
pub mod dialoguer_confirmation;
pub mod drivers;
pub mod platform;
pub mod system_executor;
pub mod templates;
pub mod yaml_registry_store;

pub use certbot::CertbotIssuer;
pub use dialoguer_confirmation::DialoguerConfirmation;
pub use system_executor::SystemCommandExecutor;
pub use templates::EmbeddedTemplateRenderer;
pub use yaml_registry_store::YamlRegistryStore;
