use crate::domain::{AppError, Registry};

/// Port for the durable store of tracked vhosts.
pub trait RegistryStore {
    /// Load the registry, or the default registry when none was saved yet.
    fn load(&self) -> Result<Registry, AppError>;

    /// Persist the registry.
    fn save(&self, registry: &Registry) -> Result<(), AppError>;
}
