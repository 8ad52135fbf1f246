use std::io;
use std::sync::Mutex;

use crate::domain::{AppError, Registry};
use crate::ports::RegistryStore;

#[derive(Default)]
pub struct MemoryRegistryStore {
    registry: Mutex<Registry>,
    saves: Mutex<usize>,
    fail_save: bool,
}

impl MemoryRegistryStore {
    pub fn new(registry: Registry) -> Self {
        Self { registry: Mutex::new(registry), saves: Mutex::new(0), fail_save: false }
    }

    pub fn failing_save(mut self) -> Self {
        self.fail_save = true;
        self
    }

    pub fn snapshot(&self) -> Registry {
        self.registry.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }
}

impl RegistryStore for MemoryRegistryStore {
    fn load(&self) -> Result<Registry, AppError> {
        Ok(self.snapshot())
    }

    fn save(&self, registry: &Registry) -> Result<(), AppError> {
        if self.fail_save {
            return Err(AppError::filesystem(
                "write config",
                "/home/admin/.config/vhost/config.yaml",
                io::Error::new(io::ErrorKind::PermissionDenied, "read-only file system"),
            ));
        }
        *self.saves.lock().unwrap() += 1;
        *self.registry.lock().unwrap() = registry.clone();
        Ok(())
    }
}
