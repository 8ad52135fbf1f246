use crate::ports::{ConfigRenderer, Driver, RegistryStore};

/// Dependencies shared by every lifecycle command.
pub struct AppContext<D: Driver, S: RegistryStore, R: ConfigRenderer> {
    driver: D,
    store: S,
    renderer: R,
}

impl<D: Driver, S: RegistryStore, R: ConfigRenderer> AppContext<D, S, R> {
    pub fn new(driver: D, store: S, renderer: R) -> Self {
        Self { driver, store, renderer }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}
