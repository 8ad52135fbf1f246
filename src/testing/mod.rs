mod fake_executor;
mod fake_issuer;
mod memory_registry_store;
mod recording_driver;
mod scripted_confirmation;

pub use fake_executor::FakeExecutor;
pub use fake_issuer::FakeIssuer;
pub use memory_registry_store::MemoryRegistryStore;
pub use recording_driver::RecordingDriver;
pub use scripted_confirmation::ScriptedConfirmation;

use crate::adapters::EmbeddedTemplateRenderer;
use crate::app::AppContext;
use crate::domain::Registry;

pub type TestContext = AppContext<RecordingDriver, MemoryRegistryStore, EmbeddedTemplateRenderer>;

/// Context over a recording driver, an in-memory registry and the real templates.
pub fn test_context(driver: RecordingDriver, registry: Registry) -> TestContext {
    test_context_with_store(driver, MemoryRegistryStore::new(registry))
}

pub fn test_context_with_store(driver: RecordingDriver, store: MemoryRegistryStore) -> TestContext {
    AppContext::new(driver, store, EmbeddedTemplateRenderer::new().unwrap())
}
