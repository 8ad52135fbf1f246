//! Web-server backends sharing the available/enabled symlink layout.

mod profile;
mod site_driver;

pub use profile::BackendProfile;
pub use site_driver::SiteDriver;

use crate::domain::{BackendKind, BackendPaths};
use crate::ports::{CommandExecutor, Driver};

/// Build the driver for `kind`.
pub fn create_driver<E>(kind: BackendKind, paths: BackendPaths, executor: E) -> Box<dyn Driver>
where
    E: CommandExecutor + 'static,
{
    Box::new(SiteDriver::new(BackendProfile::for_kind(kind), paths, executor))
}
