pub mod action;
pub mod backend;
pub mod error;
pub mod registry;
pub mod validation;
pub mod vhost;

pub use action::Action;
pub use backend::{BackendKind, BackendPaths};
pub use error::AppError;
pub use registry::{DEFAULT_PHP_VERSION, PathsOverride, Registry};
pub use vhost::{VHost, VHostKind};
