use crate::domain::{AppError, BackendKind, VHost};

/// Port for turning a vhost into backend-specific configuration text.
///
/// Rendering is a pure function of its inputs; defaults such as the PHP
/// version must already be applied to `vhost`.
pub trait ConfigRenderer {
    fn render(&self, backend: BackendKind, vhost: &VHost) -> Result<String, AppError>;
}
