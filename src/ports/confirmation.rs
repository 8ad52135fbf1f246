use crate::domain::AppError;

/// Port for asking the operator a yes/no question.
pub trait Confirmation {
    fn confirm(&self, prompt: &str) -> Result<bool, AppError>;
}

/// Confirmation that always answers yes, for forced or non-interactive runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirmation for AssumeYes {
    fn confirm(&self, _prompt: &str) -> Result<bool, AppError> {
        Ok(true)
    }
}
