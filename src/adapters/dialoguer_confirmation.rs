use dialoguer::Confirm;

use crate::domain::AppError;
use crate::ports::Confirmation;

/// Interactive y/N prompt on the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialoguerConfirmation;

impl Confirmation for DialoguerConfirmation {
    fn confirm(&self, prompt: &str) -> Result<bool, AppError> {
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| AppError::config_error(format!("Failed to read confirmation: {e}")))
    }
}
