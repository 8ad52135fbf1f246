use std::sync::Mutex;

use crate::domain::AppError;
use crate::ports::Confirmation;

/// Confirmation with a fixed answer that records every prompt.
pub struct ScriptedConfirmation {
    answer: bool,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirmation {
    pub fn answering(answer: bool) -> Self {
        Self { answer, prompts: Mutex::new(Vec::new()) }
    }
}

impl Confirmation for ScriptedConfirmation {
    fn confirm(&self, prompt: &str) -> Result<bool, AppError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.answer)
    }
}
