use crate::domain::AppError;

/// Exit status and combined output of an external command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub success: bool,
    /// stdout followed by stderr, lossily decoded.
    pub output: String,
}

impl CommandOutput {
    pub fn succeeded(output: impl Into<String>) -> Self {
        Self { success: true, output: output.into() }
    }

    pub fn failed(output: impl Into<String>) -> Self {
        Self { success: false, output: output.into() }
    }
}

/// Port for running external programs without a shell.
pub trait CommandExecutor {
    /// Run `program` with `args` and wait for it to exit.
    ///
    /// Returns `Err` only when the process could not be started; a non-zero
    /// exit is reported through `CommandOutput::success`.
    fn execute(&self, program: &str, args: &[&str]) -> Result<CommandOutput, AppError>;

    /// Whether `program` can be found on `PATH`.
    fn is_available(&self, program: &str) -> bool;
}
