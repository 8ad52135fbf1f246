use std::env;
use std::os::unix::fs::PermissionsExt;
use std::process::Command;

use tracing::debug;

use crate::domain::AppError;
use crate::ports::{CommandExecutor, CommandOutput};

/// Runs programs directly through `std::process`, without a shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn execute(&self, program: &str, args: &[&str]) -> Result<CommandOutput, AppError> {
        let output = Command::new(program).args(args).output().map_err(|e| {
            AppError::CommandSpawn { command: format!("{} {}", program, args.join(" ")), source: e }
        })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        debug!(
            program,
            args = ?args,
            success = output.status.success(),
            exit_code = ?output.status.code(),
            "Command completed"
        );
        Ok(CommandOutput { success: output.status.success(), output: combined })
    }

    fn is_available(&self, program: &str) -> bool {
        let Some(path) = env::var_os("PATH") else {
            return false;
        };
        env::split_paths(&path).any(|dir| {
            dir.join(program)
                .metadata()
                .is_ok_and(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        })
    }
}
