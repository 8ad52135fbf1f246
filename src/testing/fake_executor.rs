use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::sync::{Arc, Mutex};

use crate::domain::AppError;
use crate::ports::{CommandExecutor, CommandOutput};

#[derive(Default)]
struct State {
    failures: BTreeMap<String, String>,
    responses: BTreeMap<String, String>,
    unspawnable: BTreeSet<String>,
    calls: Vec<String>,
}

/// Executor that records command lines and succeeds unless told otherwise.
///
/// Clones share state so a test can keep a handle after moving one into a driver.
#[derive(Clone, Default)]
pub struct FakeExecutor {
    state: Arc<Mutex<State>>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `command_line` exit non-zero with `output`.
    pub fn failing(self, command_line: &str, output: &str) -> Self {
        self.state.lock().unwrap().failures.insert(command_line.to_string(), output.to_string());
        self
    }

    /// Make `command_line` succeed with `output`.
    pub fn responding(self, command_line: &str, output: &str) -> Self {
        self.state.lock().unwrap().responses.insert(command_line.to_string(), output.to_string());
        self
    }

    /// Make `program` impossible to start.
    pub fn unspawnable(self, program: &str) -> Self {
        self.state.lock().unwrap().unspawnable.insert(program.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }
}

impl CommandExecutor for FakeExecutor {
    fn execute(&self, program: &str, args: &[&str]) -> Result<CommandOutput, AppError> {
        let mut state = self.state.lock().unwrap();
        let line = std::iter::once(program).chain(args.iter().copied()).collect::<Vec<_>>().join(" ");
        if state.unspawnable.contains(program) {
            return Err(AppError::CommandSpawn {
                command: line,
                source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
            });
        }
        state.calls.push(line.clone());
        if let Some(output) = state.failures.get(&line) {
            return Ok(CommandOutput::failed(output.clone()));
        }
        Ok(CommandOutput::succeeded(state.responses.get(&line).cloned().unwrap_or_default()))
    }

    fn is_available(&self, program: &str) -> bool {
        !self.state.lock().unwrap().unspawnable.contains(program)
    }
}
