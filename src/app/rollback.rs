//! Compensating actions for partially applied workflows.

use tracing::{debug, warn};

use crate::domain::{Action, AppError};

type Step<'a> = Box<dyn FnOnce() -> Result<(), AppError> + 'a>;

/// Stack of labelled compensating steps, undone newest first.
///
/// Steps only run through [`Rollback::fail`]; dropping the stack once a
/// workflow has passed its point of no return discards them.
#[derive(Default)]
pub struct Rollback<'a> {
    steps: Vec<(&'static str, Step<'a>)>,
}

impl<'a> Rollback<'a> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn push(&mut self, label: &'static str, step: impl FnOnce() -> Result<(), AppError> + 'a) {
        self.steps.push((label, Box::new(step)));
    }

    /// Run every step LIFO and collect the failures as warnings.
    pub fn run(self) -> Vec<String> {
        let mut failures = Vec::new();
        for (label, step) in self.steps.into_iter().rev() {
            debug!(step = label, "Rolling back");
            if let Err(e) = step() {
                warn!(step = label, error = %e, "Rollback step failed");
                failures.push(format!("{label}: {e}"));
            }
        }
        failures
    }

    /// Undo everything and wrap `error` as the failure of `action` on
    /// `domain`, keeping rollback failures alongside the original cause.
    pub fn fail(self, error: AppError, action: Action, domain: &str) -> AppError {
        warn!(action = %action, domain, error = %error, "Workflow failed, rolling back");
        let rollback_failures = self.run();
        AppError::Workflow {
            action,
            domain: domain.to_string(),
            source: Box::new(error),
            rollback_failures,
        }
    }
}
