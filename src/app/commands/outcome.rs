use serde::Serialize;

use crate::domain::Action;

/// Switches shared by the mutating workflows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkflowOptions {
    /// Skip the backend syntax check.
    pub skip_test: bool,
    /// Leave the running server untouched.
    pub no_reload: bool,
    /// Describe the steps without performing them.
    pub dry_run: bool,
}

/// A workflow that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub action: Action,
    pub domain: String,
    /// Non-fatal problems: stale registry, best-effort reload failures.
    pub warnings: Vec<String>,
}

impl Outcome {
    pub fn new(action: Action, domain: impl Into<String>, warnings: Vec<String>) -> Self {
        Self { action, domain: domain.into(), warnings }
    }

    pub fn message(&self) -> String {
        format!("VHost '{}' {}", self.domain, self.action.past_tense())
    }
}

/// Steps a workflow would take, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DryRunPlan {
    pub action: Action,
    pub domain: String,
    pub steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_preview: Option<String>,
}

impl DryRunPlan {
    pub fn new(action: Action, domain: impl Into<String>) -> Self {
        Self { action, domain: domain.into(), steps: Vec::new(), config_preview: None }
    }

    pub fn step(mut self, step: impl Into<String>) -> Self {
        self.steps.push(step.into());
        self
    }

    pub fn step_if(self, condition: bool, step: impl Into<String>) -> Self {
        if condition { self.step(step) } else { self }
    }

    pub fn preview(mut self, config: String) -> Self {
        self.config_preview = Some(config);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WorkflowResult {
    Completed(Outcome),
    DryRun(DryRunPlan),
    /// The operator declined the confirmation prompt.
    Cancelled { action: Action, domain: String },
}

impl WorkflowResult {
    pub fn completed(&self) -> Option<&Outcome> {
        match self {
            WorkflowResult::Completed(outcome) => Some(outcome),
            _ => None,
        }
    }
}
