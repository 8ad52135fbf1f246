use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::{Action, BackendKind, VHostKind};

/// Library-wide error type for vhost operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Filesystem operation failed on a specific path.
    #[error("Failed to {action} '{}': {source}", path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Input rejected before any state change.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// VHost is neither tracked nor present on disk.
    #[error("VHost '{domain}' not found")]
    NotFound { domain: String },

    /// VHost is already tracked or already has a config file.
    #[error("VHost '{domain}' already exists")]
    AlreadyExists { domain: String },

    /// Activation link already present.
    #[error("VHost '{domain}' is already enabled")]
    AlreadyActive { domain: String },

    /// No activation link present.
    #[error("VHost '{domain}' is not enabled")]
    NotActive { domain: String },

    /// A regular file occupies the activation location.
    #[error("Refusing to disable '{domain}': {} is not a symlink", path.display())]
    Integrity { domain: String, path: PathBuf },

    /// Backend syntax check rejected the configuration.
    #[error("{backend} configuration test failed: {output}")]
    ConfigTest { backend: BackendKind, output: String },

    /// Both the service-manager reload and the fallback failed.
    #[error("Failed to reload {backend}: {primary}; fallback: {fallback}")]
    Reload { backend: BackendKind, primary: String, fallback: String },

    /// External command could not be started.
    #[error("Failed to run '{command}': {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// No template exists for the backend/kind pair.
    #[error("Template not found for {backend}/{kind}")]
    TemplateNotFound { backend: BackendKind, kind: VHostKind },

    /// Template substitution failed.
    #[error("Failed to render template '{template}': {details}")]
    Render { template: String, details: String },

    /// Certificate issuance or renewal failed.
    #[error("Certificate error: {0}")]
    Certificate(String),

    /// Registry file could not be parsed or serialized.
    #[error("Failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A lifecycle workflow failed after it started.
    #[error("Failed to {action} '{domain}': {source}{}", rollback_notes(.rollback_failures))]
    Workflow {
        action: Action,
        domain: String,
        source: Box<AppError>,
        rollback_failures: Vec<String>,
    },
}

fn rollback_notes(failures: &[String]) -> String {
    failures.iter().map(|failure| format!("\n  rollback warning: {failure}")).collect()
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        AppError::Validation(message.into())
    }

    pub(crate) fn filesystem(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        AppError::Filesystem { action, path: path.into(), source }
    }

    /// Wrap this error as the failure of `action` on `domain`.
    pub fn in_workflow(self, action: Action, domain: &str) -> Self {
        AppError::Workflow {
            action,
            domain: domain.to_string(),
            source: Box::new(self),
            rollback_failures: Vec::new(),
        }
    }

    /// The innermost error, skipping workflow wrappers.
    pub fn cause(&self) -> &AppError {
        match self {
            AppError::Workflow { source, .. } => source.cause(),
            other => other,
        }
    }

    /// Rollback failures attached to a workflow error.
    pub fn rollback_failures(&self) -> &[String] {
        match self {
            AppError::Workflow { rollback_failures, .. } => rollback_failures,
            _ => &[],
        }
    }

    /// Provide an `io::ErrorKind`-like view for callers branching on error class.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Filesystem { source, .. } | AppError::CommandSpawn { source, .. } => {
                source.kind()
            }
            AppError::Configuration(_)
            | AppError::Validation(_)
            | AppError::Render { .. }
            | AppError::Yaml(_) => io::ErrorKind::InvalidInput,
            AppError::NotFound { .. }
            | AppError::NotActive { .. }
            | AppError::TemplateNotFound { .. } => io::ErrorKind::NotFound,
            AppError::AlreadyExists { .. } | AppError::AlreadyActive { .. } => {
                io::ErrorKind::AlreadyExists
            }
            AppError::Integrity { .. } => io::ErrorKind::InvalidData,
            AppError::ConfigTest { .. } | AppError::Reload { .. } | AppError::Certificate(_) => {
                io::ErrorKind::Other
            }
            AppError::Workflow { source, .. } => source.kind(),
        }
    }
}
