use std::fmt;

use serde::Serialize;

/// Lifecycle workflows, named in outcomes and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Add,
    Enable,
    Disable,
    Remove,
    InstallTls,
    RenewTls,
    Sync,
}

impl Action {
    pub fn verb(&self) -> &'static str {
        match self {
            Action::Add => "add",
            Action::Enable => "enable",
            Action::Disable => "disable",
            Action::Remove => "remove",
            Action::InstallTls => "install TLS for",
            Action::RenewTls => "renew TLS for",
            Action::Sync => "sync",
        }
    }

    /// Past tense used in success messages.
    pub fn past_tense(&self) -> &'static str {
        match self {
            Action::Add => "created and enabled",
            Action::Enable => "enabled",
            Action::Disable => "disabled",
            Action::Remove => "removed",
            Action::InstallTls => "secured with TLS",
            Action::RenewTls => "renewed",
            Action::Sync => "synchronized",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}
