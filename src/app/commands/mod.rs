//! Lifecycle workflows over a driver, a renderer and the registry.

pub mod add;
mod apply;
pub mod disable;
pub mod doctor;
pub mod enable;
pub mod list;
mod outcome;
pub mod remove;
pub mod show;
pub mod ssl;
pub mod sync;

pub use add::AddRequest;
pub use doctor::{Check, CheckStatus, DoctorReport, VHostReport};
pub use list::ListEntry;
pub use outcome::{DryRunPlan, Outcome, WorkflowOptions, WorkflowResult};
pub use show::VHostDetails;
pub use ssl::{CertificateEntry, CertificateStatus, RenewTarget};
pub use sync::{SyncChange, SyncOutcome};
