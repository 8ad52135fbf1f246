//! vhost: create, enable and remove web server virtual hosts for nginx,
//! apache and caddy from one registry.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    AddRequest, CertificateEntry, CertificateStatus, Check, CheckStatus, DoctorReport, DryRunPlan,
    ListEntry, Outcome, RenewTarget, SyncChange, SyncOutcome, VHostDetails, VHostReport,
    WorkflowOptions, WorkflowResult, add, disable, doctor, enable, list, remove, show, ssl_install,
    ssl_renew, ssl_status, sync,
};
pub use domain::{AppError, BackendKind, VHost, VHostKind};
