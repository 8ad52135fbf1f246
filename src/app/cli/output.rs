//! Console and JSON rendering of command results.

use serde::Serialize;

use crate::app::commands::{
    CertificateStatus, Check, CheckStatus, DoctorReport, ListEntry, Outcome, SyncOutcome,
    VHostDetails, WorkflowResult,
};
use crate::domain::AppError;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::config_error(format!("Failed to serialize output: {e}")))?;
    println!("{rendered}");
    Ok(())
}

fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("⚠️ {warning}");
    }
}

pub fn print_outcome(outcome: &Outcome) {
    print_warnings(&outcome.warnings);
    println!("✅ {}", outcome.message());
}

pub fn print_workflow(result: &WorkflowResult) {
    match result {
        WorkflowResult::Completed(outcome) => print_outcome(outcome),
        WorkflowResult::DryRun(plan) => {
            println!("Dry run: would {} '{}'", plan.action, plan.domain);
            for (index, step) in plan.steps.iter().enumerate() {
                println!("  {}. {step}", index + 1);
            }
            if let Some(preview) = &plan.config_preview {
                println!("\n{preview}");
            }
        }
        WorkflowResult::Cancelled { domain, .. } => println!("Cancelled; '{domain}' left unchanged"),
    }
}

pub fn print_list(entries: &[ListEntry]) {
    if entries.is_empty() {
        println!("No vhosts found");
        return;
    }

    let width = entries.iter().map(|e| e.domain.len()).max().unwrap_or(0).max("DOMAIN".len());
    println!("{:<width$}  {:<9}  {:<7}  {:<3}  TARGET", "DOMAIN", "TYPE", "STATUS", "SSL");
    for entry in entries {
        let status = if entry.enabled { "enabled" } else { "disabled" };
        let ssl = if entry.ssl { "yes" } else { "no" };
        let mut target = entry.target.clone().unwrap_or_else(|| "-".to_string());
        if !entry.config_present {
            target.push_str(" (config missing)");
        }
        if entry.drift {
            target.push_str(" (registry out of date)");
        }
        println!(
            "{:<width$}  {:<9}  {:<7}  {:<3}  {target}",
            entry.domain,
            entry.kind_label(),
            status,
            ssl
        );
    }
}

pub fn print_details(details: &VHostDetails) {
    let vhost = &details.vhost;
    println!("Domain:     {}", vhost.domain);
    println!("Type:       {}", vhost.kind);
    if let Some(root) = &vhost.root {
        println!("Root:       {}", root.display());
    }
    if let Some(proxy) = &vhost.proxy_pass {
        println!("Proxy:      {proxy}");
    }
    if let Some(php) = &vhost.php_version {
        println!("PHP:        {php}");
    }
    println!("SSL:        {}", if vhost.ssl { "yes" } else { "no" });
    if let (Some(cert), Some(key)) = (&vhost.ssl_cert, &vhost.ssl_key) {
        println!("Cert:       {}", cert.display());
        println!("Key:        {}", key.display());
    }
    println!("Status:     {}", if details.active { "enabled" } else { "disabled" });
    println!("Backend:    {}", details.backend);
    println!(
        "Config:     {}{}",
        details.config_path.display(),
        if details.config_present { "" } else { " (missing)" }
    );
    println!("Link:       {}", details.activation_path.display());
    println!("Created:    {}", vhost.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
    if details.drift() {
        println!("⚠️ Registry says {}; run `vhost sync` to repair", if vhost.enabled { "enabled" } else { "disabled" });
    }
}

pub fn print_sync(outcome: &SyncOutcome, dry_run: bool) {
    print_warnings(&outcome.warnings);
    if outcome.changes.is_empty() {
        println!("✅ Registry already matches the backend");
    }
    for change in &outcome.changes {
        let state = if change.enabled { "enabled" } else { "disabled" };
        let verb = if dry_run { "would mark" } else { "marked" };
        println!("✅ {verb} '{}' {state}", change.domain);
    }
    for domain in &outcome.missing {
        println!("⚠️ '{domain}' is tracked but its config file is missing");
    }
    for domain in &outcome.untracked {
        println!("ℹ️ '{domain}' exists on disk but is not tracked");
    }
}

fn print_check(check: &Check, indent: &str) {
    let marker = match check.status {
        CheckStatus::Ok => "✅",
        CheckStatus::Warning => "⚠️",
        CheckStatus::Error => "❌",
    };
    println!("{indent}{marker} {}", check.message);
}

pub fn print_doctor(report: &DoctorReport) {
    println!("Backend: {}", report.backend);
    println!("  available: {}", report.available.display());
    println!("  enabled:   {}", report.enabled.display());

    println!("\nSystem:");
    for check in &report.system {
        print_check(check, "  ");
    }
    println!("\nConfiguration:");
    for check in &report.configuration {
        print_check(check, "  ");
    }
    if !report.vhosts.is_empty() {
        println!("\nVHosts:");
    }
    for vhost in &report.vhosts {
        println!("  {}", vhost.domain);
        for check in &vhost.checks {
            print_check(check, "    ");
        }
    }

    let summary = match report.status() {
        CheckStatus::Ok => "All checks passed",
        CheckStatus::Warning => "Completed with warnings",
        CheckStatus::Error => "Problems found",
    };
    println!("\n{summary}");
}

pub fn print_certificates(status: &CertificateStatus) {
    if status.certificates.is_empty() {
        println!("No certificates found");
    } else {
        println!("Managed certificates:");
    }
    for certificate in &status.certificates {
        let note = match (certificate.tracked, certificate.in_use) {
            (true, true) => "",
            (true, false) => " (vhost not using TLS)",
            (false, _) => " (no tracked vhost)",
        };
        println!("  - {}{note}", certificate.name);
    }
    for domain in &status.missing {
        println!("⚠️ '{domain}' serves TLS but certbot holds no certificate for it");
    }
}
