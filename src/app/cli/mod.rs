//! CLI Adapter.

mod logging;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::app::api::{self, AddRequest, RenewTarget, WorkflowOptions};
use crate::domain::{AppError, VHostKind};

#[derive(Parser)]
#[command(name = "vhost")]
#[command(version)]
#[command(about = "Manage nginx, apache and caddy virtual hosts", long_about = None)]
struct Cli {
    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,
    /// Show what would change without touching anything
    #[arg(long, global = true)]
    dry_run: bool,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create, enable and reload a new vhost
    Add {
        domain: String,
        /// static, php, proxy, laravel or wordpress
        #[arg(short = 't', long = "type", default_value = "static")]
        kind: VHostKind,
        /// Document root (all types except proxy)
        #[arg(short, long)]
        root: Option<PathBuf>,
        /// Upstream URL (proxy type only)
        #[arg(short, long)]
        proxy: Option<String>,
        /// PHP-FPM version, defaults to default_php from the config
        #[arg(long)]
        php: Option<String>,
        /// Do not reload the web server
        #[arg(long)]
        no_reload: bool,
        /// Skip the configuration test
        #[arg(long)]
        skip_test: bool,
    },
    /// Delete a vhost's config and link
    #[clap(visible_alias = "rm")]
    Remove {
        domain: String,
        /// Do not ask for confirmation
        #[arg(short, long)]
        force: bool,
        #[arg(long)]
        no_reload: bool,
    },
    /// Activate a vhost
    Enable {
        domain: String,
        #[arg(long)]
        no_reload: bool,
        #[arg(long)]
        skip_test: bool,
    },
    /// Deactivate a vhost
    Disable {
        domain: String,
        #[arg(long)]
        no_reload: bool,
    },
    /// List vhosts
    #[clap(visible_alias = "ls")]
    List,
    /// Show one vhost
    Show { domain: String },
    /// Update registry activation flags from the backend
    Sync,
    /// Check tools, backend directories and every tracked vhost
    Doctor,
    /// Manage TLS certificates
    Ssl {
        #[command(subcommand)]
        command: SslCommands,
    },
}

#[derive(Subcommand)]
enum SslCommands {
    /// Obtain a certificate and switch the vhost to TLS
    Install {
        domain: String,
        /// Contact address for the ACME account
        #[arg(short, long)]
        email: String,
        #[arg(long)]
        no_reload: bool,
    },
    /// Renew one certificate, or all with --all
    Renew {
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        domain: Option<String>,
        #[arg(long)]
        all: bool,
    },
    /// List managed certificates
    Status,
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(e) = dispatch(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<(), AppError> {
    let Cli { json, dry_run, command, .. } = cli;
    let options =
        |skip_test: bool, no_reload: bool| WorkflowOptions { skip_test, no_reload, dry_run };

    match command {
        Commands::Add { domain, kind, root, proxy, php, no_reload, skip_test } => {
            let request = AddRequest { domain, kind, root, proxy_pass: proxy, php_version: php };
            let result = api::add(request, &options(skip_test, no_reload))?;
            emit(json, &result, output::print_workflow)
        }
        Commands::Remove { domain, force, no_reload } => {
            // JSON consumers cannot answer a prompt.
            let result = api::remove(&domain, force || json, &options(false, no_reload))?;
            emit(json, &result, output::print_workflow)
        }
        Commands::Enable { domain, no_reload, skip_test } => {
            let result = api::enable(&domain, &options(skip_test, no_reload))?;
            emit(json, &result, output::print_workflow)
        }
        Commands::Disable { domain, no_reload } => {
            let result = api::disable(&domain, &options(false, no_reload))?;
            emit(json, &result, output::print_workflow)
        }
        Commands::List => {
            let entries = api::list()?;
            emit(json, entries.as_slice(), output::print_list)
        }
        Commands::Show { domain } => {
            let details = api::show(&domain)?;
            emit(json, &details, output::print_details)
        }
        Commands::Sync => {
            let outcome = api::sync(dry_run)?;
            emit(json, &outcome, |outcome| output::print_sync(outcome, dry_run))
        }
        Commands::Doctor => {
            let report = api::doctor()?;
            emit(json, &report, output::print_doctor)
        }
        Commands::Ssl { .. } if dry_run => {
            Err(AppError::validation("--dry-run is not supported for ssl commands"))
        }
        Commands::Ssl { command } => match command {
            SslCommands::Install { domain, email, no_reload } => {
                let outcome = api::ssl_install(&domain, &email, &options(false, no_reload))?;
                emit(json, &outcome, output::print_outcome)
            }
            SslCommands::Renew { domain, all } => {
                let target = match domain {
                    Some(domain) if !all => RenewTarget::Domain(domain),
                    _ => RenewTarget::All,
                };
                let outcome = api::ssl_renew(&target, &options(false, false))?;
                emit(json, &outcome, output::print_outcome)
            }
            SslCommands::Status => {
                let status = api::ssl_status()?;
                emit(json, &status, output::print_certificates)
            }
        },
    }
}

fn emit<T: serde::Serialize + ?Sized>(
    json: bool,
    value: &T,
    print: impl FnOnce(&T),
) -> Result<(), AppError> {
    if json {
        return output::print_json(value);
    }
    print(value);
    Ok(())
}
