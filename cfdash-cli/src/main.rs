//! cfdash: Cloudflare DNS dashboard on the command line
//!
//! # Usage
//! ```bash
//! # Save the account email and global API key
//! cfdash login --email me@example.com --api-key <key>
//!
//! # List zones, then the records of one zone
//! cfdash domains
//! cfdash records 023e105f4ecef8ad9ca31a8372d0c353
//!
//! # Add, edit and remove a record
//! cfdash add <zone-id> --name www --type A --content 192.0.2.10
//! cfdash update <zone-id> <record-id> --content 192.0.2.11
//! cfdash delete <zone-id> <record-id>
//! ```

mod render;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use cfdash_client::{
    ClientConfig, Credentials, DEFAULT_TTL, DnsRecord, DnsRecordType, RecordForm, check_ttl,
};
use cfdash_core::{CredentialStore, Dashboard, DomainViewModel, JsonFileCredentialStore};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

// ============================================================
// CLI Definition
// ============================================================

#[derive(Parser, Debug)]
#[command(name = "cfdash")]
#[command(about = "Manage Cloudflare DNS zones and records", long_about = None)]
#[command(version)]
struct Cli {
    /// Preference file holding the email and API key
    #[arg(long, global = true, env = "CFDASH_CONFIG")]
    config: Option<PathBuf>,

    /// Cloudflare API root (for proxies and test servers)
    #[arg(long, global = true, env = "CFDASH_BASE_URL")]
    base_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Save the Cloudflare account email and global API key
    Login {
        #[arg(long, env = "CF_AUTH_EMAIL")]
        email: String,

        #[arg(long, env = "CF_AUTH_KEY", hide_env_values = true)]
        api_key: String,

        /// Save without checking the key against the API
        #[arg(long)]
        no_verify: bool,
    },

    /// List the zones of the account
    Domains,

    /// List the DNS records of a zone
    Records {
        /// Zone ID
        domain_id: String,
    },

    /// Create a DNS record
    Add {
        /// Zone ID
        domain_id: String,

        /// Record name (e.g., www.example.com)
        #[arg(long)]
        name: String,

        /// Record type (A, AAAA, CNAME, MX, TXT)
        #[arg(long = "type", default_value = "A", value_parser = parse_record_type)]
        record_type: DnsRecordType,

        /// Record content (IP address, hostname, or text)
        #[arg(long)]
        content: String,

        /// TTL in seconds (60-86400, or 1 for automatic)
        #[arg(long, default_value_t = DEFAULT_TTL, value_parser = parse_ttl)]
        ttl: u32,
    },

    /// Edit a DNS record; omitted fields keep their current value
    Update {
        /// Zone ID
        domain_id: String,

        /// Record ID
        record_id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long = "type", value_parser = parse_record_type)]
        record_type: Option<DnsRecordType>,

        #[arg(long)]
        content: Option<String>,

        /// New TTL (60-86400, or 1); omitted keeps the current one as-is
        #[arg(long, value_parser = parse_ttl)]
        ttl: Option<u32>,
    },

    /// Delete a DNS record
    Delete {
        /// Zone ID
        domain_id: String,

        /// Record ID
        record_id: String,
    },
}

fn parse_record_type(value: &str) -> Result<DnsRecordType, String> {
    let record_type = DnsRecordType::from(value);
    if DnsRecordType::EDITABLE.contains(&record_type) {
        Ok(record_type)
    } else {
        let allowed: Vec<_> = DnsRecordType::EDITABLE.iter().map(DnsRecordType::as_str).collect();
        Err(format!("expected one of {}", allowed.join(", ")))
    }
}

fn parse_ttl(value: &str) -> Result<u32, String> {
    let ttl: u32 = value.parse().map_err(|e| format!("{e}"))?;
    check_ttl(ttl)?;
    Ok(ttl)
}

/// Fields given on the command line for `update`.
#[derive(Debug, Default)]
struct FormOverrides {
    name: Option<String>,
    record_type: Option<DnsRecordType>,
    content: Option<String>,
    ttl: Option<u32>,
}

impl FormOverrides {
    /// Edit form pre-filled from `record`, with the given fields replaced.
    fn apply(self, record: &DnsRecord) -> RecordForm {
        let mut form = RecordForm::from_record(record);
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(record_type) = self.record_type {
            form.record_type = record_type;
        }
        if let Some(content) = self.content {
            form.content = content;
        }
        if let Some(ttl) = self.ttl {
            form.ttl = ttl;
        }
        form
    }
}

// ============================================================
// Main Entry Point
// ============================================================

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; stdout carries the tables.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .without_time(),
        )
        .with(filter)
        .init();
}

/// Token cancelled on Ctrl-C.
fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling request");
            trigger.cancel();
        }
    });
    token
}

async fn run(cli: Cli) -> Result<()> {
    let store: Arc<dyn CredentialStore> = Arc::new(match cli.config {
        Some(path) => JsonFileCredentialStore::new(path),
        None => JsonFileCredentialStore::default_location()?,
    });

    let mut config = ClientConfig::default();
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }

    let dashboard = Dashboard::new(store, config);
    let cancel = cancel_on_ctrl_c();

    if !matches!(cli.command, Commands::Login { .. }) {
        ensure_signed_in(&dashboard).await?;
    }

    let vm = &dashboard.view_model;
    match cli.command {
        Commands::Login {
            email,
            api_key,
            no_verify,
        } => {
            login(&dashboard, Credentials::new(email, api_key), no_verify, &cancel).await?;
        }

        Commands::Domains => {
            vm.fetch_domains(&cancel).await?;
            print!("{}", render::domains_table(&vm.snapshot().domains));
        }

        Commands::Records { domain_id } => {
            vm.fetch_dns_records(&domain_id, &cancel).await?;
            print!("{}", render::records_table(&vm.snapshot().records));
        }

        Commands::Add {
            domain_id,
            name,
            record_type,
            content,
            ttl,
        } => {
            let form = RecordForm::new(name, record_type, content, ttl);
            let record = vm.add_dns_record(&domain_id, &form, &cancel).await?;
            println!("Created {}", render::record_line(&record));
        }

        Commands::Update {
            domain_id,
            record_id,
            name,
            record_type,
            content,
            ttl,
        } => {
            let overrides = FormOverrides {
                name,
                record_type,
                content,
                ttl,
            };
            let record = update(vm, &domain_id, &record_id, overrides, &cancel).await?;
            println!("Updated {}", render::record_line(&record));
        }

        Commands::Delete {
            domain_id,
            record_id,
        } => {
            if !vm.delete_dns_record(&domain_id, &record_id, &cancel).await? {
                bail!("Cloudflare did not confirm deletion of record {record_id}");
            }
            println!("Deleted record {record_id}");
        }
    }

    Ok(())
}

/// Load the saved credentials; every command but `login` needs them.
async fn ensure_signed_in(dashboard: &Dashboard) -> Result<()> {
    let credentials = dashboard
        .bootstrap()
        .await
        .context("Failed to load saved credentials")?;
    if !credentials.is_complete() {
        bail!("No Cloudflare credentials saved, run `cfdash login` first");
    }
    tracing::info!("Using account {}", credentials.email);
    Ok(())
}

async fn login(
    dashboard: &Dashboard,
    credentials: Credentials,
    no_verify: bool,
    cancel: &CancellationToken,
) -> Result<()> {
    let saved = dashboard.save_credentials(&credentials).await?;
    println!("Saved credentials for {}", saved.email);

    if no_verify {
        return Ok(());
    }

    dashboard
        .view_model
        .fetch_domains(cancel)
        .await
        .context("Credentials saved, but the API rejected them")?;
    println!(
        "Verified: {} zone(s) accessible",
        dashboard.view_model.snapshot().domains.len()
    );
    Ok(())
}

/// Load the zone's records, pre-fill the form from the target record and submit.
async fn update(
    vm: &DomainViewModel,
    domain_id: &str,
    record_id: &str,
    overrides: FormOverrides,
    cancel: &CancellationToken,
) -> Result<DnsRecord> {
    vm.fetch_dns_records(domain_id, cancel).await?;
    let state = vm.snapshot();
    let Some(current) = state.records.iter().find(|r| r.id == record_id) else {
        bail!("Record {record_id} not found in zone {domain_id}");
    };

    let form = overrides.apply(current);
    Ok(vm.update_dns_record(domain_id, record_id, &form, cancel).await?)
}
