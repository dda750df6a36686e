//! Operator CLI for the digital client integration.

use aade_digital_client::infrastructure::aade::{AadeConfig, ClientListQuery};
use aade_digital_client::infrastructure::persistence::InMemorySubmissionStore;
use aade_digital_client::telemetry::{LogFormat, init_tracing};
use aade_digital_client::{SubmissionService, domain::value_objects::RemoteId};
use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "dcl",
    version,
    about = "Inspect the AADE digital client registry for the configured entity"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Report which configuration values are missing
    CheckConfig,
    /// List declarations held by the authority
    List {
        /// Start at this declaration id
        #[arg(long)]
        from_id: Option<u64>,
        /// Stop at this declaration id
        #[arg(long)]
        max_id: Option<u64>,
        /// Continue from a previous page
        #[arg(long)]
        continuation_token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    init_tracing(filter, format)?;

    let config = AadeConfig::from_env().context("loading AADE_* configuration")?;

    match cli.command {
        Command::CheckConfig => {
            let report = serde_json::json!({
                "configured": config.is_configured(),
                "environment": config.environment().map(|e| e.to_string()),
                "entity_vat_number": config.entity_vat_number().map(|v| v.to_string()),
                "timeout_ms": config.timeout_ms(),
                "missing": config.missing_fields(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::List {
            from_id,
            max_id,
            continuation_token,
        } => {
            if !config.is_configured() {
                bail!(
                    "digital client is not configured: missing {}",
                    config.missing_fields().join(", ")
                );
            }
            let service = SubmissionService::from_config(config, Arc::new(InMemorySubmissionStore::new()))?;

            let mut query = ClientListQuery::new();
            if let Some(id) = from_id {
                query = query.from_remote_id(RemoteId::new(id));
            }
            if let Some(id) = max_id {
                query = query.up_to_remote_id(RemoteId::new(id));
            }
            if let Some(token) = continuation_token {
                query = query.with_continuation_token(token);
            }

            let list = service
                .list_declarations(&query)
                .await
                .context("requesting declarations")?;
            println!("{}", serde_json::to_string_pretty(&list)?);
        }
    }

    Ok(())
}
