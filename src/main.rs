//! `payhash` command line: single and batch payments, SMTP check.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use alloy::primitives::Address;
use clap::{Parser, Subcommand};
use serde::Serialize;

use payhash::blockchain::{AlloyChainClient, Wallet};
use payhash::config::{load_config, ConfigError};
use payhash::mail::{MailTransport, SmtpMailer};
use payhash::observability::init_logging;
use payhash::{PayHashConfig, PaymentOrchestrator, TransferRequest};

const DEFAULT_CONFIG_PATH: &str = "payhash.toml";

#[derive(Parser)]
#[command(name = "payhash")]
#[command(about = "Send token payments and email their receipts", long_about = None)]
struct Cli {
    /// TOML configuration file (defaults apply when `payhash.toml` is absent)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides `observability.log_level`
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the SMTP server accepts our credentials
    Verify,
    /// Make a single payment and email its receipt
    Pay {
        /// Token contract address
        #[arg(long)]
        token: Address,
        /// Decimal amount in whole tokens, e.g. 1.5
        #[arg(long)]
        amount: String,
        /// Receiving organisation address
        #[arg(long)]
        to: Address,
        #[arg(long)]
        org_name: String,
        #[arg(long)]
        org_email: String,
        #[arg(long)]
        payer_email: String,
        #[arg(long)]
        memo: Option<String>,
        #[arg(long)]
        additional_info: Option<String>,
    },
    /// Pay every request in a JSON array
    Batch {
        #[arg(short, long)]
        file: PathBuf,

        /// Send all payments concurrently on separate nonce keys
        #[arg(long)]
        parallel: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = resolve_config(cli.config.as_deref())?;
    let level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.observability.log_level);
    init_logging(level);

    tracing::info!("payhash v0.1.0 starting");

    match cli.command {
        Commands::Verify => {
            let mailer = SmtpMailer::new(&config.smtp)?;
            let ok = mailer.verify().await?;
            print_json(&serde_json::json!({ "verified": ok }))?;
        }
        Commands::Pay {
            token,
            amount,
            to,
            org_name,
            org_email,
            payer_email,
            memo,
            additional_info,
        } => {
            let request = TransferRequest {
                token,
                amount,
                memo,
                beneficiary: to,
                org_name,
                org_email,
                payer_email,
                additional_info,
            };
            let orchestrator = build_orchestrator(&config).await?;
            print_json(&orchestrator.pay(&request).await)?;
        }
        Commands::Batch { file, parallel } => {
            let requests: Vec<TransferRequest> = read_json(&file)?;
            let orchestrator = build_orchestrator(&config).await?;
            if parallel {
                print_json(&orchestrator.batch_pay_async(&requests).await?)?;
            } else {
                print_json(&orchestrator.batch_pay(&requests).await)?;
            }
        }
    }

    Ok(())
}

/// An explicit path must exist; only the default file may be missing.
fn resolve_config(path: Option<&Path>) -> Result<PayHashConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                load_config(default_path)
            } else {
                Ok(PayHashConfig::default())
            }
        }
    }
}

async fn build_orchestrator(
    config: &PayHashConfig,
) -> Result<PaymentOrchestrator, Box<dyn std::error::Error>> {
    let wallet = Wallet::from_env()?;
    let chain = AlloyChainClient::new(config.blockchain.clone(), wallet).await?;

    let orchestrator =
        PaymentOrchestrator::new(Arc::new(chain), &config.smtp, config.presentation.clone())?
            .with_expected_chain_id(config.blockchain.chain_id);
    Ok(orchestrator)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
