use anyhow::Context;
use clap::{Parser, Subcommand};
use log::{debug, info, LevelFilter};
use pondo_core::{
    accounting::{mint::size_deposit, rates::compute_rates},
    base::amount::Amount,
    config::ProtocolConfig,
    constants::VERSION,
    ledger::snapshot::LedgerSnapshot,
    oracle::{
        message::{OpType, RequestDigest},
        signature::Keyholder,
        OracleRequest, TimeOracle,
    },
};
use std::path::{Path, PathBuf};
use stderrlog::{ColorChoice, Timestamp};

#[derive(Parser, Debug)]
#[command(name = "pondo", author, version = VERSION, about, long_about = Some("Pondo\n\n\
Price deposits and check oracle requests against protocol state"))]
struct Cli {
    #[command(subcommand)]
    command: PondoCommand,

    /// Path to the protocol config (JSON)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Max stderr log level
    #[arg(long, default_value_t = LevelFilter::Warn, global = true)]
    log_level: LevelFilter,
}

#[derive(Subcommand, Debug)]
enum PondoCommand {
    /// Exchange rate of a ledger snapshot
    Rates {
        /// Path to the ledger snapshot (JSON)
        #[arg(long, value_name = "FILE")]
        snapshot: PathBuf,
    },
    /// Receipt tokens a deposit mints
    QuoteDeposit {
        /// Path to the ledger snapshot (JSON)
        #[arg(long, value_name = "FILE")]
        snapshot: PathBuf,

        /// Deposit in credits, e.g. 1.5
        #[arg(long)]
        amount: Amount,

        /// Output JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Digest committee members sign for a timestamp update
    RequestHash {
        #[arg(long)]
        value: u64,

        #[arg(long)]
        request_id: u64,
    },
    /// Sign a timestamp update with a hex-encoded seed
    SignRequest {
        #[arg(long)]
        value: u64,

        #[arg(long)]
        request_id: u64,

        /// Path to a file holding the 32-byte signing seed (hex)
        #[arg(long, value_name = "FILE")]
        seed_file: PathBuf,
    },
    /// Check a signed timestamp update against the configured committee
    VerifyRequest {
        /// Path to the oracle request (JSON)
        #[arg(long, value_name = "FILE")]
        request: PathBuf,
    },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ProtocolConfig> {
    match path {
        Some(path) => ProtocolConfig::from_path(path),
        None => Ok(ProtocolConfig::default()),
    }
}

pub fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    stderrlog::new()
        .module(module_path!())
        .module("pondo_core")
        .color(ColorChoice::Never)
        .timestamp(Timestamp::Microsecond)
        .verbosity(cli.log_level)
        .init()?;

    let config = load_config(cli.config.as_deref())?;
    debug!("Using config {config:?}");

    match cli.command {
        PondoCommand::Rates { snapshot } => {
            let snapshot = LedgerSnapshot::from_path(&snapshot)?;
            let rates = compute_rates(&snapshot.state, &snapshot.delegators)?;
            let settled = rates.settle_commission()?;

            println!("rate: {rates}");
            println!(
                "earned rewards: {}, commission: {}",
                Amount(rates.accrual.earned_rewards),
                Amount(rates.accrual.earned_commission)
            );
            println!("settled rate: {}", settled.rate);
        }
        PondoCommand::QuoteDeposit {
            snapshot,
            amount,
            json,
        } => {
            let snapshot = LedgerSnapshot::from_path(&snapshot)?;
            let quote = size_deposit(&snapshot, amount.0)
                .with_context(|| format!("pricing deposit of {amount}"))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&quote)?);
            } else {
                println!("deposit: {amount}");
                println!("expected mint: {}", quote.expected_mint);
                println!("min receipt out: {}", quote.min_receipt_out());
                println!("rate: {}", quote.rate);
            }
        }
        PondoCommand::RequestHash { value, request_id } => {
            println!(
                "{}",
                RequestDigest::new(OpType::UpdateTimestamp, value, request_id)
            );
        }
        PondoCommand::SignRequest {
            value,
            request_id,
            seed_file,
        } => {
            let seed = std::fs::read_to_string(&seed_file)
                .with_context(|| format!("reading seed {}", seed_file.display()))?;
            let keyholder = Keyholder::from_hex(&seed)?;
            let digest = RequestDigest::new(OpType::UpdateTimestamp, value, request_id);

            info!("Signing request {request_id} as {}", keyholder.address());
            println!(
                "{}",
                serde_json::json!({
                    "signature": keyholder.sign(&digest),
                    "signer": keyholder.address(),
                })
            );
        }
        PondoCommand::VerifyRequest { request } => {
            let contents = std::fs::read(&request)
                .with_context(|| format!("reading request {}", request.display()))?;
            let request: OracleRequest = serde_json::from_slice(&contents)
                .with_context(|| format!("parsing request {}", request.display()))?;

            let oracle =
                TimeOracle::genesis(config.oracle.committee()?, config.oracle.genesis_timestamp);
            let tally = oracle.verify(&request)?;

            println!(
                "request {} authorized by {} of {} committee members",
                request.request_id,
                tally.count(),
                oracle.committee().len()
            );
        }
    }

    Ok(())
}
