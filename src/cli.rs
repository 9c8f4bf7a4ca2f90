//! Command-line interface for the log inspector.
//!
//! # Commands
//!
//! - `logs`: Fetch a contract's event logs over an inclusive block range
//! - `receipt`: Inspect the logs of one transaction's receipt
//!
//! # Example
//!
//! ```bash
//! # Default block range 22341322..=22341324
//! eth-log-inspector logs
//!
//! # Transaction #3 of block 22341322
//! eth-log-inspector receipt --tx-index 3 --block 22341322
//! ```

use crate::config::Config;
use crate::error::InspectorResult;
use crate::flows::log_query::{DEFAULT_FROM_BLOCK, DEFAULT_TO_BLOCK};
use crate::flows::receipt_query::DEFAULT_TX_INDEX;
use crate::flows::{run_log_query, run_receipt_query, LogQuery, ReceiptQuery};
use crate::render::print_logs;
use crate::rpc::connect;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

/// Ethereum event log inspector
#[derive(Parser, Debug)]
#[command(name = "eth-log-inspector")]
#[command(about = "Inspect Ethereum event logs and transaction receipts", long_about = None)]
#[command(version)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch CONTRACT_ADDRESS logs matching EVENT_SIGNATURE over a block range
    Logs {
        /// First block of the range (inclusive)
        #[arg(short, long, default_value_t = DEFAULT_FROM_BLOCK)]
        from_block: u64,

        /// Last block of the range (inclusive)
        #[arg(short, long, default_value_t = DEFAULT_TO_BLOCK)]
        to_block: u64,
    },

    /// Print the logs of one transaction whose topic-0 equals EVENT_SIGNATURE
    Receipt {
        /// Position of the transaction within the block
        #[arg(short = 'i', long, default_value_t = DEFAULT_TX_INDEX)]
        tx_index: usize,

        /// Block to inspect (default: latest)
        #[arg(short, long)]
        block: Option<u64>,
    },
}

/// Parse CLI arguments and execute the appropriate command.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration loading or validation fails
/// - The RPC endpoint cannot be reached
/// - Any query call fails
pub async fn run() -> InspectorResult<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Logs {
            from_block,
            to_block,
        } => run_logs_command(&config, from_block, to_block).await,
        Commands::Receipt { tx_index, block } => {
            run_receipt_command(&config, tx_index, block).await
        }
    }
}

/// Execute the logs command.
async fn run_logs_command(
    config: &Config,
    from_block: u64,
    to_block: u64,
) -> InspectorResult<()> {
    // Settings are checked before any connection attempt.
    let query = LogQuery::from_config(config, from_block, to_block)?;
    info!(
        contract = %query.contract,
        topic = %query.topic,
        from_block,
        to_block,
        "Querying logs"
    );

    let client = connect(&config.endpoint(), config.rpc_timeout()).await?;
    let logs = run_log_query(&client, &query).await?;

    print_logs(&logs);
    print_summary(
        logs.len(),
        &format!("blocks {from_block}..={to_block}"),
    );

    Ok(())
}

/// Execute the receipt command.
async fn run_receipt_command(
    config: &Config,
    tx_index: usize,
    block: Option<u64>,
) -> InspectorResult<()> {
    let query = ReceiptQuery::from_config(config, tx_index, block)?;
    if query.event_signature.trim().is_empty() {
        info!("EVENT_SIGNATURE is empty, no receipt logs will match");
    }

    let client = connect(&config.endpoint(), config.rpc_timeout()).await?;
    let result = run_receipt_query(&client, &query).await?;

    print_logs(&result.matches);
    print_summary(
        result.matches.len(),
        &format!(
            "receipt of {} (block {}, {} logs total)",
            result.transaction_hash, result.block, result.total_logs
        ),
    );

    Ok(())
}

/// Print the closing line of a run.
fn print_summary(matched: usize, scope: &str) {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");

    if matched == 0 {
        println!(
            "{} {} {}",
            "🔍".yellow(),
            timestamp.to_string().dimmed(),
            format!("No matching logs in {scope}").yellow().bold()
        );
    } else {
        println!(
            "{} {} {} matching log(s) in {}",
            "✅".green(),
            timestamp.to_string().dimmed(),
            matched.to_string().green().bold(),
            scope.cyan()
        );
    }
}
