//! Receipt query flow: inspect the logs of one transaction in a block.
//!
//! The transaction is picked by its ordinal position in the block, by default
//! [`DEFAULT_TX_INDEX`] in the latest block. Its receipt logs are kept only if
//! the hex string of topic-0 equals the configured event signature exactly, so
//! an empty signature matches nothing.

use crate::config::{Config, Flow};
use crate::error::{InspectorError, InspectorResult};
use crate::events::LogEntry;
use crate::rpc::{BlockSummary, ChainClient};
use alloy::primitives::B256;
use tracing::{debug, info, instrument};

/// Default ordinal position of the inspected transaction.
pub const DEFAULT_TX_INDEX: usize = 10;

/// Parameters of a receipt query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptQuery {
    /// Comparison string for topic-0, as configured
    pub event_signature: String,

    /// Position of the transaction within the block
    pub tx_index: usize,

    /// Block to inspect; the latest block when `None`
    pub block: Option<u64>,
}

impl ReceiptQuery {
    /// Build a query from loaded settings.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the RPC URL or API key is missing.
    pub fn from_config(
        config: &Config,
        tx_index: usize,
        block: Option<u64>,
    ) -> InspectorResult<Self> {
        config.require(Flow::ReceiptQuery)?;

        Ok(Self {
            event_signature: config.event_signature().to_string(),
            tx_index,
            block,
        })
    }
}

/// Outcome of a receipt query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptMatches {
    /// Block the transaction was taken from
    pub block: u64,

    /// Inspected transaction
    pub transaction_hash: B256,

    /// Number of logs in the receipt before filtering
    pub total_logs: usize,

    /// Logs whose topic-0 matched, in receipt order
    pub matches: Vec<LogEntry>,
}

/// Pick the transaction at `index` in `block`.
///
/// # Errors
///
/// Returns an index error if the block holds `index` transactions or fewer.
pub fn select_transaction(block: &BlockSummary, index: usize) -> InspectorResult<B256> {
    block
        .transactions
        .get(index)
        .copied()
        .ok_or_else(|| InspectorError::index(index, block.transactions.len(), block.number))
}

/// Whether the hex string of `entry`'s topic-0 equals `signature`.
///
/// Topics are compared in their `0x`-prefixed lowercase form. Logs without
/// topics never match.
#[must_use]
pub fn matches_signature(entry: &LogEntry, signature: &str) -> bool {
    entry
        .topic0()
        .is_some_and(|topic| format!("{topic}") == signature)
}

/// Run a receipt query against `client`.
///
/// # Errors
///
/// Returns an error if any remote call fails, or an index error if the
/// block is too short. No receipt is requested in that case.
#[instrument(skip(client, query), fields(tx_index = query.tx_index))]
pub async fn run_receipt_query<C>(client: &C, query: &ReceiptQuery) -> InspectorResult<ReceiptMatches>
where
    C: ChainClient + ?Sized,
{
    let block_number = match query.block {
        Some(number) => number,
        None => client.latest_block_number().await?,
    };

    let block = client.block_by_number(block_number).await?;
    let tx_hash = select_transaction(&block, query.tx_index)?;
    debug!(block = block.number, %tx_hash, "Selected transaction");

    let receipt = client.transaction_receipt(tx_hash).await?;
    let total_logs = receipt.logs.len();

    let matches: Vec<LogEntry> = receipt
        .logs
        .into_iter()
        .filter(|entry| matches_signature(entry, &query.event_signature))
        .collect();

    info!(
        block = block.number,
        total_logs,
        matched = matches.len(),
        "Receipt query complete"
    );

    Ok(ReceiptMatches {
        block: block.number,
        transaction_hash: receipt.transaction_hash,
        total_logs,
        matches,
    })
}
