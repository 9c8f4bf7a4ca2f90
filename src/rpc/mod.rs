//! Chain client adapter for Ethereum JSON-RPC.
//!
//! The query flows only ever talk to a node through the [`ChainClient`] trait,
//! which exposes the four read-only calls they need. The production
//! implementation is [`HttpChainClient`], an Alloy HTTP provider obtained from
//! [`connect`]; tests substitute an in-memory node.
//!
//! # Architecture
//!
//! ```text
//!   log query flow        receipt query flow
//!         │                      │
//!         └──────────┬───────────┘
//!                    ▼
//!             ChainClient trait
//!                    │
//!         ┌──────────┴──────────┐
//!         ▼                     ▼
//!   HttpChainClient        mock node (tests)
//!   (Alloy RootProvider)
//! ```
//!
//! Every failure comes back as an [`InspectorError`](crate::error::InspectorError);
//! nothing is retried.

pub mod http;

use crate::error::InspectorResult;
use crate::events::{LogEntry, LogFilter};
use alloy::primitives::B256;
use alloy::rpc::types::{Block, TransactionReceipt};
use async_trait::async_trait;

// Re-export commonly used types
pub use http::{connect, HttpChainClient, Provider};

/// A block reduced to what the receipt flow needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSummary {
    /// Block number
    pub number: u64,

    /// Transaction hashes in block order
    pub transactions: Vec<B256>,
}

impl BlockSummary {
    /// Create a block summary.
    #[must_use]
    pub const fn new(number: u64, transactions: Vec<B256>) -> Self {
        Self {
            number,
            transactions,
        }
    }
}

impl From<&Block> for BlockSummary {
    fn from(block: &Block) -> Self {
        Self {
            number: block.header.number,
            transactions: block.transactions.hashes().collect(),
        }
    }
}

/// A transaction receipt reduced to its logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptSummary {
    /// Transaction the receipt belongs to
    pub transaction_hash: B256,

    /// Logs in emission order
    pub logs: Vec<LogEntry>,
}

impl From<&TransactionReceipt> for ReceiptSummary {
    fn from(receipt: &TransactionReceipt) -> Self {
        Self {
            transaction_hash: receipt.transaction_hash,
            logs: receipt.inner.logs().iter().map(LogEntry::from).collect(),
        }
    }
}

/// Read-only access to an Ethereum node.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Fetch the logs matching `filter` (`eth_getLogs`).
    async fn filter_logs(&self, filter: &LogFilter) -> InspectorResult<Vec<LogEntry>>;

    /// Fetch the current head block number (`eth_blockNumber`).
    async fn latest_block_number(&self) -> InspectorResult<u64>;

    /// Fetch a block with its transaction hashes (`eth_getBlockByNumber`).
    ///
    /// A block the node does not know is an error.
    async fn block_by_number(&self, number: u64) -> InspectorResult<BlockSummary>;

    /// Fetch a transaction receipt (`eth_getTransactionReceipt`).
    ///
    /// A receipt the node does not know is an error.
    async fn transaction_receipt(&self, hash: B256) -> InspectorResult<ReceiptSummary>;
}
