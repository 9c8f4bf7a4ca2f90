//! In-memory Ethereum node for exercising the query flows without a network.

#![allow(dead_code)]

use alloy::primitives::B256;
use async_trait::async_trait;
use eth_log_inspector::{
    error::{InspectorError, InspectorResult},
    events::{LogEntry, LogFilter},
    rpc::{BlockSummary, ChainClient, ReceiptSummary},
};
use std::collections::HashMap;
use std::sync::Mutex;

/// A canned node. `filter_logs` returns every stored log without applying the
/// filter, like a node that ignores part of the query.
#[derive(Default)]
pub struct MockNode {
    pub logs: Vec<LogEntry>,
    pub head: u64,
    pub blocks: HashMap<u64, BlockSummary>,
    pub receipts: HashMap<B256, ReceiptSummary>,
    pub unavailable: bool,
    calls: Mutex<Vec<String>>,
}

impl MockNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logs(mut self, logs: Vec<LogEntry>) -> Self {
        self.logs = logs;
        self
    }

    pub fn with_block(mut self, block: BlockSummary) -> Self {
        self.head = self.head.max(block.number);
        self.blocks.insert(block.number, block);
        self
    }

    pub fn with_receipt(mut self, receipt: ReceiptSummary) -> Self {
        self.receipts.insert(receipt.transaction_hash, receipt);
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// RPC method names in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, method: &str) -> InspectorResult<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(method.to_string());
        }
        if self.unavailable {
            return Err(InspectorError::rpc(format!("{method} failed: node unavailable"), None));
        }
        Ok(())
    }
}

#[async_trait]
impl ChainClient for MockNode {
    async fn filter_logs(&self, _filter: &LogFilter) -> InspectorResult<Vec<LogEntry>> {
        self.record("eth_getLogs")?;
        Ok(self.logs.clone())
    }

    async fn latest_block_number(&self) -> InspectorResult<u64> {
        self.record("eth_blockNumber")?;
        Ok(self.head)
    }

    async fn block_by_number(&self, number: u64) -> InspectorResult<BlockSummary> {
        self.record("eth_getBlockByNumber")?;
        self.blocks
            .get(&number)
            .cloned()
            .ok_or_else(|| InspectorError::rpc(format!("Block {number} not found"), None))
    }

    async fn transaction_receipt(&self, hash: B256) -> InspectorResult<ReceiptSummary> {
        self.record("eth_getTransactionReceipt")?;
        self.receipts.get(&hash).cloned().ok_or_else(|| {
            InspectorError::rpc(format!("Receipt for transaction {hash} not found"), None)
        })
    }
}
