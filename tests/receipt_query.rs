//! Receipt query flow against an in-memory node.

mod common;

use alloy::primitives::{address, b256, bytes, Address, Bytes, B256};
use common::MockNode;
use eth_log_inspector::{
    config::Config,
    error::InspectorError,
    events::LogEntry,
    flows::{run_receipt_query, ReceiptQuery},
    render::render_logs,
    rpc::{BlockSummary, ReceiptSummary},
};
use std::collections::HashMap;

const TOKEN: Address = address!("dAC17F958D2ee523a2206206994597C13D831ec7");
const TRANSFER: B256 = b256!("ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef");
const APPROVAL: B256 = b256!("8c5be1e5ebec7d5bd14f71427d1e84f3dd0314c0f7b2291e5b200ac8c7c3b925");
const TRANSFER_HEX: &str = "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef";

fn tx_hash(i: u8) -> B256 {
    B256::repeat_byte(i + 1)
}

fn block(number: u64, tx_count: u8) -> BlockSummary {
    BlockSummary::new(number, (0..tx_count).map(tx_hash).collect())
}

fn query(signature: &str) -> ReceiptQuery {
    ReceiptQuery {
        event_signature: signature.to_string(),
        tx_index: 10,
        block: None,
    }
}

fn receipt_for_tx10() -> ReceiptSummary {
    ReceiptSummary {
        transaction_hash: tx_hash(10),
        logs: vec![
            LogEntry::new(TOKEN, vec![TRANSFER], bytes!("aa")),
            LogEntry::new(TOKEN, vec![APPROVAL], bytes!("bb")),
            LogEntry::new(TOKEN, vec![], bytes!("cc")),
            LogEntry::new(TOKEN, vec![TRANSFER, B256::ZERO], bytes!("dd")),
        ],
    }
}

#[tokio::test]
async fn test_renders_matching_logs_in_receipt_order() {
    let node = MockNode::new()
        .with_block(block(500, 12))
        .with_receipt(receipt_for_tx10());

    let result = run_receipt_query(&node, &query(TRANSFER_HEX)).await.unwrap();

    assert_eq!(result.block, 500);
    assert_eq!(result.transaction_hash, tx_hash(10));
    assert_eq!(result.total_logs, 4);
    let data: Vec<Bytes> = result.matches.iter().map(|l| l.data.clone()).collect();
    assert_eq!(data, vec![bytes!("aa"), bytes!("dd")]);

    let rendered = render_logs(&result.matches);
    assert!(rendered.find("📨 data: aa") < rendered.find("📨 data: dd"));
    assert!(rendered.contains("  - topic[1]: 0x0000000000000000000000000000000000000000000000000000000000000000"));

    assert_eq!(
        node.calls(),
        vec![
            "eth_blockNumber",
            "eth_getBlockByNumber",
            "eth_getTransactionReceipt"
        ]
    );
}

#[tokio::test]
async fn test_empty_signature_yields_no_matches() {
    let node = MockNode::new()
        .with_block(block(500, 11))
        .with_receipt(receipt_for_tx10());

    let result = run_receipt_query(&node, &query("")).await.unwrap();

    assert!(result.matches.is_empty());
    assert_eq!(result.total_logs, 4);
}

#[tokio::test]
async fn test_padded_signature_is_compared_verbatim() {
    let padded = format!(" {TRANSFER_HEX}\n");
    let vars: HashMap<&str, String> = [
        ("ETHEREUM_RPC_URL", "http://localhost:8545/".to_string()),
        ("ETHEREUM_API_KEY", "k".to_string()),
        ("EVENT_SIGNATURE", padded.clone()),
    ]
    .into_iter()
    .collect();
    let config = Config::from_lookup(|name| vars.get(name).cloned()).unwrap();
    let query = ReceiptQuery::from_config(&config, 10, None).unwrap();
    assert_eq!(query.event_signature, padded);

    let node = MockNode::new()
        .with_block(block(500, 11))
        .with_receipt(receipt_for_tx10());

    let result = run_receipt_query(&node, &query).await.unwrap();

    assert!(result.matches.is_empty());
    assert_eq!(result.total_logs, 4);
}

#[tokio::test]
async fn test_short_block_is_an_index_error() {
    let node = MockNode::new()
        .with_block(block(500, 10))
        .with_receipt(receipt_for_tx10());

    let result = run_receipt_query(&node, &query(TRANSFER_HEX)).await;

    assert!(matches!(
        result,
        Err(InspectorError::IndexError {
            index: 10,
            len: 10,
            block: 500
        })
    ));
    assert!(!node
        .calls()
        .contains(&"eth_getTransactionReceipt".to_string()));
}

#[tokio::test]
async fn test_explicit_block_skips_head_lookup() {
    let node = MockNode::new()
        .with_block(block(400, 11))
        .with_block(block(500, 3))
        .with_receipt(receipt_for_tx10());

    let mut explicit = query(TRANSFER_HEX);
    explicit.block = Some(400);

    let result = run_receipt_query(&node, &explicit).await.unwrap();

    assert_eq!(result.block, 400);
    assert_eq!(result.matches.len(), 2);
    assert_eq!(node.calls()[0], "eth_getBlockByNumber");
}

#[tokio::test]
async fn test_missing_receipt_is_an_rpc_error() {
    let node = MockNode::new().with_block(block(500, 11));

    let result = run_receipt_query(&node, &query(TRANSFER_HEX)).await;

    assert!(matches!(result, Err(InspectorError::RpcError { .. })));
}

#[tokio::test]
async fn test_unavailable_node_stops_at_first_call() {
    let node = MockNode::new().unavailable();

    let result = run_receipt_query(&node, &query(TRANSFER_HEX)).await;

    assert!(matches!(result, Err(InspectorError::RpcError { .. })));
    assert_eq!(node.calls(), vec!["eth_blockNumber"]);
}
