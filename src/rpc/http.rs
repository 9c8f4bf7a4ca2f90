//! HTTP chain client backed by an Alloy provider.
//!
//! ## Example
//!
//! ```no_run
//! use eth_log_inspector::rpc::{connect, ChainClient};
//! use eth_log_inspector::error::InspectorResult;
//! use std::time::Duration;
//!
//! # async fn example() -> InspectorResult<()> {
//! let client = connect("https://eth-mainnet.g.alchemy.com/v2/API_KEY", Duration::from_secs(30)).await?;
//! let latest = client.latest_block_number().await?;
//! println!("Latest block: {latest}");
//! # Ok(())
//! # }
//! ```

use super::{BlockSummary, ChainClient, ReceiptSummary};
use crate::error::{InspectorError, InspectorResult};
use crate::events::{LogEntry, LogFilter};
use alloy::primitives::B256;
use alloy::providers::{Provider as AlloyProvider, ProviderBuilder, RootProvider};
use alloy::rpc::types::BlockTransactionsKind;
use alloy::transports::http::{Client, Http};
use async_trait::async_trait;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Type alias for the HTTP provider.
pub type Provider = RootProvider<Http<Client>>;

/// Chain client speaking JSON-RPC over HTTP.
///
/// Every call is bounded by the deadline given to [`connect`]. The underlying
/// HTTP client is released when this value is dropped.
pub struct HttpChainClient {
    provider: Provider,
    timeout: Duration,
    host: String,
}

/// Host part of an endpoint URL, safe to log.
///
/// Endpoints carry the API key in their path, query or userinfo, so only the
/// host and port are kept.
#[must_use]
pub fn endpoint_host(endpoint: &str) -> &str {
    let without_scheme = endpoint
        .split_once("://")
        .map_or(endpoint, |(_, rest)| rest);
    let authority = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let host = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);

    if host.is_empty() {
        "unknown"
    } else {
        host
    }
}

/// Connect to the node at `endpoint`.
///
/// The provider is built and then probed with `eth_chainId` so that an
/// unreachable endpoint fails here rather than on the first query.
///
/// # Errors
///
/// Returns a connection error if:
/// - The endpoint is not a valid URL
/// - The probe fails or does not answer within `timeout`
#[instrument(skip(endpoint), fields(rpc_host = tracing::field::Empty))]
pub async fn connect(endpoint: &str, timeout: Duration) -> InspectorResult<HttpChainClient> {
    let host = endpoint_host(endpoint).to_string();
    tracing::Span::current().record("rpc_host", host.as_str());
    info!("Connecting to RPC endpoint");

    let url = endpoint.parse().map_err(|e| {
        InspectorError::connection(
            format!("Invalid RPC endpoint for host '{host}': expected an http(s) URL"),
            Some(Box::new(e)),
        )
    })?;

    let provider = ProviderBuilder::new().on_http(url);

    let start = Instant::now();
    let chain_id = match tokio::time::timeout(timeout, async { provider.get_chain_id().await })
        .await
    {
        Ok(Ok(chain_id)) => chain_id,
        Ok(Err(e)) => {
            warn!(error = %e, "Connection probe failed");
            return Err(InspectorError::connection(
                format!("Failed to reach RPC endpoint at {host}: {e}"),
                Some(Box::new(e)),
            ));
        }
        Err(_) => {
            warn!(timeout_secs = timeout.as_secs(), "Connection probe timed out");
            return Err(InspectorError::connection(
                format!(
                    "RPC endpoint at {host} did not answer within {}s",
                    timeout.as_secs()
                ),
                None,
            ));
        }
    };

    info!(
        chain_id,
        duration_ms = start.elapsed().as_millis(),
        "Connected to RPC endpoint"
    );

    Ok(HttpChainClient {
        provider,
        timeout,
        host,
    })
}

impl HttpChainClient {
    /// Host of the connected endpoint.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Run one remote call under the configured deadline.
    async fn call<T, E, F>(&self, method: &str, call: F) -> InspectorResult<T>
    where
        F: Future<Output = Result<T, E>> + Send,
        E: std::error::Error + Send + Sync + 'static,
    {
        let start = Instant::now();
        let outcome = tokio::time::timeout(self.timeout, call).await;
        debug!(
            method,
            duration_ms = start.elapsed().as_millis(),
            "RPC call finished"
        );

        match outcome {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(InspectorError::rpc(
                format!("{method} failed: {e}"),
                Some(Box::new(e)),
            )),
            Err(_) => Err(InspectorError::rpc(
                format!(
                    "{method} did not answer within {}s",
                    self.timeout.as_secs()
                ),
                None,
            )),
        }
    }
}

#[async_trait]
impl ChainClient for HttpChainClient {
    #[instrument(skip(self, filter), fields(from_block = filter.from_block, to_block = filter.to_block))]
    async fn filter_logs(&self, filter: &LogFilter) -> InspectorResult<Vec<LogEntry>> {
        let alloy_filter = filter.to_alloy();
        let logs = self
            .call("eth_getLogs", async {
                self.provider.get_logs(&alloy_filter).await
            })
            .await?;

        debug!(count = logs.len(), "Fetched logs");
        Ok(logs.iter().map(LogEntry::from).collect())
    }

    #[instrument(skip(self))]
    async fn latest_block_number(&self) -> InspectorResult<u64> {
        let number = self
            .call("eth_blockNumber", async {
                self.provider.get_block_number().await
            })
            .await?;

        info!(block = number, "Latest block fetched");
        Ok(number)
    }

    #[instrument(skip(self))]
    async fn block_by_number(&self, number: u64) -> InspectorResult<BlockSummary> {
        let block = self
            .call("eth_getBlockByNumber", async {
                self.provider
                    .get_block_by_number(number.into(), BlockTransactionsKind::Hashes)
                    .await
            })
            .await?
            .ok_or_else(|| InspectorError::rpc(format!("Block {number} not found"), None))?;

        let summary = BlockSummary::from(&block);
        debug!(
            block = summary.number,
            transactions = summary.transactions.len(),
            "Block fetched"
        );
        Ok(summary)
    }

    #[instrument(skip(self))]
    async fn transaction_receipt(&self, hash: B256) -> InspectorResult<ReceiptSummary> {
        let receipt = self
            .call("eth_getTransactionReceipt", async {
                self.provider.get_transaction_receipt(hash).await
            })
            .await?
            .ok_or_else(|| {
                InspectorError::rpc(format!("Receipt for transaction {hash} not found"), None)
            })?;

        let summary = ReceiptSummary::from(&receipt);
        debug!(logs = summary.logs.len(), "Receipt fetched");
        Ok(summary)
    }
}

impl Drop for HttpChainClient {
    fn drop(&mut self) {
        debug!(rpc_host = %self.host, "Closing RPC connection");
    }
}
