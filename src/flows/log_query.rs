//! Log query flow: fetch one contract's logs for one event over a block range.

use crate::config::{Config, Flow};
use crate::error::InspectorResult;
use crate::events::{LogEntry, LogFilter};
use crate::rpc::ChainClient;
use alloy::primitives::{Address, B256};
use tracing::{info, instrument, warn};

/// First block of the default query range.
pub const DEFAULT_FROM_BLOCK: u64 = 22_341_322;

/// Last block of the default query range (inclusive).
pub const DEFAULT_TO_BLOCK: u64 = 22_341_324;

/// Parameters of a log query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    /// Contract whose logs are requested
    pub contract: Address,

    /// Topic-0 hash of the event
    pub topic: B256,

    /// First block (inclusive)
    pub from_block: u64,

    /// Last block (inclusive)
    pub to_block: u64,
}

impl LogQuery {
    /// Build a query from loaded settings and an explicit block range.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a required setting is missing or
    /// malformed, or if the range is inverted.
    pub fn from_config(config: &Config, from_block: u64, to_block: u64) -> InspectorResult<Self> {
        config.require(Flow::LogQuery)?;

        let query = Self {
            contract: config.contract_address()?,
            topic: config.event_topic()?,
            from_block,
            to_block,
        };
        query.filter().validate()?;

        Ok(query)
    }

    /// The node-side filter for this query.
    #[must_use]
    pub fn filter(&self) -> LogFilter {
        LogFilter::for_event(self.contract, self.topic, self.from_block, self.to_block)
    }
}

/// Run a log query against `client`.
///
/// Entries returned by the node that do not satisfy the filter are dropped.
///
/// # Errors
///
/// Returns an error if the filter is invalid or the `eth_getLogs` call fails.
#[instrument(skip(client, query), fields(contract = %query.contract, from_block = query.from_block, to_block = query.to_block))]
pub async fn run_log_query<C>(client: &C, query: &LogQuery) -> InspectorResult<Vec<LogEntry>>
where
    C: ChainClient + ?Sized,
{
    let filter = query.filter();
    filter.validate()?;

    let fetched = client.filter_logs(&filter).await?;
    let total = fetched.len();

    let matched: Vec<LogEntry> = fetched
        .into_iter()
        .filter(|entry| filter.matches(entry))
        .collect();

    if matched.len() < total {
        warn!(
            dropped = total - matched.len(),
            "Node returned logs outside the filter"
        );
    }

    info!(count = matched.len(), "Log query complete");
    Ok(matched)
}
