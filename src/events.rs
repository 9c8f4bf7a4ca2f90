//! Event log model and log filters.
//!
//! [`LogEntry`] is the crate's view of an event log: the emitting contract,
//! its ordered topics and the opaque data payload. [`LogFilter`] describes an
//! `eth_getLogs` query (addresses, per-position topic sets, inclusive block
//! range) and converts into an Alloy [`Filter`] for the node. The same filter
//! can be evaluated locally with [`LogFilter::matches`].
//!
//! ## Example
//!
//! ```
//! use eth_log_inspector::events::LogFilter;
//! use alloy::primitives::{address, b256};
//!
//! let filter = LogFilter::for_event(
//!     address!("dAC17F958D2ee523a2206206994597C13D831ec7"),
//!     b256!("ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"),
//!     22_341_322,
//!     22_341_324,
//! );
//! assert!(filter.validate().is_ok());
//! ```

use crate::error::{InspectorError, InspectorResult};
use alloy::primitives::{Address, Bytes, B256};
use alloy::rpc::types::{Filter, Log};

/// Maximum number of indexed topic positions an Ethereum log can carry.
pub const MAX_TOPICS: usize = 4;

/// A single event log as returned by the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Emitting contract
    pub address: Address,

    /// Indexed topics, topic[0] being the event signature hash
    pub topics: Vec<B256>,

    /// Non-indexed payload
    pub data: Bytes,

    /// Block the log was included in, when the node reports it
    pub block_number: Option<u64>,
}

impl LogEntry {
    /// Create a log entry without block information.
    #[must_use]
    pub fn new(address: Address, topics: Vec<B256>, data: Bytes) -> Self {
        Self {
            address,
            topics,
            data,
            block_number: None,
        }
    }

    /// Attach the block number the log was included in.
    #[must_use]
    pub const fn with_block_number(mut self, block_number: u64) -> Self {
        self.block_number = Some(block_number);
        self
    }

    /// First topic, conventionally the event signature hash.
    #[must_use]
    pub fn topic0(&self) -> Option<&B256> {
        self.topics.first()
    }
}

impl From<&Log> for LogEntry {
    fn from(log: &Log) -> Self {
        Self {
            address: log.address(),
            topics: log.topics().to_vec(),
            data: log.data().data.clone(),
            block_number: log.block_number,
        }
    }
}

impl From<Log> for LogEntry {
    fn from(log: Log) -> Self {
        Self::from(&log)
    }
}

/// An `eth_getLogs` query.
///
/// An empty address list matches any emitter, and an empty topic set at a
/// position matches any value at that position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFilter {
    /// Emitting contracts to match
    pub addresses: Vec<Address>,

    /// Accepted hashes per topic position
    pub topics: Vec<Vec<B256>>,

    /// First block of the range (inclusive)
    pub from_block: u64,

    /// Last block of the range (inclusive)
    pub to_block: u64,
}

impl LogFilter {
    /// Filter for one event emitted by one contract over an inclusive block range.
    #[must_use]
    pub fn for_event(address: Address, topic0: B256, from_block: u64, to_block: u64) -> Self {
        Self {
            addresses: vec![address],
            topics: vec![vec![topic0]],
            from_block,
            to_block,
        }
    }

    /// Check the filter is well formed before sending it anywhere.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the block range is inverted or more
    /// than [`MAX_TOPICS`] topic positions are given.
    pub fn validate(&self) -> InspectorResult<()> {
        if self.from_block > self.to_block {
            return Err(InspectorError::config(
                format!(
                    "Invalid block range: from_block {} is after to_block {}",
                    self.from_block, self.to_block
                ),
                None,
            ));
        }

        if self.topics.len() > MAX_TOPICS {
            return Err(InspectorError::config(
                format!(
                    "A log filter supports at most {MAX_TOPICS} topic positions, got {}",
                    self.topics.len()
                ),
                None,
            ));
        }

        Ok(())
    }

    /// Whether `entry` satisfies this filter.
    ///
    /// The block range is only checked when the entry carries a block number.
    #[must_use]
    pub fn matches(&self, entry: &LogEntry) -> bool {
        if !self.addresses.is_empty() && !self.addresses.contains(&entry.address) {
            return false;
        }

        if let Some(block) = entry.block_number {
            if block < self.from_block || block > self.to_block {
                return false;
            }
        }

        self.topics.iter().enumerate().all(|(position, accepted)| {
            accepted.is_empty()
                || entry
                    .topics
                    .get(position)
                    .is_some_and(|topic| accepted.contains(topic))
        })
    }

    /// Build the Alloy filter sent to the node.
    #[must_use]
    pub fn to_alloy(&self) -> Filter {
        let mut filter = Filter::new()
            .from_block(self.from_block)
            .to_block(self.to_block);

        if !self.addresses.is_empty() {
            filter = filter.address(self.addresses.clone());
        }

        for (position, accepted) in self.topics.iter().enumerate().take(MAX_TOPICS) {
            if accepted.is_empty() {
                continue;
            }
            let accepted = accepted.clone();
            filter = match position {
                0 => filter.event_signature(accepted),
                1 => filter.topic1(accepted),
                2 => filter.topic2(accepted),
                _ => filter.topic3(accepted),
            };
        }

        filter
    }
}
