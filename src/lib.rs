//! # Ethereum Event Log Inspector
//!
//! Fetch and print Ethereum event logs over JSON-RPC using
//! [Alloy](https://github.com/alloy-rs/alloy).
//!
//! Two read-only inspections are provided:
//!
//! - **Log query**: logs of one contract matching one event topic over an
//!   inclusive block range, filtered by the node
//! - **Receipt query**: logs of the transaction at a given position in a block,
//!   kept when their topic-0 equals the configured event signature
//!
//! ## Architecture
//!
//! 1. **Config Layer** ([`config`]) - Environment variable loading and per-flow validation
//! 2. **RPC Layer** ([`rpc`]) - The [`rpc::ChainClient`] seam and its Alloy HTTP implementation
//! 3. **Events Layer** ([`events`]) - Log entries and log filters
//! 4. **Flow Layer** ([`flows`]) - The two query flows
//! 5. **Render Layer** ([`render`]) - Console formatting
//!
//! ## Using as a Library
//!
//! ```rust,no_run
//! use eth_log_inspector::config::Config;
//! use eth_log_inspector::flows::{run_log_query, LogQuery};
//! use eth_log_inspector::render::print_logs;
//! use eth_log_inspector::rpc::connect;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let query = LogQuery::from_config(&config, 22_341_322, 22_341_324)?;
//!
//!     let client = connect(&config.endpoint(), config.rpc_timeout()).await?;
//!     let logs = run_log_query(&client, &query).await?;
//!     print_logs(&logs);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Setup
//!
//! ```text
//! ETHEREUM_RPC_URL=https://eth-mainnet.g.alchemy.com/v2/
//! ETHEREUM_API_KEY=your_key_here
//! CONTRACT_ADDRESS=0xdAC17F958D2ee523a2206206994597C13D831ec7
//! EVENT_SIGNATURE=0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`error::InspectorResult<T>`](error::InspectorResult).

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod flows;
pub mod observability;
pub mod render;
pub mod rpc;
