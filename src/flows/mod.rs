//! The two query flows.
//!
//! Both are linear: settings are validated, the node is queried and the
//! resulting log entries are handed back for rendering. Any failure ends the
//! flow with an [`InspectorError`](crate::error::InspectorError).
//!
//! - [`log_query`]: node-side filtering by contract, topic and block range
//! - [`receipt_query`]: one transaction's receipt, filtered locally on topic-0
//!
//! The two flows deliberately filter differently. The log flow pushes a topic
//! filter to the node, while the receipt flow compares the hex string of each
//! log's topic-0 against the configured signature as given.

pub mod log_query;
pub mod receipt_query;

pub use log_query::{run_log_query, LogQuery};
pub use receipt_query::{run_receipt_query, ReceiptMatches, ReceiptQuery};
