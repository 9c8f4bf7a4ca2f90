//! Console rendering of log entries.
//!
//! Each log renders as:
//!
//! ```text
//! 📦 Log address: 0xdAC17F958D2ee523a2206206994597C13D831ec7
//! 📝 topics:
//!   - topic[0]: 0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef
//! 📨 data: 00000000000000000000000000000000000000000000000000000000000f4240
//! ```
//!
//! The address is EIP-55 checksummed, topics are `0x`-prefixed lowercase hex
//! and the data payload is lowercase hex without a prefix.

use crate::events::LogEntry;
use alloy::primitives::hex;
use std::fmt::Write;

/// Render one log entry as console text, one line per field or topic.
#[must_use]
pub fn render_log(entry: &LogEntry) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "📦 Log address: {}", entry.address);
    let _ = writeln!(out, "📝 topics:");
    for (index, topic) in entry.topics.iter().enumerate() {
        let _ = writeln!(out, "  - topic[{index}]: {topic}");
    }
    let _ = writeln!(out, "📨 data: {}", hex::encode(&entry.data));

    out
}

/// Render a sequence of log entries in order.
#[must_use]
pub fn render_logs(entries: &[LogEntry]) -> String {
    entries.iter().map(render_log).collect()
}

/// Print log entries to stdout in order.
pub fn print_logs(entries: &[LogEntry]) {
    print!("{}", render_logs(entries));
}
