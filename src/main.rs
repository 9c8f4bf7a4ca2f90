//! CLI entry point for the log inspector.
//!
//! ```text
//! main.rs (runtime + tracing)
//!     ↓
//! CLI Layer (src/cli.rs)
//!     ↓
//! 1. Config Layer (src/config.rs)   → Load and validate environment variables
//! 2. RPC Layer (src/rpc/)           → Connect to the node
//! 3. Flow Layer (src/flows/)        → Log query or receipt query
//! 4. Render Layer (src/render.rs)   → Print matching logs
//! ```
//!
//! This is the only place a run is terminated: every error bubbles up here as
//! an `InspectorResult` and ends the process with exit code 1.

use eth_log_inspector::{cli, observability};
use tracing::error;

#[tokio::main]
async fn main() {
    // - RUST_LOG: Set log level (e.g., "debug", "info", "trace")
    // - LOG_JSON: Enable JSON output ("true" or "false")
    // - LOG_FILE: Also write logs to a daily-rotated file
    let log_file = std::env::var("LOG_FILE").ok().map(std::path::PathBuf::from);
    let json_output = std::env::var("LOG_JSON")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false);

    let log_guard = match observability::init_tracing(None, log_file, json_output) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize tracing: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = cli::run().await {
        error!(error = %e, "Run failed");
        eprintln!("Error: {e}");
        drop(log_guard);
        std::process::exit(1);
    }
}
