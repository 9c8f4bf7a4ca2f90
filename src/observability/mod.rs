//! Structured logging setup.
//!
//! Diagnostics go to stderr through `tracing`, leaving stdout to the rendered
//! query results.
//!
//! # Environment Configuration
//!
//! ```bash
//! # Set log level for all modules
//! RUST_LOG=debug eth-log-inspector logs
//!
//! # Component-specific levels
//! RUST_LOG=eth_log_inspector=debug,alloy=warn eth-log-inspector receipt
//!
//! # Enable JSON output
//! LOG_JSON=true eth-log-inspector logs
//!
//! # Also write JSON logs to a daily-rotated file
//! LOG_FILE=./logs/inspector.log eth-log-inspector logs
//! ```

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt, EnvFilter, Layer,
};

/// Default filter: info for this crate, warn for dependencies.
pub const DEFAULT_FILTER: &str = "eth_log_inspector=info,warn";

/// Build the level filter from `RUST_LOG`, an explicit level, or the default.
fn env_filter(log_level: Option<String>) -> EnvFilter {
    if let Ok(filter) = std::env::var("RUST_LOG") {
        EnvFilter::new(filter)
    } else if let Some(level) = log_level {
        EnvFilter::new(level)
    } else {
        EnvFilter::new(DEFAULT_FILTER)
    }
}

/// Initialize the global tracing subscriber.
///
/// # Arguments
///
/// * `log_level` - Level used when `RUST_LOG` is unset (e.g. `"debug"`).
/// * `log_file` - Optional path for an additional JSON log file, rotated daily.
/// * `json_output` - JSON instead of human-readable console output.
///
/// Returns the file writer guard when file logging is enabled. Keep it alive
/// for the lifetime of the process or buffered lines are lost.
///
/// # Errors
///
/// Returns an error if:
/// - The log directory cannot be created
/// - A global subscriber is already installed
pub fn init_tracing(
    log_level: Option<String>,
    log_file: Option<PathBuf>,
    json_output: bool,
) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error>> {
    let console_layer = if json_output {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    };

    let (file, guard) = match log_file.as_deref() {
        Some(path) => {
            let (layer, guard) = file_layer(path)?;
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter(log_level))
        .with(console_layer)
        .with(file)
        .try_init()?;

    debug!(
        json_output,
        file_logging = log_file.is_some(),
        "Tracing initialized"
    );

    Ok(guard)
}

/// JSON file layer with daily rotation.
fn file_layer<S>(
    path: &Path,
) -> Result<(Box<dyn Layer<S> + Send + Sync>, WorkerGuard), Box<dyn std::error::Error>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(directory)?;

    let file_appender = tracing_appender::rolling::daily(
        directory,
        path.file_name().unwrap_or_else(|| OsStr::new("inspector.log")),
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let layer = fmt::layer()
        .json()
        .with_writer(non_blocking)
        .with_current_span(true)
        .with_span_list(true)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .boxed();

    Ok((layer, guard))
}
