//! Error types for the log inspector.
//!
//! This module provides a unified error type [`InspectorError`] covering every
//! way a query run can fail, from configuration loading to the final RPC call.
//!
//! # Design
//!
//! The error hierarchy is organized by layer:
//! - [`InspectorError::ConfigError`]: Missing or malformed settings
//! - [`InspectorError::ConnectionError`]: The node endpoint cannot be reached
//! - [`InspectorError::RpcError`]: A remote call failed or returned nothing
//! - [`InspectorError::IndexError`]: A transaction index is past the end of a block
//!
//! None of these are retried. They bubble up to [`crate::cli::run`] and the
//! binary turns them into a fatal log line and a non-zero exit.
//!
//! # Example
//!
//! ```
//! use eth_log_inspector::error::{InspectorError, InspectorResult};
//!
//! fn pick(hashes: &[u64], index: usize) -> InspectorResult<u64> {
//!     hashes
//!         .get(index)
//!         .copied()
//!         .ok_or(InspectorError::index(index, hashes.len(), 0))
//! }
//! ```

use std::fmt;

/// Result type alias using [`InspectorError`].
pub type InspectorResult<T> = Result<T, InspectorError>;

/// Unified error type for the log inspector.
#[derive(Debug)]
pub enum InspectorError {
    /// Configuration or environment variable errors.
    ///
    /// Variants include:
    /// - Required environment variables unset or empty
    /// - Malformed addresses or topic hashes
    /// - Inverted block ranges
    ConfigError {
        /// Human-readable error message
        message: String,
        /// Optional underlying error
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The node endpoint could not be reached.
    ///
    /// Raised by [`crate::rpc::connect`] when the URL is invalid or the
    /// connection probe fails. No further calls are made after this.
    ConnectionError {
        /// Human-readable error message
        message: String,
        /// Optional underlying error
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// RPC method errors.
    ///
    /// Variants include:
    /// - Transport failures after connecting
    /// - Deadline expiry
    /// - Block or receipt not found
    RpcError {
        /// Human-readable error message
        message: String,
        /// Optional underlying error
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A transaction index is out of range for the block it was applied to.
    IndexError {
        /// Requested ordinal position
        index: usize,
        /// Number of transactions actually in the block
        len: usize,
        /// Block the index was applied to
        block: u64,
    },
}

impl InspectorError {
    /// Create a new configuration error.
    ///
    /// # Example
    ///
    /// ```
    /// use eth_log_inspector::error::InspectorError;
    ///
    /// let err = InspectorError::config("ETHEREUM_RPC_URL not set", None);
    /// assert!(matches!(err, InspectorError::ConfigError { .. }));
    /// ```
    #[must_use]
    pub fn config(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::ConfigError {
            message: message.into(),
            source,
        }
    }

    /// Create a new connection error.
    ///
    /// # Example
    ///
    /// ```
    /// use eth_log_inspector::error::InspectorError;
    ///
    /// let err = InspectorError::connection("Connection refused", None);
    /// assert!(matches!(err, InspectorError::ConnectionError { .. }));
    /// ```
    #[must_use]
    pub fn connection(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::ConnectionError {
            message: message.into(),
            source,
        }
    }

    /// Create a new RPC error.
    ///
    /// # Example
    ///
    /// ```
    /// use eth_log_inspector::error::InspectorError;
    ///
    /// let err = InspectorError::rpc("eth_getLogs failed", None);
    /// assert!(matches!(err, InspectorError::RpcError { .. }));
    /// ```
    #[must_use]
    pub fn rpc(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::RpcError {
            message: message.into(),
            source,
        }
    }

    /// Create a new index error.
    #[must_use]
    pub const fn index(index: usize, len: usize, block: u64) -> Self {
        Self::IndexError { index, len, block }
    }
}

impl fmt::Display for InspectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigError { message, .. } => write!(f, "Configuration error: {message}"),
            Self::ConnectionError { message, .. } => write!(f, "Connection error: {message}"),
            Self::RpcError { message, .. } => write!(f, "RPC error: {message}"),
            Self::IndexError { index, len, block } => write!(
                f,
                "Index error: transaction index {index} out of range for block {block} ({len} transactions)"
            ),
        }
    }
}

impl std::error::Error for InspectorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ConfigError { source, .. }
            | Self::ConnectionError { source, .. }
            | Self::RpcError { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &dyn std::error::Error),
            Self::IndexError { .. } => None,
        }
    }
}

/// Convert from `eyre::Report` to `InspectorError`.
///
/// Reports that reach this point have no better category, so they are
/// filed as RPC errors.
impl From<eyre::Report> for InspectorError {
    fn from(err: eyre::Report) -> Self {
        Self::RpcError {
            message: err.to_string(),
            source: None,
        }
    }
}
