//! Configuration management for the log inspector.
//!
//! This module handles loading and validating configuration from environment variables
//! using the `dotenvy` crate. All operations return [`InspectorResult`] for comprehensive
//! error handling.
//!
//! ## Environment Variables
//!
//! Required by both flows:
//! - `ETHEREUM_RPC_URL`: Base URL of the JSON-RPC endpoint (the API key is appended to it)
//! - `ETHEREUM_API_KEY`: API key for the endpoint
//!
//! Required by the log query flow only:
//! - `CONTRACT_ADDRESS`: Contract whose logs are queried
//! - `EVENT_SIGNATURE`: Topic-0 hash (`0x` + 64 hex chars) or canonical event
//!   signature such as `Transfer(address,address,uint256)`
//!
//! The receipt flow reads `EVENT_SIGNATURE` as a plain comparison string; when
//! empty it simply matches nothing.
//!
//! Optional (with defaults):
//! - `RPC_TIMEOUT_SECS`: Deadline for each remote call (default: 30)
//!
//! ## Example
//!
//! ```no_run
//! use eth_log_inspector::config::{Config, Flow};
//! use eth_log_inspector::error::InspectorResult;
//!
//! # fn main() -> InspectorResult<()> {
//! let config = Config::from_env()?;
//! config.require(Flow::LogQuery)?;
//! println!("Contract: {}", config.contract_address()?);
//! # Ok(())
//! # }
//! ```

use crate::error::{InspectorError, InspectorResult};
use alloy::primitives::{keccak256, Address, B256};
use std::env;
use std::fmt;
use std::time::Duration;

/// Default deadline applied to every remote call.
pub const DEFAULT_RPC_TIMEOUT_SECS: u64 = 30;

const RPC_URL_VAR: &str = "ETHEREUM_RPC_URL";
const API_KEY_VAR: &str = "ETHEREUM_API_KEY";
const CONTRACT_ADDRESS_VAR: &str = "CONTRACT_ADDRESS";
const EVENT_SIGNATURE_VAR: &str = "EVENT_SIGNATURE";
const RPC_TIMEOUT_VAR: &str = "RPC_TIMEOUT_SECS";

/// The query flow a configuration is validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Node-side log filtering over a block range.
    LogQuery,
    /// Receipt inspection of a single transaction.
    ReceiptQuery,
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LogQuery => write!(f, "log query"),
            Self::ReceiptQuery => write!(f, "receipt query"),
        }
    }
}

/// Connection settings loaded from the environment.
///
/// Unset and empty variables are stored as empty strings; which of them are
/// actually needed is decided per flow by [`Config::require`]. Every value is
/// trimmed except `EVENT_SIGNATURE`, which the receipt flow compares verbatim.
#[derive(Clone)]
pub struct Config {
    /// Base RPC URL
    rpc_url: String,

    /// Endpoint API key, appended to the base URL
    api_key: String,

    /// Raw contract address
    contract_address: String,

    /// Event signature or topic hash, untrimmed
    event_signature: String,

    /// Per-call deadline
    rpc_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Loads a `.env` file first if one is present.
    ///
    /// # Errors
    ///
    /// Returns an error if `RPC_TIMEOUT_SECS` is set but is not a positive integer.
    /// Missing connection settings are not reported here; see [`Config::require`].
    pub fn from_env() -> InspectorResult<Self> {
        // Load .env file if present (ignore error if file doesn't exist)
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if `RPC_TIMEOUT_SECS` is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> InspectorResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).unwrap_or_default().trim().to_string();

        let timeout_raw = read(RPC_TIMEOUT_VAR);
        let rpc_timeout_secs = if timeout_raw.is_empty() {
            DEFAULT_RPC_TIMEOUT_SECS
        } else {
            timeout_raw.parse::<u64>().map_err(|e| {
                InspectorError::config(
                    format!("{RPC_TIMEOUT_VAR} must be a whole number of seconds, got: {timeout_raw}"),
                    Some(Box::new(e)),
                )
            })?
        };

        if rpc_timeout_secs == 0 {
            return Err(InspectorError::config(
                format!("{RPC_TIMEOUT_VAR} must be greater than zero"),
                None,
            ));
        }

        Ok(Self {
            rpc_url: read(RPC_URL_VAR),
            api_key: read(API_KEY_VAR),
            contract_address: read(CONTRACT_ADDRESS_VAR),
            event_signature: lookup(EVENT_SIGNATURE_VAR).unwrap_or_default(),
            rpc_timeout: Duration::from_secs(rpc_timeout_secs),
        })
    }

    /// Check that every setting the given flow needs is present.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming all missing variables. A value
    /// made only of whitespace counts as missing.
    pub fn require(&self, flow: Flow) -> InspectorResult<()> {
        let missing: Vec<&str> = self
            .required_settings(flow)
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect();

        if missing.is_empty() {
            return Ok(());
        }

        Err(InspectorError::config(
            format!(
                "Missing required environment variables for {flow}: {}",
                missing.join(", ")
            ),
            None,
        ))
    }

    /// Settings `flow` cannot run without, paired with their variable names.
    fn required_settings(&self, flow: Flow) -> Vec<(&'static str, &str)> {
        let mut settings = vec![
            (RPC_URL_VAR, self.rpc_url.as_str()),
            (API_KEY_VAR, self.api_key.as_str()),
        ];
        match flow {
            Flow::LogQuery => {
                settings.push((CONTRACT_ADDRESS_VAR, self.contract_address.as_str()));
                settings.push((EVENT_SIGNATURE_VAR, self.event_signature.as_str()));
            }
            Flow::ReceiptQuery => {}
        }
        settings
    }

    /// Full endpoint URL: the base URL with the API key appended verbatim.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.rpc_url, self.api_key)
    }

    /// Get the base RPC URL (without the API key).
    #[must_use]
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Get the event signature string exactly as configured.
    #[must_use]
    pub fn event_signature(&self) -> &str {
        &self.event_signature
    }

    /// Get the per-call RPC deadline.
    #[must_use]
    pub const fn rpc_timeout(&self) -> Duration {
        self.rpc_timeout
    }

    /// Parse the configured contract address.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is empty or not 20 bytes of hex.
    pub fn contract_address(&self) -> InspectorResult<Address> {
        if self.contract_address.is_empty() {
            return Err(InspectorError::config(
                format!("{CONTRACT_ADDRESS_VAR} is not set"),
                None,
            ));
        }

        self.contract_address.parse::<Address>().map_err(|e| {
            InspectorError::config(
                format!(
                    "{CONTRACT_ADDRESS_VAR} must be a valid Ethereum address (0x + 40 hex chars), got: {}",
                    self.contract_address
                ),
                Some(Box::new(e)),
            )
        })
    }

    /// Resolve the configured event signature to a topic hash.
    ///
    /// Surrounding whitespace is ignored. A `0x`-prefixed 66-character value is
    /// taken as the hash itself. Anything else is treated as a canonical
    /// signature and hashed with keccak-256.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is empty or looks like a hash but is not valid hex.
    pub fn event_topic(&self) -> InspectorResult<B256> {
        parse_event_topic(self.event_signature.trim())
    }
}

/// Resolve an event signature string to its topic-0 hash.
///
/// # Errors
///
/// Returns an error if `signature` is empty or is a malformed hex hash.
pub fn parse_event_topic(signature: &str) -> InspectorResult<B256> {
    if signature.is_empty() {
        return Err(InspectorError::config(
            format!("{EVENT_SIGNATURE_VAR} is not set"),
            None,
        ));
    }

    if signature.starts_with("0x") && signature.len() == 66 {
        return signature.parse::<B256>().map_err(|e| {
            InspectorError::config(
                format!("{EVENT_SIGNATURE_VAR} is not a valid 32-byte hash: {signature}"),
                Some(Box::new(e)),
            )
        });
    }

    if signature.starts_with("0x") {
        return Err(InspectorError::config(
            format!("{EVENT_SIGNATURE_VAR} must be 0x + 64 hex chars, got: {signature}"),
            None,
        ));
    }

    Ok(keccak256(signature.as_bytes()))
}

// The API key is part of the endpoint, keep it out of debug output.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("rpc_url", &self.rpc_url)
            .field("api_key", &"<redacted>")
            .field("contract_address", &self.contract_address)
            .field("event_signature", &self.event_signature)
            .field("rpc_timeout", &self.rpc_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, b256};
    use std::collections::HashMap;

    const TRANSFER_TOPIC: B256 =
        b256!("ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef");

    fn config_from(vars: &[(&str, &str)]) -> InspectorResult<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|name| map.get(name).cloned())
    }

    fn full_vars() -> Vec<(&'static str, &'static str)> {
        vec![
            ("ETHEREUM_RPC_URL", "https://eth-mainnet.g.alchemy.com/v2/"),
            ("ETHEREUM_API_KEY", "test_key"),
            ("CONTRACT_ADDRESS", "0xdAC17F958D2ee523a2206206994597C13D831ec7"),
            (
                "EVENT_SIGNATURE",
                "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef",
            ),
        ]
    }

    #[test]
    fn test_endpoint_concatenation() {
        let config = config_from(&full_vars()).unwrap();
        assert_eq!(
            config.endpoint(),
            "https://eth-mainnet.g.alchemy.com/v2/test_key"
        );
    }

    #[test]
    fn test_log_query_requires_all_four() {
        let config = config_from(&full_vars()).unwrap();
        assert!(config.require(Flow::LogQuery).is_ok());

        let mut vars = full_vars();
        vars.retain(|(k, _)| *k != "CONTRACT_ADDRESS");
        let config = config_from(&vars).unwrap();
        let err = config.require(Flow::LogQuery).unwrap_err();
        assert!(matches!(err, InspectorError::ConfigError { .. }));
        assert!(err.to_string().contains("CONTRACT_ADDRESS"));
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let mut vars = full_vars();
        vars.retain(|(k, _)| *k != "ETHEREUM_API_KEY");
        vars.push(("ETHEREUM_API_KEY", "   "));
        let config = config_from(&vars).unwrap();
        assert!(config.require(Flow::ReceiptQuery).is_err());
    }

    #[test]
    fn test_missing_vars_are_all_listed() {
        let config = config_from(&[]).unwrap();
        let message = config.require(Flow::LogQuery).unwrap_err().to_string();
        for name in [
            "ETHEREUM_RPC_URL",
            "ETHEREUM_API_KEY",
            "CONTRACT_ADDRESS",
            "EVENT_SIGNATURE",
        ] {
            assert!(message.contains(name), "{name} missing from: {message}");
        }
    }

    #[test]
    fn test_receipt_query_tolerates_missing_signature() {
        let config = config_from(&[
            ("ETHEREUM_RPC_URL", "http://localhost:8545/"),
            ("ETHEREUM_API_KEY", "k"),
        ])
        .unwrap();
        assert!(config.require(Flow::ReceiptQuery).is_ok());
        assert_eq!(config.event_signature(), "");
        assert!(config.require(Flow::LogQuery).is_err());
    }

    #[test]
    fn test_receipt_query_does_not_require_contract() {
        let config = config_from(&[
            ("ETHEREUM_RPC_URL", "http://localhost:8545/"),
            ("ETHEREUM_API_KEY", "k"),
            ("CONTRACT_ADDRESS", ""),
        ])
        .unwrap();
        assert!(config.require(Flow::ReceiptQuery).is_ok());

        let message = config.require(Flow::LogQuery).unwrap_err().to_string();
        assert!(message.contains("CONTRACT_ADDRESS"));
        assert!(message.contains("EVENT_SIGNATURE"));
        assert!(!message.contains("ETHEREUM_RPC_URL"));
    }

    #[test]
    fn test_event_signature_kept_verbatim() {
        let padded = " 0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef\n";
        let mut vars = full_vars();
        vars.retain(|(k, _)| *k != "EVENT_SIGNATURE");
        vars.push(("EVENT_SIGNATURE", padded));
        let config = config_from(&vars).unwrap();

        assert_eq!(config.event_signature(), padded);
        assert_eq!(config.event_topic().unwrap(), TRANSFER_TOPIC);
    }

    #[test]
    fn test_blank_event_signature_counts_as_missing() {
        let mut vars = full_vars();
        vars.retain(|(k, _)| *k != "EVENT_SIGNATURE");
        vars.push(("EVENT_SIGNATURE", " \n"));
        let config = config_from(&vars).unwrap();

        let message = config.require(Flow::LogQuery).unwrap_err().to_string();
        assert!(message.contains("EVENT_SIGNATURE"));
    }

    #[test]
    fn test_contract_address_parsing() {
        let config = config_from(&full_vars()).unwrap();
        assert_eq!(
            config.contract_address().unwrap(),
            address!("dAC17F958D2ee523a2206206994597C13D831ec7")
        );

        let config = config_from(&[("CONTRACT_ADDRESS", "not_an_address")]).unwrap();
        assert!(config.contract_address().is_err());
    }

    #[test]
    fn test_event_topic_from_hash() {
        let config = config_from(&full_vars()).unwrap();
        assert_eq!(config.event_topic().unwrap(), TRANSFER_TOPIC);
    }

    #[test]
    fn test_event_topic_from_signature_text() {
        let topic = parse_event_topic("Transfer(address,address,uint256)").unwrap();
        assert_eq!(topic, TRANSFER_TOPIC);
    }

    #[test]
    fn test_event_topic_rejects_short_hex() {
        assert!(parse_event_topic("0x1234").is_err());
        assert!(parse_event_topic("").is_err());
    }

    #[test]
    fn test_rpc_timeout_default_and_override() {
        let config = config_from(&[]).unwrap();
        assert_eq!(
            config.rpc_timeout(),
            Duration::from_secs(DEFAULT_RPC_TIMEOUT_SECS)
        );

        let config = config_from(&[("RPC_TIMEOUT_SECS", "5")]).unwrap();
        assert_eq!(config.rpc_timeout(), Duration::from_secs(5));

        assert!(config_from(&[("RPC_TIMEOUT_SECS", "soon")]).is_err());
        assert!(config_from(&[("RPC_TIMEOUT_SECS", "0")]).is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = config_from(&full_vars()).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("test_key"));
        assert!(debug.contains("<redacted>"));
    }
}
