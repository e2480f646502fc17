//! Backend configuration loaded from the coin's JSON config document.

use std::time::Duration;

use serde::{Deserialize, Deserializer};
use tracing::warn;

use crate::error::CoreError;

/// Minimum number of block -> addresses mappings kept, so that a rollback
/// always has enough history to work with.
pub const MIN_BLOCK_ADDRESSES_TO_KEEP: u32 = 100;

#[derive(Debug, Clone, Deserialize)]
pub struct Configuration {
    pub coin_name: String,
    pub coin_shortcut: String,
    pub rpc_url: String,
    /// Per-call deadline in seconds.
    pub rpc_timeout: u64,
    /// Any integer is accepted; values below
    /// [`MIN_BLOCK_ADDRESSES_TO_KEEP`], negatives included, are raised to it.
    #[serde(
        default = "min_block_addresses_to_keep",
        deserialize_with = "floor_block_addresses_to_keep"
    )]
    pub block_addresses_to_keep: u32,
    /// Optional cap on outbound HTTP requests per second.
    #[serde(default)]
    pub rpc_requests_per_second: Option<u32>,
}

impl Configuration {
    /// Parse and normalize a raw JSON config document.
    pub fn from_json(raw: &[u8]) -> Result<Self, CoreError> {
        let config: Configuration = serde_json::from_slice(raw)
            .map_err(|e| CoreError::InvalidConfig(format!("invalid configuration file: {e}")))?;

        if config.rpc_timeout == 0 {
            return Err(CoreError::InvalidConfig(
                "rpc_timeout must be at least 1 second".to_owned(),
            ));
        }
        if config.rpc_requests_per_second == Some(0) {
            return Err(CoreError::InvalidConfig(
                "rpc_requests_per_second must be at least 1".to_owned(),
            ));
        }

        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout)
    }
}

fn min_block_addresses_to_keep() -> u32 {
    MIN_BLOCK_ADDRESSES_TO_KEEP
}

fn floor_block_addresses_to_keep<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let configured = i64::deserialize(deserializer)?;
    if configured < i64::from(MIN_BLOCK_ADDRESSES_TO_KEEP) {
        warn!(
            configured,
            effective = MIN_BLOCK_ADDRESSES_TO_KEEP,
            "block_addresses_to_keep raised to the rollback minimum"
        );
        return Ok(MIN_BLOCK_ADDRESSES_TO_KEEP);
    }
    u32::try_from(configured).map_err(|_| {
        serde::de::Error::custom(format!("block_addresses_to_keep too large: {configured}"))
    })
}
