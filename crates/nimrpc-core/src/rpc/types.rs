//! Wire shapes returned by the Nimiq JSON-RPC node.
//!
//! A block response is decoded into more than one of these views from the
//! same payload: [`WireHeader`] for the header fields, and either
//! [`WireLightBlock`] (txids only) or [`WireBlock`] (full transactions)
//! depending on the verbosity flag the block was requested with.

use serde::{Deserialize, Deserializer};

// ==============================================================================
// Blocks
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireHeader {
    pub number: i64,
    pub hash: String,
    #[serde(default)]
    pub pow: String,
    #[serde(default)]
    pub parent_hash: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub nonce: String,
    #[serde(default)]
    pub body_hash: String,
    #[serde(default)]
    pub accounts_hash: String,
    #[serde(default)]
    pub miner: String,
    #[serde(default)]
    pub miner_address: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub difficulty: String,
    #[serde(default)]
    pub extra_data: String,
    #[serde(default)]
    pub size: u64,
    #[serde(rename = "timestamp", default)]
    pub time: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireLightBlock {
    #[serde(rename = "transactions", default)]
    pub txs: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireBlock {
    #[serde(rename = "transactions", default)]
    pub txs: Vec<WireTx>,
}

// ==============================================================================
// Transactions
// ==============================================================================

/// A transaction as the node reports it. Amounts are in luna.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTx {
    pub hash: String,
    #[serde(default)]
    pub block_hash: String,
    #[serde(default)]
    pub timestamp: u64,
    #[serde(default)]
    pub confirmations: i64,
    #[serde(default)]
    pub transaction_index: i64,
    pub from: String,
    #[serde(default)]
    pub from_address: String,
    pub to: String,
    #[serde(default)]
    pub to_address: String,
    pub value: u64,
    #[serde(default)]
    pub fee: u64,
}

/// Some node versions report `nonce` and `difficulty` as numbers, others as
/// strings. Both become the decimal string.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}
