//! Shared test fixtures for `nimrpc-core` unit tests.
//!
//! Builds node-shaped JSON payloads so that wire decoding, translation and
//! connector tests all work from one source of dummy data.

use crate::config::Configuration;

// ==============================================================================
// Wire Payloads
// ==============================================================================

/// A block header as `getBlockByNumber`/`getBlockByHash` report it.
pub fn header_json(number: i64, hash: &str, parent_hash: &str) -> serde_json::Value {
    serde_json::json!({
        "number": number,
        "hash": hash,
        "pow": "00000e1f",
        "parentHash": parent_hash,
        "nonce": 48735,
        "bodyHash": "b0d7",
        "accountsHash": "acc0",
        "miner": "f25c7a8f1dd7e2b9d8d6f5e77c2a9a6f04a9e1a2",
        "minerAddress": "NQ07 0000 0000 0000 0000 0000 0000 0000 0000",
        "difficulty": "1.5",
        "extraData": "",
        "size": 1234,
        "timestamp": 1_523_727_060,
    })
}

/// A transaction with deterministic sender/recipient and the given value.
pub fn tx_json(hash: &str, value: u64) -> serde_json::Value {
    serde_json::json!({
        "hash": hash,
        "blockHash": "cc",
        "blockNumber": 2,
        "timestamp": 1_523_727_120,
        "confirmations": 3,
        "transactionIndex": 0,
        "from": "0102030405060708090a0b0c0d0e0f1011121314",
        "fromAddress": "NQ98 0410 6105 0Q3G G28A 1C60 S3GF 208H 44QL",
        "to": "0000000000000000000000000000000000000000",
        "toAddress": "NQ07 0000 0000 0000 0000 0000 0000 0000 0000",
        "value": value,
        "fee": 138,
    })
}

/// A full (verbose) block payload with the given transactions.
pub fn full_block_json(
    number: i64,
    hash: &str,
    parent_hash: &str,
    txs: Vec<serde_json::Value>,
) -> serde_json::Value {
    let mut raw = header_json(number, hash, parent_hash);
    raw["transactions"] = serde_json::Value::Array(txs);
    raw
}

/// A light (non-verbose) block payload carrying only txids.
pub fn light_block_json(
    number: i64,
    hash: &str,
    parent_hash: &str,
    txids: &[&str],
) -> serde_json::Value {
    let mut raw = header_json(number, hash, parent_hash);
    raw["transactions"] = serde_json::json!(txids);
    raw
}

// ==============================================================================
// Configuration
// ==============================================================================

pub fn test_config() -> Configuration {
    Configuration {
        coin_name: "Nimiq".to_owned(),
        coin_shortcut: "NIM".to_owned(),
        rpc_url: "http://127.0.0.1:8648".to_owned(),
        rpc_timeout: 5,
        block_addresses_to_keep: 300,
        rpc_requests_per_second: None,
    }
}
