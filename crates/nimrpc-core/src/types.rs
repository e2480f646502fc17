//! Canonical, coin-agnostic block and transaction model shared with the
//! indexer. The adapter only ever produces these; it never consumes them
//! except as arguments to operations it does not support.

use primitive_types::U256;
use serde::Serialize;

// ==============================================================================
// Blocks
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockHeader {
    pub hash: String,
    pub prev: String,
    pub height: u32,
    pub size: usize,
    pub time: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    #[serde(flatten)]
    pub header: BlockHeader,
    pub txs: Vec<Tx>,
}

/// Header plus the extra fields a block summary carries, with txids only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockInfo {
    #[serde(flatten)]
    pub header: BlockHeader,
    /// Decimal string as reported by the node.
    pub difficulty: String,
    pub nonce: String,
    pub txids: Vec<String>,
}

// ==============================================================================
// Transactions
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tx {
    pub txid: String,
    pub vin: Vec<Vin>,
    pub vout: Vec<Vout>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vin {
    pub addresses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vout {
    pub n: u32,
    /// Value in the chain's base unit, unscaled.
    pub value_sat: U256,
    pub script_pub_key: ScriptPubKey,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScriptPubKey {
    pub addresses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outpoint {
    pub txid: String,
    pub vout: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MempoolEntry {
    pub txid: String,
    pub size: u32,
    pub fee_sat: U256,
    pub time: u64,
    pub height: u32,
}

/// Backend status as reported to the indexer's status page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainInfo {
    pub chain: String,
    pub blocks: u32,
    pub best_block_hash: String,
    pub version: String,
    pub subversion: String,
}

// ==============================================================================
// Address Descriptor
// ==============================================================================

/// Binary form of an address, as the indexer stores it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AddressDescriptor(pub Vec<u8>);

impl AddressDescriptor {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Display for AddressDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

/// Callback invoked for each (txid, address descriptor) pair discovered while
/// resyncing the mempool.
pub type OnNewTxAddr = dyn Fn(&str, &AddressDescriptor) + Send + Sync;
