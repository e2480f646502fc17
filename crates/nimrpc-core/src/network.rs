//! Identification of the Nimiq network a node belongs to, by the hash of
//! its genesis block.

use serde::Serialize;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Devnet,
}

impl Network {
    pub fn is_testnet(self) -> bool {
        !matches!(self, Self::Mainnet)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Devnet => "devnet",
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==============================================================================
// Genesis Table
// ==============================================================================

pub const MAINNET_GENESIS_HASH: [u8; 32] = [
    0x26, 0x4a, 0xaf, 0x8a, 0x4f, 0x98, 0x28, 0xa7, 0x6c, 0x55, 0x06, 0x35, 0xda, 0x07, 0x8e, 0xb4,
    0x66, 0x30, 0x6a, 0x18, 0x9f, 0xcc, 0x03, 0x71, 0x0b, 0xee, 0x9f, 0x64, 0x9c, 0x86, 0x9d, 0x12,
];

pub const TESTNET_GENESIS_HASH: [u8; 32] = [
    0x56, 0xb2, 0xe6, 0xda, 0x6a, 0x9c, 0xb3, 0xa0, 0x15, 0xb9, 0x6d, 0xf9, 0x66, 0xb2, 0xff, 0x83,
    0x80, 0x72, 0x0c, 0x17, 0x2f, 0x81, 0x3d, 0xf2, 0x9c, 0x4c, 0x31, 0x99, 0x5d, 0x82, 0x78, 0x1a,
];

pub const DEVNET_GENESIS_HASH: [u8; 32] = [
    0x25, 0xd3, 0xad, 0x45, 0xfb, 0xab, 0x87, 0x21, 0xef, 0xff, 0x41, 0x59, 0xda, 0xbd, 0x0c, 0xa7,
    0x51, 0xb8, 0x67, 0x4a, 0x17, 0xfc, 0xfe, 0x3f, 0xb1, 0xaa, 0x56, 0xda, 0x54, 0x4a, 0x01, 0x51,
];

const GENESIS_TABLE: [(&[u8; 32], Network); 3] = [
    (&MAINNET_GENESIS_HASH, Network::Mainnet),
    (&TESTNET_GENESIS_HASH, Network::Testnet),
    (&DEVNET_GENESIS_HASH, Network::Devnet),
];

/// Classify a network by the hex hash of its genesis block.
///
/// The match is exact against the lowercase hex encoding the node reports.
/// Anything outside the table is an error: operating against an unknown
/// network is never safe.
pub fn classify_genesis(genesis_hash: &str) -> Result<Network, CoreError> {
    GENESIS_TABLE
        .iter()
        .find(|(hash, _)| hex::encode(hash) == genesis_hash)
        .map(|(_, network)| *network)
        .ok_or_else(|| CoreError::UnknownNetwork(genesis_hash.to_owned()))
}
