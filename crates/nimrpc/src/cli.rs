use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};

/// nimrpc: query a Nimiq node through the indexer's backend adapter.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Path to the coin's JSON backend configuration.
    #[arg(long, env = "NIMRPC_CONFIG")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Coin, network, and chain tip summary.
    Info,
    /// Height of the best block.
    BestHeight,
    /// Hash of the best block.
    BestHash,
    /// Hash of the block at the given height.
    BlockHash { height: u32 },
    /// Header of the block with the given hash.
    Header { hash: String },
    /// Full block by hash or height (hash wins when both are given).
    #[command(group(ArgGroup::new("selector").required(true).multiple(true).args(["hash", "height"])))]
    Block {
        #[arg(long)]
        hash: Option<String>,
        #[arg(long)]
        height: Option<u32>,
    },
    /// Block summary with txids only.
    BlockInfo { hash: String },
    /// Transaction by id.
    Tx { txid: String },
    /// Hashes of pending transactions.
    Mempool,
    /// Submit a hex-encoded raw transaction.
    Send { hex: String },
}
