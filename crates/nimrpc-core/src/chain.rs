//! The indexer's coin-access contract.
//!
//! Every backend implements the whole of [`BlockChain`]. Operations a chain
//! cannot perform return [`CoreError::Unsupported`] so callers can degrade
//! instead of receiving an empty success.

use async_trait::async_trait;
use primitive_types::U256;

use crate::error::CoreError;
use crate::network::Network;
use crate::parser::BlockChainParser;
use crate::types::{
    AddressDescriptor, Block, BlockHeader, BlockInfo, ChainInfo, MempoolEntry, OnNewTxAddr,
    Outpoint, Tx,
};

#[async_trait]
pub trait BlockChain: Send + Sync {
    /// Identify the network the node runs on. Must be called once after
    /// construction and before serving requests.
    async fn initialize(&self) -> Result<(), CoreError>;

    /// Release the RPC handle. Idempotent; never fails.
    async fn shutdown(&self) -> Result<(), CoreError>;

    fn coin_name(&self) -> &str;

    fn subversion(&self) -> &str;

    /// `None` until [`initialize`](Self::initialize) has succeeded.
    fn network(&self) -> Option<Network>;

    fn is_testnet(&self) -> bool {
        self.network().is_some_and(Network::is_testnet)
    }

    async fn get_chain_info(&self) -> Result<ChainInfo, CoreError>;

    async fn get_best_block_hash(&self) -> Result<String, CoreError>;

    async fn get_best_block_height(&self) -> Result<u32, CoreError>;

    async fn get_block_hash(&self, height: u32) -> Result<String, CoreError>;

    async fn get_block_header(&self, hash: &str) -> Result<BlockHeader, CoreError>;

    /// Fetch a full block by hash or height. A non-empty `hash` takes
    /// precedence and `height` is then ignored.
    async fn get_block(&self, hash: Option<&str>, height: u32) -> Result<Block, CoreError>;

    /// Header plus txids only.
    async fn get_block_info(&self, hash: &str) -> Result<BlockInfo, CoreError>;

    async fn get_transaction(&self, txid: &str) -> Result<Tx, CoreError>;

    /// Transaction lookup optimized for the mempool (no block data).
    async fn get_transaction_for_mempool(&self, txid: &str) -> Result<Tx, CoreError>;

    /// The backend's raw, coin-specific JSON for a transaction.
    async fn get_transaction_specific(&self, tx: &Tx) -> Result<serde_json::Value, CoreError>;

    async fn get_mempool(&self) -> Result<Vec<String>, CoreError>;

    async fn estimate_fee(&self, blocks: u32) -> Result<U256, CoreError>;

    async fn estimate_smart_fee(&self, blocks: u32, conservative: bool)
        -> Result<U256, CoreError>;

    async fn send_raw_transaction(&self, hex: &str) -> Result<String, CoreError>;

    /// Rebuild the mempool -> address index, returning the mempool size.
    async fn resync_mempool(&self, on_new_tx_addr: Option<&OnNewTxAddr>)
        -> Result<usize, CoreError>;

    async fn get_mempool_transactions(&self, address: &str) -> Result<Vec<Outpoint>, CoreError>;

    async fn get_mempool_transactions_for_addr_desc(
        &self,
        desc: &AddressDescriptor,
    ) -> Result<Vec<Outpoint>, CoreError>;

    async fn get_mempool_entry(&self, txid: &str) -> Result<MempoolEntry, CoreError>;

    fn chain_parser(&self) -> &dyn BlockChainParser;
}
