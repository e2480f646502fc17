use std::sync::{Arc, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use primitive_types::U256;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::chain::BlockChain;
use crate::config::Configuration;
use crate::error::{CoreError, RpcError};
use crate::network::{classify_genesis, Network};
use crate::parser::{
    block_from_wire, block_info_from_wire, header_from_wire, tx_from_wire, BlockChainParser,
    NimiqParser,
};
use crate::rpc::types::{WireBlock, WireHeader, WireLightBlock, WireTx};
use crate::rpc::{HttpTransport, RpcTransport};
use crate::types::{
    AddressDescriptor, Block, BlockHeader, BlockInfo, ChainInfo, MempoolEntry, OnNewTxAddr,
    Outpoint, Tx,
};

/// Height of the block used to fingerprint the network.
const GENESIS_HEIGHT: u32 = 1;

// ==============================================================================
// NimiqRpc: BlockChain over a Nimiq JSON-RPC node
// ==============================================================================

/// Backend for the Nimiq chain.
///
/// Every operation issues at most two JSON-RPC calls, each bounded by the
/// configured `rpc_timeout`. No retries happen here; failures go straight
/// back to the caller.
pub struct NimiqRpc {
    config: Configuration,
    parser: NimiqParser,
    timeout: Duration,
    /// Cloned out under a short read lock per call, never held across one.
    /// `None` once shut down.
    handle: RwLock<Option<Arc<dyn RpcTransport>>>,
    network: OnceLock<Network>,
}

impl NimiqRpc {
    /// Build a backend from the coin's raw JSON configuration and open the
    /// HTTP transport to `rpc_url`.
    pub fn new(raw_config: &[u8]) -> Result<Self, CoreError> {
        let config = Configuration::from_json(raw_config)?;
        let transport = HttpTransport::new(
            &config.rpc_url,
            config.timeout(),
            config.rpc_requests_per_second,
        )?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Build a backend over an already-open transport.
    pub fn with_transport(config: Configuration, transport: Arc<dyn RpcTransport>) -> Self {
        Self {
            parser: NimiqParser::new(config.block_addresses_to_keep),
            timeout: config.timeout(),
            config,
            handle: RwLock::new(Some(transport)),
            network: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn parser(&self) -> &NimiqParser {
        &self.parser
    }

    /// Fetch a transaction in its wire shape, which keeps the fee and
    /// confirmation count the canonical mapping drops.
    pub async fn get_wire_transaction(&self, txid: &str) -> Result<WireTx, CoreError> {
        let raw = self
            .call("getTransactionByHash", vec![serde_json::json!(txid)])
            .await?;
        if raw.is_null() {
            return Err(CoreError::TxNotFound(txid.to_owned()));
        }
        WireTx::deserialize(&raw)
            .map_err(|e| CoreError::InvalidTxData(format!("txid {txid}: {e}")))
    }

    async fn handle(&self) -> Result<Arc<dyn RpcTransport>, CoreError> {
        self.handle
            .read()
            .await
            .clone()
            .ok_or(CoreError::Rpc(RpcError::Closed))
    }

    async fn call(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, CoreError> {
        let handle = self.handle().await?;
        match tokio::time::timeout(self.timeout, handle.call(method, params)).await {
            Ok(result) => result,
            Err(_) => Err(RpcError::Timeout {
                method: method.to_owned(),
                timeout: self.timeout,
            }
            .into()),
        }
    }

    /// Fetch one header-only block view, mapping `null` to not-found.
    async fn call_header(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
        context: String,
    ) -> Result<WireHeader, CoreError> {
        let raw = self.call(method, params).await?;
        if raw.is_null() {
            return Err(CoreError::BlockNotFound(context));
        }
        decode_block(&raw, &context)
    }
}

fn decode_block<T: DeserializeOwned>(
    raw: &serde_json::Value,
    context: &str,
) -> Result<T, CoreError> {
    T::deserialize(raw).map_err(|e| CoreError::InvalidBlockData {
        context: context.to_owned(),
        message: e.to_string(),
    })
}

fn decode_result<T: DeserializeOwned>(
    method: &str,
    raw: serde_json::Value,
) -> Result<T, CoreError> {
    serde_json::from_value(raw)
        .map_err(|e| RpcError::InvalidResponse(format!("{method}: {e}")).into())
}

#[async_trait]
impl BlockChain for NimiqRpc {
    async fn initialize(&self) -> Result<(), CoreError> {
        let genesis = self.get_block(None, GENESIS_HEIGHT).await?;
        let found = classify_genesis(&genesis.header.hash)?;
        let stored = *self.network.get_or_init(|| {
            info!(network = %found, coin = %self.config.coin_name, "rpc: block chain");
            found
        });
        if stored != found {
            return Err(CoreError::NetworkChanged { stored, found });
        }
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), CoreError> {
        match self.handle.write().await.take() {
            Some(_) => info!("rpc: shutdown"),
            None => debug!("rpc: shutdown with no open handle"),
        }
        Ok(())
    }

    fn coin_name(&self) -> &str {
        &self.config.coin_name
    }

    fn subversion(&self) -> &str {
        ""
    }

    fn network(&self) -> Option<Network> {
        self.network.get().copied()
    }

    async fn get_chain_info(&self) -> Result<ChainInfo, CoreError> {
        Err(CoreError::unsupported("GetChainInfo"))
    }

    async fn get_best_block_hash(&self) -> Result<String, CoreError> {
        let height = self.get_best_block_height().await?;
        self.get_block_hash(height).await
    }

    async fn get_best_block_height(&self) -> Result<u32, CoreError> {
        let raw = self.call("blockNumber", Vec::new()).await?;
        decode_result("blockNumber", raw)
    }

    async fn get_block_hash(&self, height: u32) -> Result<String, CoreError> {
        let head = self
            .call_header(
                "getBlockByNumber",
                vec![serde_json::json!(height)],
                format!("height {height}"),
            )
            .await?;
        Ok(head.hash)
    }

    async fn get_block_header(&self, hash: &str) -> Result<BlockHeader, CoreError> {
        let head = self
            .call_header(
                "getBlockByHash",
                vec![serde_json::json!(hash)],
                format!("hash {hash}"),
            )
            .await?;
        header_from_wire(&head, &format!("hash {hash}"))
    }

    async fn get_block(&self, hash: Option<&str>, height: u32) -> Result<Block, CoreError> {
        let hash = hash.filter(|h| !h.is_empty());
        let raw = match hash {
            Some(hash) => {
                self.call(
                    "getBlockByHash",
                    vec![serde_json::json!(hash), serde_json::json!(true)],
                )
                .await?
            }
            None => {
                self.call(
                    "getBlockByNumber",
                    vec![serde_json::json!(height), serde_json::json!(true)],
                )
                .await?
            }
        };

        let context = format!("hash {}, height {height}", hash.unwrap_or_default());
        if raw.is_null() {
            return Err(CoreError::BlockNotFound(context));
        }
        let head: WireHeader = decode_block(&raw, &context)?;
        let body: WireBlock = decode_block(&raw, &context)?;
        block_from_wire(&head, &body, &context)
    }

    async fn get_block_info(&self, hash: &str) -> Result<BlockInfo, CoreError> {
        let raw = self
            .call(
                "getBlockByHash",
                vec![serde_json::json!(hash), serde_json::json!(false)],
            )
            .await?;

        let context = format!("hash {hash}");
        if raw.is_null() {
            return Err(CoreError::BlockNotFound(context));
        }
        let head: WireHeader = decode_block(&raw, &context)?;
        let body: WireLightBlock = decode_block(&raw, &context)?;
        block_info_from_wire(&head, body, &context)
    }

    async fn get_transaction(&self, txid: &str) -> Result<Tx, CoreError> {
        let tx = self.get_wire_transaction(txid).await?;
        Ok(tx_from_wire(&tx))
    }

    async fn get_transaction_for_mempool(&self, _txid: &str) -> Result<Tx, CoreError> {
        Err(CoreError::unsupported("GetTransactionForMempool"))
    }

    async fn get_transaction_specific(&self, _tx: &Tx) -> Result<serde_json::Value, CoreError> {
        Err(CoreError::unsupported("GetTransactionSpecific"))
    }

    async fn get_mempool(&self) -> Result<Vec<String>, CoreError> {
        let raw = self
            .call("mempoolContent", vec![serde_json::json!(false)])
            .await?;
        let txids: Option<Vec<String>> = decode_result("mempoolContent", raw)?;
        Ok(txids.unwrap_or_default())
    }

    async fn estimate_fee(&self, _blocks: u32) -> Result<U256, CoreError> {
        Err(CoreError::unsupported("EstimateFee"))
    }

    async fn estimate_smart_fee(
        &self,
        _blocks: u32,
        _conservative: bool,
    ) -> Result<U256, CoreError> {
        Err(CoreError::unsupported("EstimateSmartFee"))
    }

    async fn send_raw_transaction(&self, hex: &str) -> Result<String, CoreError> {
        let raw = self
            .call("sendRawTransaction", vec![serde_json::json!(hex)])
            .await?;
        decode_result("sendRawTransaction", raw)
    }

    async fn resync_mempool(
        &self,
        _on_new_tx_addr: Option<&OnNewTxAddr>,
    ) -> Result<usize, CoreError> {
        Err(CoreError::unsupported("ResyncMempool"))
    }

    async fn get_mempool_transactions(&self, _address: &str) -> Result<Vec<Outpoint>, CoreError> {
        Err(CoreError::unsupported("GetMempoolTransactions"))
    }

    async fn get_mempool_transactions_for_addr_desc(
        &self,
        _desc: &AddressDescriptor,
    ) -> Result<Vec<Outpoint>, CoreError> {
        Err(CoreError::unsupported("GetMempoolTransactionsForAddrDesc"))
    }

    async fn get_mempool_entry(&self, _txid: &str) -> Result<MempoolEntry, CoreError> {
        Err(CoreError::unsupported("GetMempoolEntry"))
    }

    fn chain_parser(&self) -> &dyn BlockChainParser {
        &self.parser
    }
}
