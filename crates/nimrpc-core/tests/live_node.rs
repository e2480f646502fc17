use std::env;
use std::sync::Once;

use nimrpc_core::{BlockChain, NimiqRpc};

static TRACING_INIT: Once = Once::new();

fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("nimrpc_core=debug")),
            )
            .with_target(true)
            .try_init();
    });
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a running Nimiq node; set NIMRPC_TEST_RPC_URL"]
async fn live_node_reads_tip_and_blocks() {
    init_tracing();

    let rpc_url = env::var("NIMRPC_TEST_RPC_URL").expect("NIMRPC_TEST_RPC_URL must be set");
    let config = serde_json::json!({
        "coin_name": "Nimiq",
        "coin_shortcut": "NIM",
        "rpc_url": rpc_url,
        "rpc_timeout": 25,
        "block_addresses_to_keep": 300,
    })
    .to_string();

    let rpc = NimiqRpc::new(config.as_bytes()).expect("backend must construct");

    eprintln!("[itest] initializing against {rpc_url}");
    rpc.initialize()
        .await
        .expect("node genesis must be a known network");
    eprintln!("[itest] network: {:?}", rpc.network());

    let height = rpc
        .get_best_block_height()
        .await
        .expect("blockNumber must succeed");
    assert!(height >= 1, "node must have at least the genesis block");

    let best_hash = rpc
        .get_best_block_hash()
        .await
        .expect("best block hash must resolve");
    let header = rpc
        .get_block_header(&best_hash)
        .await
        .expect("tip header must resolve");
    assert_eq!(header.hash, best_hash);

    let full = rpc
        .get_block(Some(&best_hash), 0)
        .await
        .expect("tip block must decode");
    let info = rpc
        .get_block_info(&best_hash)
        .await
        .expect("tip summary must decode");
    assert_eq!(full.header, info.header, "full and light views must agree");
    assert_eq!(full.txs.len(), info.txids.len());

    for tx in full.txs.iter().take(5) {
        let fetched = rpc
            .get_transaction(&tx.txid)
            .await
            .expect("block transaction must be retrievable");
        assert_eq!(fetched.txid, tx.txid);
        assert_eq!(fetched.vin.len(), 1);
        assert_eq!(fetched.vout.len(), 1);
    }

    let mempool = rpc.get_mempool().await.expect("mempool must list");
    eprintln!("[itest] mempool size {}", mempool.len());

    rpc.shutdown().await.expect("shutdown must not fail");
    eprintln!("[itest] integration test completed");
}
