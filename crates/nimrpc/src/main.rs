mod cli;

use clap::Parser;
use eyre::{eyre, WrapErr};
use serde::Serialize;

use nimrpc_core::{BlockChain, CoreError, NimiqRpc};

use cli::Command;

#[derive(Serialize)]
struct Info<'a> {
    coin: &'a str,
    shortcut: &'a str,
    network: Option<String>,
    testnet: bool,
    best_height: u32,
    best_hash: String,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let raw_config = tokio::fs::read(&args.config)
        .await
        .with_context(|| format!("read backend configuration {}", args.config.display()))?;

    let backend = NimiqRpc::new(&raw_config).map_err(|err| match err {
        CoreError::Connection { ref url, .. } => {
            eyre!(format_rpc_connect_error(url, &err.to_string()))
        }
        other => eyre!(other),
    })?;

    // Identify the network before serving anything; an unknown genesis is
    // fatal.
    let initialized = backend.initialize().await.map_err(|err| {
        let url = &backend.config().rpc_url;
        eyre!(format_rpc_connect_error(url, &err.to_string()))
            .wrap_err("while identifying the node's network")
    });
    let result = match initialized {
        Ok(()) => run(&backend, args.command).await,
        Err(err) => Err(err),
    };

    backend
        .shutdown()
        .await
        .context("shut down rpc backend")?;
    result
}

async fn run(backend: &NimiqRpc, command: Command) -> eyre::Result<()> {
    match command {
        Command::Info => {
            let best_height = backend.get_best_block_height().await?;
            let best_hash = backend.get_block_hash(best_height).await?;
            print_json(&Info {
                coin: backend.coin_name(),
                shortcut: &backend.config().coin_shortcut,
                network: backend.network().map(|n| n.to_string()),
                testnet: backend.is_testnet(),
                best_height,
                best_hash,
            })
        }
        Command::BestHeight => print_json(&backend.get_best_block_height().await?),
        Command::BestHash => print_json(&backend.get_best_block_hash().await?),
        Command::BlockHash { height } => print_json(&backend.get_block_hash(height).await?),
        Command::Header { hash } => print_json(&backend.get_block_header(&hash).await?),
        Command::Block { hash, height } => {
            let block = backend
                .get_block(hash.as_deref(), height.unwrap_or_default())
                .await?;
            print_json(&block)
        }
        Command::BlockInfo { hash } => print_json(&backend.get_block_info(&hash).await?),
        Command::Tx { txid } => print_json(&backend.get_transaction(&txid).await?),
        Command::Mempool => print_json(&backend.get_mempool().await?),
        Command::Send { hex } => {
            let txid = backend
                .send_raw_transaction(&hex)
                .await
                .context("node rejected the transaction")?;
            tracing::info!(%txid, "transaction submitted");
            print_json(&txid)
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> eyre::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("render JSON output")?;
    println!("{rendered}");
    Ok(())
}

fn format_rpc_connect_error(rpc_url: &str, source_error: &str) -> String {
    let mut lines = vec![
        format!("could not use RPC endpoint `{rpc_url}`"),
        format!("RPC error: {source_error}"),
    ];

    if source_error.contains("dns error") || source_error.contains("Could not resolve host") {
        lines.push(
            "hint: hostname resolution failed; verify the endpoint hostname and your DNS/network"
                .into(),
        );
    } else if source_error.contains("unsupported connection scheme") {
        lines.push("hint: rpc_url must start with http:// or https://".into());
    } else if source_error.contains("401") || source_error.contains("403") {
        lines.push("hint: authentication failed; verify the user:pass part of rpc_url".into());
    } else if source_error.contains("timed out") {
        lines.push("hint: the node did not answer in time; raise rpc_timeout or check load".into());
    } else if source_error.contains("unknown network genesis") {
        lines.push(
            "hint: the node is not on mainnet, testnet, or devnet; check which chain it follows"
                .into(),
        );
    } else if source_error.contains("error sending request for url") {
        lines.push("hint: request could not be sent; verify URL format, network access, and endpoint reachability".into());
    }

    lines.join("\n")
}
