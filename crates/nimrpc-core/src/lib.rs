pub mod chain;
pub mod config;
pub mod connector;
pub mod error;
pub mod network;
pub mod parser;
pub mod rpc;
#[cfg(test)]
mod test_util;
pub mod types;

pub use chain::BlockChain;
pub use config::Configuration;
pub use connector::NimiqRpc;
pub use error::{CoreError, RpcError};
pub use network::Network;
pub use parser::{BlockChainParser, NimiqParser};
