use std::time::Duration;

use crate::network::Network;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("cannot connect to rpc endpoint `{url}`: {reason}")]
    Connection { url: String, reason: String },

    #[error("unknown network genesis {0}")]
    UnknownNetwork(String),

    #[error("node switched network: initialized on {stored}, now reports {found}")]
    NetworkChanged { stored: Network, found: Network },

    #[error("block not found: {0}")]
    BlockNotFound(String),

    #[error("transaction not found: {0}")]
    TxNotFound(String),

    #[error("{operation}: not supported")]
    Unsupported { operation: &'static str },

    #[error("invalid block data ({context}): {message}")]
    InvalidBlockData { context: String, message: String },

    #[error("invalid transaction data: {0}")]
    InvalidTxData(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("RPC communication failure: {0}")]
    Rpc(#[from] RpcError),
}

impl CoreError {
    pub(crate) fn unsupported(operation: &'static str) -> Self {
        Self::Unsupported { operation }
    }

    /// True for errors that mean "the node does not know this object",
    /// as opposed to the node being unreachable.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::BlockNotFound(_) | Self::TxNotFound(_))
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{method} timed out after {timeout:?}")]
    Timeout { method: String, timeout: Duration },

    #[error("server error {code}: {message}")]
    ServerError { code: i64, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("rpc handle is closed")]
    Closed,
}
