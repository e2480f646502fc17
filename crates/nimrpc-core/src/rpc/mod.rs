//! Nimiq JSON-RPC access layer.
//!
//! Defines the [`RpcTransport`] trait the connector issues calls through,
//! an HTTP JSON-RPC implementation ([`HttpTransport`]), the node's wire
//! shapes, and a test mock (`mock::MockTransport`).

mod http_adapter;
#[cfg(test)]
pub mod mock;
pub mod types;

pub use http_adapter::HttpTransport;

use async_trait::async_trait;

use crate::error::CoreError;

/// A single JSON-RPC endpoint.
///
/// Implementations own framing, request ids and connection reuse, and must
/// be safe to call concurrently. A JSON `null` result is returned as
/// [`serde_json::Value::Null`], not as an error.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn call(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, CoreError>;
}
