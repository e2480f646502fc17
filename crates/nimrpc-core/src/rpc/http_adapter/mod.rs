//! Native JSON-RPC client for Nimiq nodes.
//!
//! Implements [`RpcTransport`](super::RpcTransport) over JSON-RPC 2.0 using
//! `reqwest`, with optional request rate limiting.

mod client;
mod connection;
mod protocol;

pub use client::HttpTransport;
