use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{CoreError, RpcError};

use super::RpcTransport;

type CallKey = (String, String);

/// A mock JSON-RPC endpoint for testing. Returns canned results keyed by
/// method and exact params, populated via the builder pattern, and records
/// every call it receives.
///
/// Calls without a canned response get a JSON-RPC "method not found"
/// server error, like a node that does not know the request.
pub struct MockTransport {
    responses: HashMap<CallKey, serde_json::Value>,
    delay: Option<Duration>,
    calls: Mutex<Vec<(String, Vec<serde_json::Value>)>>,
}

impl MockTransport {
    pub fn builder() -> MockTransportBuilder {
        MockTransportBuilder {
            responses: HashMap::new(),
            delay: None,
        }
    }

    /// Every `(method, params)` pair received so far, in order.
    pub fn calls(&self) -> Vec<(String, Vec<serde_json::Value>)> {
        self.calls.lock().expect("mock call log poisoned").clone()
    }

    pub fn methods(&self) -> Vec<String> {
        self.calls().into_iter().map(|(method, _)| method).collect()
    }
}

pub struct MockTransportBuilder {
    responses: HashMap<CallKey, serde_json::Value>,
    delay: Option<Duration>,
}

impl MockTransportBuilder {
    pub fn respond(
        mut self,
        method: &str,
        params: serde_json::Value,
        result: serde_json::Value,
    ) -> Self {
        self.responses
            .insert((method.to_owned(), params.to_string()), result);
        self
    }

    /// Delay every response, for exercising call deadlines.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn build(self) -> MockTransport {
        MockTransport {
            responses: self.responses,
            delay: self.delay,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl RpcTransport for MockTransport {
    async fn call(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, CoreError> {
        self.calls
            .lock()
            .expect("mock call log poisoned")
            .push((method.to_owned(), params.clone()));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let key = (
            method.to_owned(),
            serde_json::Value::Array(params).to_string(),
        );
        self.responses.get(&key).cloned().ok_or_else(|| {
            CoreError::Rpc(RpcError::ServerError {
                code: -32601,
                message: format!("no canned response for {}{}", key.0, key.1),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn canned_response_matches_exact_params() {
        let rpc = MockTransport::builder()
            .respond("getBlockByNumber", serde_json::json!([1, true]), serde_json::json!("one"))
            .build();

        let hit = rpc
            .call("getBlockByNumber", vec![serde_json::json!(1), serde_json::json!(true)])
            .await
            .expect("canned");
        assert_eq!(hit, serde_json::json!("one"));

        let miss = rpc
            .call("getBlockByNumber", vec![serde_json::json!(1)])
            .await
            .expect_err("different params");
        assert!(matches!(miss, CoreError::Rpc(RpcError::ServerError { code: -32601, .. })));
        assert_eq!(rpc.calls().len(), 2);
    }
}
