use crate::error::{CoreError, RpcError};

#[derive(serde::Serialize)]
pub(super) struct JsonRpcRequest<'a> {
    pub(super) jsonrpc: &'static str,
    pub(super) id: u64,
    pub(super) method: &'a str,
    pub(super) params: Vec<serde_json::Value>,
}

#[derive(serde::Deserialize)]
pub(super) struct JsonRpcResponse {
    #[serde(default)]
    pub(super) id: serde_json::Value,
    pub(super) result: Option<serde_json::Value>,
    pub(super) error: Option<serde_json::Value>,
}

/// Parse a JSON-RPC error value into a structured `CoreError`.
///
/// JSON-RPC 2.0 defines errors as `{"code": <int>, "message": <string>}`.
/// If the error value matches that shape, we produce a `ServerError`;
/// otherwise we fall back to `InvalidResponse` with the raw JSON.
pub(super) fn parse_jsonrpc_error(err: serde_json::Value) -> CoreError {
    #[derive(serde::Deserialize)]
    struct JsonRpcError {
        code: i64,
        message: String,
    }

    if let Ok(parsed) = serde_json::from_value::<JsonRpcError>(err.clone()) {
        CoreError::Rpc(RpcError::ServerError {
            code: parsed.code,
            message: parsed.message,
        })
    } else {
        CoreError::Rpc(RpcError::InvalidResponse(format!(
            "non-standard JSON-RPC error: {err}"
        )))
    }
}

/// Accept the response id as a number or a numeric string; `null` is
/// tolerated since some nodes omit it on errors.
pub(super) fn check_response_id(expected: u64, id: &serde_json::Value) -> Result<(), CoreError> {
    let got = match id {
        serde_json::Value::Null => return Ok(()),
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.parse::<u64>().ok(),
        _ => None,
    };
    match got {
        Some(got) if got == expected => Ok(()),
        _ => Err(RpcError::InvalidResponse(format!(
            "response id {id} does not match request id {expected}"
        ))
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_is_structured() {
        let err = parse_jsonrpc_error(serde_json::json!({
            "code": -32601,
            "message": "Method not found"
        }));
        assert!(matches!(
            err,
            CoreError::Rpc(RpcError::ServerError { code: -32601, ref message }) if message == "Method not found"
        ));
    }

    #[test]
    fn non_standard_error_is_invalid_response() {
        let err = parse_jsonrpc_error(serde_json::json!("boom"));
        assert!(matches!(err, CoreError::Rpc(RpcError::InvalidResponse(_))));
    }

    #[test]
    fn response_id_number_or_string() {
        assert!(check_response_id(42, &serde_json::json!(42)).is_ok());
        assert!(check_response_id(123, &serde_json::json!("123")).is_ok());
        assert!(check_response_id(7, &serde_json::Value::Null).is_ok());
    }

    #[test]
    fn response_id_mismatch() {
        assert!(check_response_id(1, &serde_json::json!(2)).is_err());
        assert!(check_response_id(1, &serde_json::json!(true)).is_err());
    }
}
