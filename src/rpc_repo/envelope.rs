// JSON-RPC 2.0 request/response envelope

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::UpstreamError;

#[derive(Debug, Serialize)]
pub(super) struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<&'a Value>,
}

impl<'a> RpcRequest<'a> {
    pub fn new(id: u64, method: &'a str, params: &'a Value) -> Self {
        let params = match params {
            Value::Null => None,
            Value::Array(a) if a.is_empty() => None,
            p => Some(p),
        };
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }
}

/// Decodes a response body: `error` wins over `result`; a missing `result` is malformed.
pub(super) fn decode_response<T: DeserializeOwned>(body: &[u8]) -> Result<T, UpstreamError> {
    let envelope: serde_json::Map<String, Value> = serde_json::from_slice(body)
        .map_err(|e| UpstreamError::Malformed(format!("not a JSON-RPC envelope: {}", e)))?;

    if let Some(err) = envelope.get("error").filter(|e| !e.is_null()) {
        let code = err.get("code").and_then(Value::as_i64).unwrap_or(0);
        let message = err
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        return Err(UpstreamError::Rejected { code, message });
    }

    let Some(result) = envelope.get("result") else {
        return Err(UpstreamError::Malformed("missing result".into()));
    };
    T::deserialize(result).map_err(|e| UpstreamError::Malformed(format!("result: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_params_are_omitted() {
        let params = json!([]);
        let req = RpcRequest::new(1, "getSlot", &params);
        let s = serde_json::to_string(&req).unwrap();
        assert_eq!(s, r#"{"jsonrpc":"2.0","id":1,"method":"getSlot"}"#);
    }

    #[test]
    fn decodes_result() {
        let slot: u64 = decode_response(br#"{"jsonrpc":"2.0","id":1,"result":42}"#).unwrap();
        assert_eq!(slot, 42);
    }

    #[test]
    fn error_object_is_rejected() {
        let err = decode_response::<u64>(
            br#"{"jsonrpc":"2.0","id":1,"error":{"code":-32602,"message":"Invalid param"}}"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            UpstreamError::Rejected {
                code: -32602,
                message: "Invalid param".into()
            }
        );
    }

    #[test]
    fn wrong_shapes_are_malformed() {
        assert!(matches!(
            decode_response::<u64>(b"<html>"),
            Err(UpstreamError::Malformed(_))
        ));
        assert!(matches!(
            decode_response::<u64>(br#"{"jsonrpc":"2.0","id":1}"#),
            Err(UpstreamError::Malformed(_))
        ));
        assert!(matches!(
            decode_response::<u64>(br#"{"jsonrpc":"2.0","id":1,"result":"x"}"#),
            Err(UpstreamError::Malformed(_))
        ));
    }
}
