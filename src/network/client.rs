//! JSON-RPC provider - `query` calls against a NEAR RPC node

use async_trait::async_trait;
use base64::Engine;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::error::{GuestbookError, Result};

/// Read-only chain queries used by the guest book
#[async_trait]
pub trait RpcProvider: Send + Sync {
    /// `view_account` at `final` finality; returns the account view object
    async fn view_account(&self, account_id: &str) -> Result<Map<String, Value>>;

    /// `call_function` at `optimistic` finality; returns the raw result bytes
    async fn call_function(
        &self,
        account_id: &str,
        method_name: &str,
        args_base64: &str,
    ) -> Result<Vec<u8>>;
}

/// Parameters of the `query` RPC method
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "request_type", rename_all = "snake_case")]
pub enum QueryRequest {
    ViewAccount {
        finality: &'static str,
        account_id: String,
    },
    CallFunction {
        finality: &'static str,
        account_id: String,
        method_name: String,
        args_base64: String,
    },
}

/// HTTP JSON-RPC provider bound to one node URL
#[derive(Clone)]
pub struct JsonRpcProvider {
    client: reqwest::Client,
    url: String,
}

impl JsonRpcProvider {
    pub fn new(url: impl Into<String>) -> Self {
        JsonRpcProvider {
            client: create_client(),
            url: url.into(),
        }
    }

    /// Send a `query` and return its `result` member
    pub async fn query(&self, request: &QueryRequest) -> Result<Value> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": "dontcare",
            "method": "query",
            "params": request,
        });

        let resp = self.client.post(&self.url).json(&body).send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() && text.is_empty() {
            return Err(GuestbookError::transport(format!("HTTP {}", status.as_u16())));
        }

        parse_rpc_response(&text)
    }
}

#[async_trait]
impl RpcProvider for JsonRpcProvider {
    async fn view_account(&self, account_id: &str) -> Result<Map<String, Value>> {
        let result = self
            .query(&QueryRequest::ViewAccount {
                finality: "final",
                account_id: account_id.to_string(),
            })
            .await?;

        match result {
            Value::Object(map) => Ok(map),
            other => Err(GuestbookError::decode(format!(
                "view_account returned {}",
                type_name(&other)
            ))),
        }
    }

    async fn call_function(
        &self,
        account_id: &str,
        method_name: &str,
        args_base64: &str,
    ) -> Result<Vec<u8>> {
        let result = self
            .query(&QueryRequest::CallFunction {
                finality: "optimistic",
                account_id: account_id.to_string(),
                method_name: method_name.to_string(),
                args_base64: args_base64.to_string(),
            })
            .await?;

        extract_result_bytes(&result)
    }
}

/// Unwrap a JSON-RPC envelope, mapping RPC errors to `Transport`
pub fn parse_rpc_response(body: &str) -> Result<Value> {
    let envelope: Value = serde_json::from_str(body)
        .map_err(|e| GuestbookError::transport(format!("Malformed RPC response: {}", e)))?;

    if let Some(error) = envelope.get("error") {
        return Err(GuestbookError::transport(describe_rpc_error(error)));
    }

    let result = envelope
        .get("result")
        .cloned()
        .ok_or_else(|| GuestbookError::transport("RPC response has no result"))?;

    // Older nodes report query failures inside `result`
    if let Some(error) = result.get("error") {
        return Err(GuestbookError::transport(describe_rpc_error(error)));
    }

    Ok(result)
}

/// `call_function` results are a JSON array of byte values
pub fn extract_result_bytes(result: &Value) -> Result<Vec<u8>> {
    let items = result
        .get("result")
        .and_then(Value::as_array)
        .ok_or_else(|| GuestbookError::decode("call_function result is not a byte array"))?;

    items
        .iter()
        .map(|v| {
            v.as_u64()
                .and_then(|b| u8::try_from(b).ok())
                .ok_or_else(|| GuestbookError::decode(format!("invalid byte {}", v)))
        })
        .collect()
}

/// Encode view-call arguments; `Null` means no arguments
pub fn encode_args(args: &Value) -> String {
    if args.is_null() {
        String::new()
    } else {
        base64::engine::general_purpose::STANDARD.encode(args.to_string())
    }
}

fn describe_rpc_error(error: &Value) -> String {
    if let Some(text) = error.as_str() {
        return text.to_string();
    }
    let cause = error
        .pointer("/cause/name")
        .or_else(|| error.get("name"))
        .and_then(Value::as_str);
    let detail = error
        .get("data")
        .or_else(|| error.get("message"))
        .map(|d| d.as_str().map(str::to_string).unwrap_or_else(|| d.to_string()));

    match (cause, detail) {
        (Some(cause), Some(detail)) => format!("{}: {}", cause, detail),
        (Some(cause), None) => cause.to_string(),
        (None, Some(detail)) => detail,
        (None, None) => error.to_string(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Create an HTTP client with default configuration
pub fn create_client() -> reqwest::Client {
    use std::time::Duration;

    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_shape() {
        let params = serde_json::to_value(QueryRequest::CallFunction {
            finality: "optimistic",
            account_id: "guest-book.testnet".into(),
            method_name: "getMessages".into(),
            args_base64: String::new(),
        })
        .unwrap();
        assert_eq!(
            params,
            json!({
                "request_type": "call_function",
                "finality": "optimistic",
                "account_id": "guest-book.testnet",
                "method_name": "getMessages",
                "args_base64": ""
            })
        );

        let params = serde_json::to_value(QueryRequest::ViewAccount {
            finality: "final",
            account_id: "alice".into(),
        })
        .unwrap();
        assert_eq!(params["request_type"], "view_account");
        assert_eq!(params["finality"], "final");
    }

    #[test]
    fn test_parse_rpc_success() {
        let body = r#"{"jsonrpc":"2.0","id":"dontcare","result":{"amount":"500","block_height":1}}"#;
        let result = parse_rpc_response(body).unwrap();
        assert_eq!(result["amount"], "500");
    }

    #[test]
    fn test_parse_rpc_errors() {
        let top_level = r#"{"jsonrpc":"2.0","id":"dontcare","error":{"name":"HANDLER_ERROR","cause":{"name":"UNKNOWN_ACCOUNT"},"data":"nobody"}}"#;
        let err = parse_rpc_response(top_level).unwrap_err();
        assert_eq!(err, GuestbookError::Transport("UNKNOWN_ACCOUNT: nobody".into()));

        let nested = r#"{"jsonrpc":"2.0","id":"dontcare","result":{"error":"wasm execution failed","logs":[]}}"#;
        let err = parse_rpc_response(nested).unwrap_err();
        assert_eq!(err, GuestbookError::Transport("wasm execution failed".into()));

        assert!(matches!(parse_rpc_response("<html>"), Err(GuestbookError::Transport(_))));
    }

    #[test]
    fn test_extract_result_bytes() {
        let result = json!({ "result": [91, 93], "logs": [] });
        assert_eq!(extract_result_bytes(&result).unwrap(), b"[]".to_vec());

        let bad = json!({ "result": [300] });
        assert!(matches!(extract_result_bytes(&bad), Err(GuestbookError::Decode(_))));
    }

    #[test]
    fn test_encode_args() {
        assert_eq!(encode_args(&Value::Null), "");
        assert_eq!(encode_args(&json!({"a":1})), "eyJhIjoxfQ==");
    }
}
