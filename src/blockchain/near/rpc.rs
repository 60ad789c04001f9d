//! NEAR JSON-RPC client.
//!
//! # Responsibilities
//! - Read-only contract views (`query` / `call_function`)
//! - Signed function-call transactions (`view_access_key` → sign → `broadcast_tx_commit`)
//! - Map node, contract and execution failures to [`RpcError`]
//!
//! One request per call; no retries and no client-side timeout.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

use crate::blockchain::near::transaction::{Action, FunctionCallAction, NearSigner, PublicKey, Transaction};
use crate::blockchain::types::{RpcError, RpcResult};

/// A state-changing function call to submit.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub receiver_id: String,
    pub method_name: String,
    pub args: Value,
    pub gas: u64,
    pub deposit: u128,
}

/// Outcome of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub transaction_hash: String,
}

/// The subset of a NEAR node the SDK talks to.
#[async_trait]
pub trait NearRpc: Send + Sync {
    /// Call a view method; the returned bytes are parsed as JSON (empty → null).
    async fn view_function(&self, contract_id: &str, method_name: &str, args: &Value) -> RpcResult<Value>;

    /// Sign with `signer` and submit a single function call.
    async fn function_call(&self, signer: &NearSigner, call: FunctionCall) -> RpcResult<ExecutionOutcome>;
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    result: Option<Value>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    name: Option<String>,
    cause: Option<ErrorCause>,
    message: Option<String>,
    data: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ErrorCause {
    name: String,
}

impl JsonRpcError {
    fn describe(&self) -> String {
        let kind = self
            .cause
            .as_ref()
            .map(|c| c.name.clone())
            .or_else(|| self.name.clone())
            .unwrap_or_else(|| "UNKNOWN".to_string());
        let detail = match &self.data {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => self.message.clone().unwrap_or_default(),
        };
        format!("{}: {}", kind, detail)
    }
}

#[derive(Debug, Deserialize)]
struct CallFunctionView {
    result: Option<Vec<u8>>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AccessKeyView {
    #[serde(default)]
    nonce: u64,
    #[serde(default)]
    block_hash: String,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FinalOutcomeView {
    status: Value,
    transaction: TransactionView,
}

#[derive(Debug, Deserialize)]
struct TransactionView {
    hash: String,
}

/// HTTP JSON-RPC client for a single NEAR endpoint.
#[derive(Clone)]
pub struct NearJsonRpcClient {
    http: reqwest::Client,
    url: Url,
}

impl NearJsonRpcClient {
    pub fn new(url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            url,
        }
    }

    async fn request(&self, method: &str, params: Value) -> RpcResult<Value> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": "dontcare",
            "method": method,
            "params": params,
        });

        let response = self
            .http
            .post(self.url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| RpcError::Transport(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RpcError::Transport(e.to_string()))?;

        let parsed: JsonRpcResponse = serde_json::from_str(&text).map_err(|e| {
            if status.is_success() {
                RpcError::Decode(e.to_string())
            } else {
                RpcError::Transport(format!("HTTP {}: {}", status, text))
            }
        })?;

        if let Some(error) = parsed.error {
            return Err(RpcError::Rpc(error.describe()));
        }
        parsed
            .result
            .ok_or_else(|| RpcError::Decode(format!("'{}' response has no result", method)))
    }

    async fn access_key(&self, signer: &NearSigner) -> RpcResult<AccessKeyView> {
        let result = self
            .request(
                "query",
                json!({
                    "request_type": "view_access_key",
                    "finality": "final",
                    "account_id": signer.account_id(),
                    "public_key": signer.public_key(),
                }),
            )
            .await?;

        let view: AccessKeyView = serde_json::from_value(result).map_err(|e| RpcError::Decode(e.to_string()))?;
        if let Some(error) = view.error {
            return Err(RpcError::Rpc(error));
        }
        Ok(view)
    }
}

#[async_trait]
impl NearRpc for NearJsonRpcClient {
    async fn view_function(&self, contract_id: &str, method_name: &str, args: &Value) -> RpcResult<Value> {
        let args_base64 = STANDARD.encode(serde_json::to_vec(args).map_err(|e| RpcError::InvalidInput(e.to_string()))?);
        let result = self
            .request(
                "query",
                json!({
                    "request_type": "call_function",
                    "finality": "final",
                    "account_id": contract_id,
                    "method_name": method_name,
                    "args_base64": args_base64,
                }),
            )
            .await?;

        let view: CallFunctionView = serde_json::from_value(result).map_err(|e| RpcError::Decode(e.to_string()))?;
        if let Some(error) = view.error {
            return Err(RpcError::Contract(error));
        }

        match view.result {
            Some(bytes) if !bytes.is_empty() => {
                serde_json::from_slice(&bytes).map_err(|e| RpcError::Decode(e.to_string()))
            }
            _ => Ok(Value::Null),
        }
    }

    async fn function_call(&self, signer: &NearSigner, call: FunctionCall) -> RpcResult<ExecutionOutcome> {
        let access_key = self.access_key(signer).await?;

        let block_hash: [u8; 32] = bs58::decode(&access_key.block_hash)
            .into_vec()
            .ok()
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or_else(|| RpcError::Decode(format!("invalid block hash '{}'", access_key.block_hash)))?;
        let args = serde_json::to_vec(&call.args).map_err(|e| RpcError::InvalidInput(e.to_string()))?;

        let transaction = Transaction {
            signer_id: signer.account_id().to_string(),
            public_key: PublicKey::Ed25519(signer.public_key_bytes()),
            nonce: access_key.nonce + 1,
            receiver_id: call.receiver_id,
            block_hash,
            actions: vec![Action::FunctionCall(FunctionCallAction {
                method_name: call.method_name,
                args,
                gas: call.gas,
                deposit: call.deposit,
            })],
        };
        let signed = transaction
            .sign(signer)
            .map_err(|e| RpcError::InvalidInput(format!("transaction encoding failed: {}", e)))?;
        let encoded = signed
            .to_bytes()
            .map_err(|e| RpcError::InvalidInput(format!("transaction encoding failed: {}", e)))?;

        tracing::debug!(
            signer = %signer.account_id(),
            receiver = %signed.transaction.receiver_id,
            tx_hash = %signed.hash(),
            "Broadcasting transaction"
        );

        let result = self
            .request("broadcast_tx_commit", json!([STANDARD.encode(encoded)]))
            .await?;
        let outcome: FinalOutcomeView = serde_json::from_value(result).map_err(|e| RpcError::Decode(e.to_string()))?;

        if let Some(failure) = outcome.status.get("Failure") {
            return Err(RpcError::Execution(failure.to_string()));
        }

        Ok(ExecutionOutcome {
            transaction_hash: outcome.transaction.hash,
        })
    }
}

impl std::fmt::Debug for NearJsonRpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NearJsonRpcClient")
            .field("url", &self.url.as_str())
            .finish()
    }
}
