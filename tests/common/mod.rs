//! Shared mocks for integration tests.
//!
//! - [`MockNearNode`]: an axum JSON-RPC server speaking enough of the NEAR
//!   protocol for views and `broadcast_tx_commit`; submitted transactions are
//!   decoded and recorded.
//! - [`RecordingConnector`]: hands out in-memory chain clients and records
//!   every connection, so tests can assert that no I/O happened.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, Bytes, TxHash};
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use borsh::BorshDeserialize;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use tokio::net::TcpListener;
use url::Url;

use pause_sdk::blockchain::evm::{EvmRpc, PausableCall};
use pause_sdk::blockchain::near::{ExecutionOutcome, FunctionCall, NearRpc, NearSigner};
use pause_sdk::blockchain::{ChainConnector, RpcError, RpcResult};

/// Block hash the mock node hands out with access keys.
pub const MOCK_BLOCK_HASH: [u8; 32] = [7; 32];

/// Nonce of every access key on the mock node.
pub const MOCK_NONCE: u64 = 41;

/// A function call decoded from a submitted transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedCall {
    pub signer_id: String,
    pub public_key: String,
    pub nonce: u64,
    pub receiver_id: String,
    pub block_hash: [u8; 32],
    pub method_name: String,
    pub args: Value,
    pub gas: u64,
    pub deposit: u128,
    pub signature_valid: bool,
}

#[derive(Default)]
struct NodeState {
    views: Mutex<HashMap<String, Value>>,
    view_calls: Mutex<Vec<(String, String)>>,
    access_key_requests: Mutex<Vec<(String, String)>>,
    submitted: Mutex<Vec<SubmittedCall>>,
    fail_execution: AtomicBool,
}

/// Mock NEAR JSON-RPC node on an ephemeral local port.
pub struct MockNearNode {
    pub url: String,
    state: Arc<NodeState>,
}

impl MockNearNode {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(NodeState::default());

        let app = Router::new()
            .route("/", post(handle_rpc))
            .with_state(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{}", addr),
            state,
        }
    }

    /// Make `method` a view returning `value` on every contract.
    pub fn set_view(&self, method: &str, value: Value) {
        self.state.views.lock().unwrap().insert(method.to_string(), value);
    }

    /// Report every submitted transaction as failed.
    pub fn fail_execution(&self) {
        self.state.fail_execution.store(true, Ordering::SeqCst);
    }

    pub fn submitted(&self) -> Vec<SubmittedCall> {
        self.state.submitted.lock().unwrap().clone()
    }

    /// (contract, method) of every view call, in order.
    pub fn view_calls(&self) -> Vec<(String, String)> {
        self.state.view_calls.lock().unwrap().clone()
    }

    /// (account, public key) of every access-key lookup.
    pub fn access_key_requests(&self) -> Vec<(String, String)> {
        self.state.access_key_requests.lock().unwrap().clone()
    }
}

async fn handle_rpc(State(state): State<Arc<NodeState>>, Json(body): Json<Value>) -> Json<Value> {
    let id = body["id"].clone();
    let params = &body["params"];

    let outcome = match body["method"].as_str() {
        Some("query") => match params["request_type"].as_str() {
            Some("view_access_key") => Ok(access_key(&state, params)),
            Some("call_function") => Ok(call_function(&state, params)),
            _ => Err(rpc_error("UNSUPPORTED_REQUEST", "unsupported query")),
        },
        Some("broadcast_tx_commit") => broadcast(&state, params),
        _ => Err(rpc_error("METHOD_NOT_FOUND", "Method not found")),
    };

    Json(match outcome {
        Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
        Err(error) => json!({ "jsonrpc": "2.0", "id": id, "error": error }),
    })
}

fn rpc_error(cause: &str, message: &str) -> Value {
    json!({
        "name": "REQUEST_VALIDATION_ERROR",
        "cause": { "name": cause, "info": {} },
        "code": -32600,
        "message": message,
        "data": message,
    })
}

fn access_key(state: &NodeState, params: &Value) -> Value {
    state.access_key_requests.lock().unwrap().push((
        params["account_id"].as_str().unwrap_or_default().to_string(),
        params["public_key"].as_str().unwrap_or_default().to_string(),
    ));

    json!({
        "nonce": MOCK_NONCE,
        "permission": "FullAccess",
        "block_height": 100,
        "block_hash": bs58::encode(MOCK_BLOCK_HASH).into_string(),
    })
}

fn call_function(state: &NodeState, params: &Value) -> Value {
    let account_id = params["account_id"].as_str().unwrap_or_default().to_string();
    let method = params["method_name"].as_str().unwrap_or_default().to_string();
    state.view_calls.lock().unwrap().push((account_id, method.clone()));

    // Missing methods are reported the legacy way, inside `result`.
    match state.views.lock().unwrap().get(&method) {
        Some(value) => json!({
            "result": serde_json::to_vec(value).unwrap(),
            "logs": [],
            "block_height": 100,
        }),
        None => json!({
            "error": "wasm execution failed with error: MethodResolveError(MethodNotFound)",
            "logs": [],
            "block_height": 100,
        }),
    }
}

fn broadcast(state: &NodeState, params: &Value) -> Result<Value, Value> {
    let encoded = params[0]
        .as_str()
        .ok_or_else(|| rpc_error("PARSE_ERROR", "missing transaction"))?;
    let raw = STANDARD
        .decode(encoded)
        .map_err(|_| rpc_error("PARSE_ERROR", "transaction is not base64"))?;
    let (call, tx_len) =
        decode_signed_transaction(&raw).ok_or_else(|| rpc_error("PARSE_ERROR", "malformed transaction"))?;

    let hash = bs58::encode(Sha256::digest(&raw[..tx_len])).into_string();
    state.submitted.lock().unwrap().push(call);

    let status = if state.fail_execution.load(Ordering::SeqCst) {
        json!({
            "Failure": {
                "ActionError": {
                    "index": 0,
                    "kind": { "FunctionCallError": { "ExecutionError": "Smart contract panicked: not authorized" } }
                }
            }
        })
    } else {
        json!({ "SuccessValue": "" })
    };

    Ok(json!({
        "status": status,
        "transaction": { "hash": hash },
        "transaction_outcome": {},
        "receipts_outcome": [],
    }))
}

/// Node-side view of a signed transaction (`SignedTransaction` / `TransactionV0`).
#[derive(BorshDeserialize)]
struct WireSignedTransaction {
    transaction: WireTransaction,
    signature: WireSignature,
}

#[derive(BorshDeserialize)]
struct WireTransaction {
    signer_id: String,
    public_key: WirePublicKey,
    nonce: u64,
    receiver_id: String,
    block_hash: [u8; 32],
    actions: Vec<WireAction>,
}

#[derive(BorshDeserialize)]
enum WirePublicKey {
    Ed25519([u8; 32]),
}

#[derive(BorshDeserialize)]
enum WireSignature {
    Ed25519([u8; 64]),
}

#[derive(BorshDeserialize)]
enum WireAction {
    CreateAccount,
    DeployContract { code: Vec<u8> },
    FunctionCall {
        method_name: String,
        args: Vec<u8>,
        gas: u64,
        deposit: u128,
    },
}

/// Decode a signed single-FunctionCall transaction; returns the call and the
/// length of the unsigned part.
fn decode_signed_transaction(raw: &[u8]) -> Option<(SubmittedCall, usize)> {
    let signed: WireSignedTransaction = borsh::from_slice(raw).ok()?;
    let tx = signed.transaction;
    // Unsigned part, then the signature's key tag and 64 bytes.
    let tx_len = raw.len().checked_sub(65)?;

    let [WireAction::FunctionCall {
        method_name,
        args,
        gas,
        deposit,
    }] = <[WireAction; 1]>::try_from(tx.actions).ok()?
    else {
        return None;
    };

    let WirePublicKey::Ed25519(public_key) = tx.public_key;
    let WireSignature::Ed25519(signature) = signed.signature;
    let signature_valid = VerifyingKey::from_bytes(&public_key)
        .map(|key| {
            key.verify(&Sha256::digest(&raw[..tx_len]), &Signature::from_bytes(&signature))
                .is_ok()
        })
        .unwrap_or(false);

    let call = SubmittedCall {
        signer_id: tx.signer_id,
        public_key: format!("ed25519:{}", bs58::encode(public_key).into_string()),
        nonce: tx.nonce,
        receiver_id: tx.receiver_id,
        block_hash: tx.block_hash,
        method_name,
        args: serde_json::from_slice(&args).ok()?,
        gas,
        deposit,
        signature_valid,
    };
    Some((call, tx_len))
}

/// In-memory NEAR client.
#[derive(Default)]
pub struct MockNearRpc {
    views: Mutex<HashMap<String, Value>>,
    view_calls: Mutex<Vec<(String, String, Value)>>,
    function_calls: Mutex<Vec<(String, FunctionCall)>>,
    call_failure: Mutex<Option<RpcError>>,
}

impl MockNearRpc {
    pub fn with_view(self, method: &str, value: Value) -> Self {
        self.views.lock().unwrap().insert(method.to_string(), value);
        self
    }

    pub fn fail_calls_with(self, error: RpcError) -> Self {
        *self.call_failure.lock().unwrap() = Some(error);
        self
    }

    /// (contract, method, args) of every view call, in order.
    pub fn view_calls(&self) -> Vec<(String, String, Value)> {
        self.view_calls.lock().unwrap().clone()
    }

    /// (signer account, call) of every submitted call.
    pub fn function_calls(&self) -> Vec<(String, FunctionCall)> {
        self.function_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NearRpc for MockNearRpc {
    async fn view_function(&self, contract_id: &str, method_name: &str, args: &Value) -> RpcResult<Value> {
        self.view_calls.lock().unwrap().push((
            contract_id.to_string(),
            method_name.to_string(),
            args.clone(),
        ));
        self.views
            .lock()
            .unwrap()
            .get(method_name)
            .cloned()
            .ok_or_else(|| RpcError::Contract(format!("MethodNotFound: {}", method_name)))
    }

    async fn function_call(&self, signer: &NearSigner, call: FunctionCall) -> RpcResult<ExecutionOutcome> {
        self.function_calls
            .lock()
            .unwrap()
            .push((signer.account_id().to_string(), call));
        match self.call_failure.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(ExecutionOutcome {
                transaction_hash: "mock-near-tx".to_string(),
            }),
        }
    }
}

/// In-memory EVM client.
#[derive(Default)]
pub struct MockEvmRpc {
    sent: Mutex<Vec<(Address, Bytes)>>,
    failure: Mutex<Option<RpcError>>,
}

impl MockEvmRpc {
    pub fn failing_with(error: RpcError) -> Self {
        let rpc = Self::default();
        *rpc.failure.lock().unwrap() = Some(error);
        rpc
    }

    /// (contract, decoded call) of every transaction, in order.
    pub fn sent_calls(&self) -> Vec<(Address, Option<PausableCall>)> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(to, data)| (*to, PausableCall::from_calldata(data)))
            .collect()
    }
}

#[async_trait]
impl EvmRpc for MockEvmRpc {
    async fn transact(&self, to: Address, calldata: Bytes) -> RpcResult<TxHash> {
        self.sent.lock().unwrap().push((to, calldata));
        match self.failure.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(TxHash::repeat_byte(0x11)),
        }
    }
}

/// Connector handing out the given mocks and recording every connection.
pub struct RecordingConnector {
    pub near_rpc: Arc<MockNearRpc>,
    pub evm_rpc: Arc<MockEvmRpc>,
    near_endpoints: Mutex<Vec<Url>>,
    evm_connections: Mutex<Vec<(Url, u64, Address)>>,
}

impl RecordingConnector {
    pub fn new(near_rpc: MockNearRpc, evm_rpc: MockEvmRpc) -> Self {
        Self {
            near_rpc: Arc::new(near_rpc),
            evm_rpc: Arc::new(evm_rpc),
            near_endpoints: Mutex::new(Vec::new()),
            evm_connections: Mutex::new(Vec::new()),
        }
    }

    pub fn near_endpoints(&self) -> Vec<Url> {
        self.near_endpoints.lock().unwrap().clone()
    }

    /// (endpoint, chain id, signer address) of every EVM connection.
    pub fn evm_connections(&self) -> Vec<(Url, u64, Address)> {
        self.evm_connections.lock().unwrap().clone()
    }

    pub fn connection_count(&self) -> usize {
        self.near_endpoints.lock().unwrap().len() + self.evm_connections.lock().unwrap().len()
    }
}

impl Default for RecordingConnector {
    fn default() -> Self {
        Self::new(MockNearRpc::default(), MockEvmRpc::default())
    }
}

impl ChainConnector for RecordingConnector {
    fn near(&self, endpoint: &Url) -> RpcResult<Arc<dyn NearRpc>> {
        self.near_endpoints.lock().unwrap().push(endpoint.clone());
        let rpc: Arc<dyn NearRpc> = self.near_rpc.clone();
        Ok(rpc)
    }

    fn evm(&self, endpoint: &Url, chain_id: u64, signer: PrivateKeySigner) -> RpcResult<Arc<dyn EvmRpc>> {
        self.evm_connections
            .lock()
            .unwrap()
            .push((endpoint.clone(), chain_id, signer.address()));
        let rpc: Arc<dyn EvmRpc> = self.evm_rpc.clone();
        Ok(rpc)
    }
}
