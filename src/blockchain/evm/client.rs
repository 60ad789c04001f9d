//! EVM JSON-RPC client bound to a derived wallet.
//!
//! # Responsibilities
//! - Connect to a JSON-RPC endpoint with the signer installed as wallet
//! - Build, sign and broadcast contract-call transactions
//! - Map transport and node errors to [`RpcError`]

use std::sync::Arc;

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::TransportError;
use async_trait::async_trait;
use url::Url;

use crate::blockchain::types::{RpcError, RpcResult};

/// The subset of an EVM node the SDK talks to.
#[async_trait]
pub trait EvmRpc: Send + Sync {
    /// Sign and broadcast a call to `to` with `calldata`; returns the transaction hash.
    async fn transact(&self, to: Address, calldata: Bytes) -> RpcResult<TxHash>;
}

/// alloy HTTP provider with a local wallet.
#[derive(Clone)]
pub struct EvmClient {
    provider: Arc<dyn Provider + Send + Sync>,
    endpoint: Url,
    chain_id: u64,
    from: Address,
}

impl EvmClient {
    /// Connect to `endpoint` for `chain_id`, signing with `signer`.
    pub fn connect(endpoint: Url, chain_id: u64, signer: PrivateKeySigner) -> Self {
        let from = signer.address();
        let provider = ProviderBuilder::new()
            .wallet(signer)
            .connect_http(endpoint.clone());

        tracing::debug!(
            rpc_url = %endpoint,
            chain_id = chain_id,
            signer = %from,
            "EVM client connected"
        );

        Self {
            provider: Arc::new(provider) as Arc<dyn Provider + Send + Sync>,
            endpoint,
            chain_id,
            from,
        }
    }
}

#[async_trait]
impl EvmRpc for EvmClient {
    async fn transact(&self, to: Address, calldata: Bytes) -> RpcResult<TxHash> {
        let tx = TransactionRequest::default()
            .with_from(self.from)
            .with_to(to)
            .with_input(calldata)
            .with_chain_id(self.chain_id);

        let pending = self.provider.send_transaction(tx).await.map_err(map_transport_error)?;
        Ok(*pending.tx_hash())
    }
}

fn map_transport_error(error: TransportError) -> RpcError {
    match error.as_error_resp() {
        Some(payload) => RpcError::Rpc(payload.message.to_string()),
        None => RpcError::Transport(error.to_string()),
    }
}

impl std::fmt::Debug for EvmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvmClient")
            .field("rpc_url", &self.endpoint.as_str())
            .field("chain_id", &self.chain_id)
            .field("signer", &self.from)
            .finish()
    }
}
