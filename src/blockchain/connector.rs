//! Factory seam between the dispatchers and the chain clients.

use std::sync::Arc;

use alloy::signers::local::PrivateKeySigner;
use url::Url;

use crate::blockchain::evm::{EvmClient, EvmRpc};
use crate::blockchain::near::{NearJsonRpcClient, NearRpc};
use crate::blockchain::types::RpcResult;

/// Builds chain clients for resolved endpoints.
pub trait ChainConnector: Send + Sync {
    /// NEAR client for `endpoint`.
    fn near(&self, endpoint: &Url) -> RpcResult<Arc<dyn NearRpc>>;

    /// EVM client for `endpoint` and `chain_id`, signing with `signer`.
    fn evm(&self, endpoint: &Url, chain_id: u64, signer: PrivateKeySigner) -> RpcResult<Arc<dyn EvmRpc>>;
}

/// Connector producing HTTP JSON-RPC clients.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpConnector;

impl ChainConnector for HttpConnector {
    fn near(&self, endpoint: &Url) -> RpcResult<Arc<dyn NearRpc>> {
        Ok(Arc::new(NearJsonRpcClient::new(endpoint.clone())))
    }

    fn evm(&self, endpoint: &Url, chain_id: u64, signer: PrivateKeySigner) -> RpcResult<Arc<dyn EvmRpc>> {
        Ok(Arc::new(EvmClient::connect(endpoint.clone(), chain_id, signer)))
    }
}
