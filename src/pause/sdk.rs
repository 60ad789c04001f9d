//! The public pause / unpause / is-pausable operations.

use std::sync::Arc;

use url::Url;

use crate::blockchain::classifier::{ChainClassifier, ChainRegistry};
use crate::blockchain::connector::{ChainConnector, HttpConnector};
use crate::blockchain::endpoint::EndpointResolver;
use crate::blockchain::evm::PausableCall;
use crate::blockchain::keystore::KeyStore;
use crate::blockchain::types::{ChainDescriptor, ChainIdArg, NetworkId, RpcError};
use crate::blockchain::wallet::{Credential, KeyDeriver};
use crate::config::schema::{NearConfig, PauseConfig};
use crate::observability::metrics;
use crate::pause::error::PauseSdkError;
use crate::pause::evm::EvmDispatcher;
use crate::pause::near::NearDispatcher;
use crate::pause::probe::{self, PauseStateProbe};
use crate::pause::request::{PausableQuery, PauseRequest, UnpauseRequest};

/// The key an operation would sign with, for operators to fund or authorise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerInfo {
    pub derivation_path: String,
    pub public_key: String,
    /// EVM address or NEAR implicit account id.
    pub account: String,
}

/// Entry point for pause operations across EVM and NEAR chains.
///
/// Registries are read-only after construction. The only shared mutable
/// state is the injected [`KeyStore`].
pub struct PauseSdk {
    registry: ChainRegistry,
    deriver: KeyDeriver,
    near: NearConfig,
    key_store: Arc<KeyStore>,
    connector: Arc<dyn ChainConnector>,
}

impl PauseSdk {
    /// SDK talking to real nodes over HTTP.
    pub fn new(config: &PauseConfig) -> Self {
        Self::with_connector(config, Arc::new(HttpConnector))
    }

    pub fn with_connector(config: &PauseConfig, connector: Arc<dyn ChainConnector>) -> Self {
        Self {
            registry: ChainRegistry::from_config(config),
            deriver: KeyDeriver::from_config(config),
            near: config.near.clone(),
            key_store: Arc::new(KeyStore::new()),
            connector,
        }
    }

    /// Share a key store with other SDK instances.
    pub fn with_key_store(mut self, key_store: Arc<KeyStore>) -> Self {
        self.key_store = key_store;
        self
    }

    pub fn key_store(&self) -> &Arc<KeyStore> {
        &self.key_store
    }

    pub fn registry(&self) -> &ChainRegistry {
        &self.registry
    }

    /// Pause a contract. Returns the transaction hash.
    pub async fn pause(&self, request: &PauseRequest) -> Result<String, PauseSdkError> {
        let network = request.network_id();
        let result = self.dispatch_pause(request).await;
        finish("pause", network, &result);
        result
    }

    /// Unpause a `Pausable` contract on an EVM chain. Returns the transaction hash.
    pub async fn unpause(&self, request: &UnpauseRequest) -> Result<String, PauseSdkError> {
        let result = self.dispatch_unpause(request).await;
        finish("unpause", request.network_id, &result);
        result
    }

    /// Whether the contract exposes a recognised pause mechanism.
    ///
    /// Only invalid parameters are reported as errors; every probe failure
    /// resolves to a boolean.
    pub async fn is_pausable(&self, query: &PausableQuery) -> Result<bool, PauseSdkError> {
        let result = self.probe(query).await;
        finish("is_pausable", query.network_id, &result);
        result
    }

    /// Derive the signing identity for a chain without submitting anything.
    pub fn signer_info(
        &self,
        network: NetworkId,
        chain_id: &ChainIdArg,
        derivation_path: Option<&str>,
    ) -> Result<SignerInfo, PauseSdkError> {
        let chain = self.classify(network, chain_id)?;
        let credential = self.deriver.derive_for_chain(&chain, derivation_path)?;

        let account = match (credential.evm_address(), credential.implicit_account_id()) {
            (Some(address), _) => address.to_string(),
            (None, Some(account)) => account,
            (None, None) => return Err(PauseSdkError::invalid("credential has no account identity")),
        };

        Ok(SignerInfo {
            derivation_path: credential.derivation_path().to_string(),
            public_key: credential.public_key(),
            account,
        })
    }

    async fn dispatch_pause(&self, request: &PauseRequest) -> Result<String, PauseSdkError> {
        match request {
            PauseRequest::Evm(evm) => {
                let chain = self.guard(NetworkId::Ethereum, &evm.chain_id, &evm.account_id, None)?;
                self.evm_call(&chain, &evm.account_id, PausableCall::Pause).await
            }
            PauseRequest::Near(near) => {
                let chain = self.guard(NetworkId::Near, &near.chain_id, &near.account_id, near.node_url.as_deref())?;
                if near.target.is_empty() {
                    return Err(PauseSdkError::invalid("target is empty"));
                }

                let credential = self.deriver.derive_for_chain(&chain, near.derivation_path.as_deref())?;
                let endpoint = self.endpoint(&chain, near.node_url.as_deref()).map_err(PauseSdkError::NearPause)?;

                let tx_hash = NearDispatcher::new(self.connector.as_ref(), &self.key_store, &self.near)
                    .delegate_pause(&chain.chain_key(), near, &credential, &endpoint)
                    .await?;
                tracing::info!(chain_id = %chain.chain_key(), account_id = %near.account_id, tx_hash = %tx_hash, "Pause submitted");
                Ok(tx_hash)
            }
        }
    }

    async fn dispatch_unpause(&self, request: &UnpauseRequest) -> Result<String, PauseSdkError> {
        let chain = self.guard(request.network_id, &request.chain_id, &request.account_id, None)?;
        match chain {
            ChainDescriptor::Evm { .. } => self.evm_call(&chain, &request.account_id, PausableCall::Unpause).await,
            ChainDescriptor::Near { .. } => Err(PauseSdkError::invalid("unpause is not supported on NEAR")),
        }
    }

    async fn evm_call(&self, chain: &ChainDescriptor, account_id: &str, call: PausableCall) -> Result<String, PauseSdkError> {
        let ChainDescriptor::Evm { chain_id, .. } = chain else {
            return Err(PauseSdkError::invalid("not an EVM chain"));
        };
        let wrap = |cause: RpcError| match call {
            PausableCall::Pause => PauseSdkError::EvmPause(cause),
            PausableCall::Unpause => PauseSdkError::EvmUnpause(cause),
        };

        let credential: Credential = self.deriver.derive_for_chain(chain, None)?;
        let endpoint = self.endpoint(chain, None).map_err(wrap)?;

        let tx_hash = EvmDispatcher::new(self.connector.as_ref())
            .invoke(account_id, call, &credential, &endpoint, *chain_id)
            .await?;
        tracing::info!(chain_id = chain_id, contract = %account_id, method = call.method_name(), tx_hash = %tx_hash, "Contract call submitted");
        Ok(tx_hash.to_string())
    }

    async fn probe(&self, query: &PausableQuery) -> Result<bool, PauseSdkError> {
        let chain = self.guard(query.network_id, &query.chain_id, &query.account_id, query.node_url.as_deref())?;
        if let ChainDescriptor::Evm { .. } = chain {
            return Ok(probe::evm_is_pausable());
        }

        let rpc = match self
            .endpoint(&chain, query.node_url.as_deref())
            .and_then(|endpoint| self.connector.near(&endpoint))
        {
            Ok(rpc) => rpc,
            Err(e) => {
                tracing::warn!(chain_id = %chain.chain_key(), error = %e, "No NEAR client for pause-state probe");
                return Ok(false);
            }
        };

        let pausable = PauseStateProbe::new(rpc.as_ref()).is_pausable(&query.account_id).await;
        tracing::debug!(account_id = %query.account_id, pausable = pausable, "Pause state resolved");
        Ok(pausable)
    }

    /// Parameter check that runs before any derivation or I/O.
    fn guard(
        &self,
        network: NetworkId,
        chain_id: &ChainIdArg,
        account_id: &str,
        node_url: Option<&str>,
    ) -> Result<ChainDescriptor, PauseSdkError> {
        if account_id.is_empty() {
            return Err(PauseSdkError::invalid("accountId is empty"));
        }
        if let Some(url) = node_url {
            Url::parse(url).map_err(|e| PauseSdkError::invalid(format!("nodeUrl '{}': {}", url, e)))?;
        }
        self.classify(network, chain_id)
    }

    fn classify(&self, network: NetworkId, chain_id: &ChainIdArg) -> Result<ChainDescriptor, PauseSdkError> {
        if chain_id.is_empty() {
            return Err(PauseSdkError::invalid("chainId is empty"));
        }
        ChainClassifier::new(&self.registry)
            .classify(network, chain_id)
            .supported()
            .ok_or_else(|| PauseSdkError::invalid(format!("unsupported chain '{}' on {}", chain_id, network)))
    }

    fn endpoint(&self, chain: &ChainDescriptor, override_url: Option<&str>) -> Result<Url, RpcError> {
        EndpointResolver::new(&self.registry).resolve(chain, override_url)
    }
}

impl std::fmt::Debug for PauseSdk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PauseSdk")
            .field("registry", &self.registry)
            .field("deriver", &self.deriver)
            .field("key_store", &self.key_store)
            .finish_non_exhaustive()
    }
}

fn finish<T>(operation: &'static str, network: NetworkId, result: &Result<T, PauseSdkError>) {
    match result {
        Ok(_) => metrics::record_operation(operation, network.as_str(), "success"),
        Err(e) => {
            tracing::warn!(operation = operation, network = %network, code = %e.code(), error = %e, "Operation failed");
            metrics::record_operation(operation, network.as_str(), e.code().as_str());
        }
    }
}
