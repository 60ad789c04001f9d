//! Direct `pause()` / `unPause()` calls on EVM chains.

use std::str::FromStr;

use alloy::primitives::{Address, TxHash};
use url::Url;

use crate::blockchain::connector::ChainConnector;
use crate::blockchain::evm::PausableCall;
use crate::blockchain::types::{RpcError, RpcResult};
use crate::blockchain::wallet::Credential;
use crate::pause::error::PauseSdkError;

/// Submits `Pausable` calls on EVM chains.
pub struct EvmDispatcher<'a> {
    connector: &'a dyn ChainConnector,
}

impl<'a> EvmDispatcher<'a> {
    pub fn new(connector: &'a dyn ChainConnector) -> Self {
        Self { connector }
    }

    /// Invoke `call` on the contract at `account_id`.
    ///
    /// Failures become [`PauseSdkError::EvmPause`] or [`PauseSdkError::EvmUnpause`].
    pub async fn invoke(
        &self,
        account_id: &str,
        call: PausableCall,
        credential: &Credential,
        endpoint: &Url,
        chain_id: u64,
    ) -> Result<TxHash, PauseSdkError> {
        self.submit(account_id, call, credential, endpoint, chain_id)
            .await
            .map_err(|cause| match call {
                PausableCall::Pause => PauseSdkError::EvmPause(cause),
                PausableCall::Unpause => PauseSdkError::EvmUnpause(cause),
            })
    }

    async fn submit(
        &self,
        account_id: &str,
        call: PausableCall,
        credential: &Credential,
        endpoint: &Url,
        chain_id: u64,
    ) -> RpcResult<TxHash> {
        let contract = Address::from_str(account_id)
            .map_err(|e| RpcError::InvalidInput(format!("invalid contract address '{}': {}", account_id, e)))?;
        let signer = credential
            .evm_signer()
            .ok_or_else(|| RpcError::InvalidInput("credential is not a secp256k1 key".to_string()))?;

        tracing::info!(
            chain_id = chain_id,
            signer = %signer.address(),
            contract = %contract,
            method = call.method_name(),
            "Submitting contract call"
        );

        let client = self.connector.evm(endpoint, chain_id, signer.clone())?;
        client.transact(contract, call.calldata()).await
    }
}
