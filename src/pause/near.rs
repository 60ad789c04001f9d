//! NEAR delegate pause.
//!
//! The pause is routed through a controller contract: the signer calls
//! `delegate_pause` on the controller, which in turn invokes the pause
//! method on the target account.

use serde_json::{json, Value};
use url::Url;

use crate::blockchain::connector::ChainConnector;
use crate::blockchain::keystore::KeyStore;
use crate::blockchain::near::{FunctionCall, NearSigner};
use crate::blockchain::types::{RpcError, RpcResult};
use crate::blockchain::wallet::Credential;
use crate::config::schema::NearConfig;
use crate::pause::error::PauseSdkError;
use crate::pause::request::NearPauseRequest;

/// Controller method that forwards the pause.
pub const DELEGATE_PAUSE_METHOD: &str = "delegate_pause";

/// Deposit attached to `delegate_pause`: 1 yoctoNEAR.
pub const PAUSE_DEPOSIT_YOCTO: u128 = 1;

/// Submits `delegate_pause` calls on one NEAR chain.
pub struct NearDispatcher<'a> {
    connector: &'a dyn ChainConnector,
    key_store: &'a KeyStore,
    config: &'a NearConfig,
}

impl<'a> NearDispatcher<'a> {
    pub fn new(connector: &'a dyn ChainConnector, key_store: &'a KeyStore, config: &'a NearConfig) -> Self {
        Self {
            connector,
            key_store,
            config,
        }
    }

    /// Pause `request.account_id` through the `request.target` controller.
    ///
    /// Returns the transaction hash. Every failure is reported as
    /// [`PauseSdkError::NearPause`] with the original cause.
    pub async fn delegate_pause(
        &self,
        chain_id: &str,
        request: &NearPauseRequest,
        credential: &Credential,
        endpoint: &Url,
    ) -> Result<String, PauseSdkError> {
        self.submit(chain_id, request, credential, endpoint)
            .await
            .map_err(PauseSdkError::NearPause)
    }

    async fn submit(
        &self,
        chain_id: &str,
        request: &NearPauseRequest,
        credential: &Credential,
        endpoint: &Url,
    ) -> RpcResult<String> {
        let signer = self.register_signer(chain_id, request.sender.as_deref(), credential)?;
        let call = FunctionCall {
            receiver_id: request.target.clone(),
            method_name: DELEGATE_PAUSE_METHOD.to_string(),
            args: self.delegate_args(request),
            gas: self.config.function_call_gas,
            deposit: PAUSE_DEPOSIT_YOCTO,
        };

        tracing::info!(
            chain_id = %chain_id,
            signer = %signer.account_id(),
            controller = %request.target,
            account_id = %request.account_id,
            "Submitting delegate_pause"
        );

        let rpc = self.connector.near(endpoint)?;
        let outcome = rpc.function_call(&signer, call).await?;
        Ok(outcome.transaction_hash)
    }

    /// Resolve the signing account and make the derived key its active key.
    fn register_signer(
        &self,
        chain_id: &str,
        sender: Option<&str>,
        credential: &Credential,
    ) -> RpcResult<NearSigner> {
        let key = credential
            .ed25519_key()
            .ok_or_else(|| RpcError::InvalidInput("credential is not an ed25519 key".to_string()))?;
        let account_id = match sender {
            Some(sender) => sender.to_string(),
            None => credential
                .implicit_account_id()
                .ok_or_else(|| RpcError::InvalidInput("no implicit account for credential".to_string()))?,
        };
        validate_account_id(&account_id)?;

        self.key_store.set_key(chain_id, &account_id, key.clone());
        let key = self.key_store.get_key(chain_id, &account_id).ok_or_else(|| {
            RpcError::InvalidInput(format!("no key registered for '{}' on {}", account_id, chain_id))
        })?;

        Ok(NearSigner::new(account_id, key))
    }

    fn delegate_args(&self, request: &NearPauseRequest) -> Value {
        let method = request
            .method_name
            .clone()
            .unwrap_or_else(|| self.config.default_pause_method.clone());
        let arguments = request
            .method_args
            .clone()
            .unwrap_or_else(|| self.config.default_pause_arguments.clone());

        json!({
            "receiver_id": request.account_id,
            "pause_method_name": method,
            "pause_arguments": arguments,
        })
    }
}

/// NEAR account id rules: 2..=64 chars of `[a-z0-9_-]` parts joined by `.`.
fn validate_account_id(account_id: &str) -> RpcResult<()> {
    let valid_len = (2..=64).contains(&account_id.len());
    let valid_parts = account_id.split('.').all(|part| {
        !part.is_empty()
            && part
                .split(['-', '_'])
                .all(|seg| !seg.is_empty() && seg.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()))
    });

    if valid_len && valid_parts {
        Ok(())
    } else {
        Err(RpcError::InvalidInput(format!("invalid NEAR account id '{}'", account_id)))
    }
}
