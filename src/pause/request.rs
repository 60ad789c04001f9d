//! Request shapes for the public operations.
//!
//! Field names follow the camelCase wire form (`networkId`, `chainId`, ...).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::blockchain::types::{ChainIdArg, NetworkId};

/// A pause request, discriminated by `networkId`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "networkId")]
pub enum PauseRequest {
    #[serde(rename = "ethereum")]
    Evm(EvmPauseRequest),
    #[serde(rename = "near")]
    Near(NearPauseRequest),
}

impl PauseRequest {
    pub fn network_id(&self) -> NetworkId {
        match self {
            PauseRequest::Evm(_) => NetworkId::Ethereum,
            PauseRequest::Near(_) => NetworkId::Near,
        }
    }

    pub fn account_id(&self) -> &str {
        match self {
            PauseRequest::Evm(r) => &r.account_id,
            PauseRequest::Near(r) => &r.account_id,
        }
    }
}

/// Pause a `Pausable` contract on an EVM chain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvmPauseRequest {
    pub chain_id: ChainIdArg,
    /// Contract address.
    pub account_id: String,
}

impl EvmPauseRequest {
    pub fn new(chain_id: impl Into<ChainIdArg>, account_id: impl Into<String>) -> Self {
        Self {
            chain_id: chain_id.into(),
            account_id: account_id.into(),
        }
    }
}

/// Pause a NEAR contract through a controller's `delegate_pause`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearPauseRequest {
    pub chain_id: ChainIdArg,
    /// Contract being paused.
    pub account_id: String,
    /// Controller contract that performs the pause.
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_args: Option<Value>,
    /// Signing account; defaults to the implicit account of the derived key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derivation_path: Option<String>,
}

impl NearPauseRequest {
    pub fn new(
        chain_id: impl Into<ChainIdArg>,
        account_id: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            chain_id: chain_id.into(),
            account_id: account_id.into(),
            target: target.into(),
            method_name: None,
            method_args: None,
            sender: None,
            node_url: None,
            derivation_path: None,
        }
    }

    pub fn with_method(mut self, name: impl Into<String>, args: Option<Value>) -> Self {
        self.method_name = Some(name.into());
        self.method_args = args;
        self
    }

    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    pub fn with_node_url(mut self, node_url: impl Into<String>) -> Self {
        self.node_url = Some(node_url.into());
        self
    }

    pub fn with_derivation_path(mut self, path: impl Into<String>) -> Self {
        self.derivation_path = Some(path.into());
        self
    }
}

/// Unpause a `Pausable` contract. EVM chains only.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnpauseRequest {
    pub network_id: NetworkId,
    pub chain_id: ChainIdArg,
    pub account_id: String,
}

impl UnpauseRequest {
    pub fn new(network_id: NetworkId, chain_id: impl Into<ChainIdArg>, account_id: impl Into<String>) -> Self {
        Self {
            network_id,
            chain_id: chain_id.into(),
            account_id: account_id.into(),
        }
    }
}

/// Query whether a contract exposes a recognised pause mechanism.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PausableQuery {
    pub network_id: NetworkId,
    pub chain_id: ChainIdArg,
    pub account_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_url: Option<String>,
}

impl PausableQuery {
    pub fn new(network_id: NetworkId, chain_id: impl Into<ChainIdArg>, account_id: impl Into<String>) -> Self {
        Self {
            network_id,
            chain_id: chain_id.into(),
            account_id: account_id.into(),
            node_url: None,
        }
    }

    pub fn with_node_url(mut self, node_url: impl Into<String>) -> Self {
        self.node_url = Some(node_url.into());
        self
    }
}
