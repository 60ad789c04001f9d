//! Chain classification against the registered chain sets.
//!
//! # Responsibilities
//! - Hold the read-only chain id → (index, endpoint) registries
//! - Decide whether a (network, chain) pair is a supported EVM or NEAR chain

use std::collections::HashMap;

use crate::blockchain::types::{ChainDescriptor, ChainIdArg, NetworkId};
use crate::config::PauseConfig;

/// A registered chain: derivation index and default RPC endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainEntry {
    pub index: String,
    pub rpc_url: String,
}

/// Registered chains per family. Written once at startup.
#[derive(Debug, Clone, Default)]
pub struct ChainRegistry {
    evm: HashMap<u64, ChainEntry>,
    near: HashMap<String, ChainEntry>,
}

impl ChainRegistry {
    /// Build the registries from a validated configuration.
    pub fn from_config(config: &PauseConfig) -> Self {
        let evm = config
            .evm
            .chains
            .iter()
            .map(|c| {
                (
                    c.chain_id,
                    ChainEntry {
                        index: c.index.clone(),
                        rpc_url: c.rpc_url.clone(),
                    },
                )
            })
            .collect();
        let near = config
            .near
            .chains
            .iter()
            .map(|c| {
                (
                    c.chain_id.clone(),
                    ChainEntry {
                        index: c.index.clone(),
                        rpc_url: c.rpc_url.clone(),
                    },
                )
            })
            .collect();

        Self { evm, near }
    }

    pub fn evm_chain(&self, chain_id: u64) -> Option<&ChainEntry> {
        self.evm.get(&chain_id)
    }

    pub fn near_chain(&self, chain_id: &str) -> Option<&ChainEntry> {
        self.near.get(chain_id)
    }

    /// Default endpoint for a classified chain.
    pub fn endpoint(&self, chain: &ChainDescriptor) -> Option<&str> {
        let entry = match chain {
            ChainDescriptor::Evm { chain_id, .. } => self.evm_chain(*chain_id),
            ChainDescriptor::Near { chain_id, .. } => self.near_chain(chain_id),
        };
        entry.map(|e| e.rpc_url.as_str())
    }
}

/// Result of classifying a (network, chain) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Supported(ChainDescriptor),
    Unsupported,
}

impl Classification {
    pub fn supported(self) -> Option<ChainDescriptor> {
        match self {
            Classification::Supported(chain) => Some(chain),
            Classification::Unsupported => None,
        }
    }
}

/// Pure classifier over a [`ChainRegistry`].
#[derive(Debug, Clone, Copy)]
pub struct ChainClassifier<'a> {
    registry: &'a ChainRegistry,
}

impl<'a> ChainClassifier<'a> {
    pub fn new(registry: &'a ChainRegistry) -> Self {
        Self { registry }
    }

    /// Classify a (network, chain) pair.
    ///
    /// Membership is tested on the value as supplied: EVM chains are keyed by
    /// number, NEAR chains by name. A numeric string is never an EVM key.
    pub fn classify(&self, network: NetworkId, chain_id: &ChainIdArg) -> Classification {
        match (network, chain_id) {
            (NetworkId::Ethereum, ChainIdArg::Number(id)) => match self.registry.evm_chain(*id) {
                Some(entry) => Classification::Supported(ChainDescriptor::Evm {
                    chain_id: *id,
                    index: entry.index.clone(),
                }),
                None => Classification::Unsupported,
            },
            (NetworkId::Near, ChainIdArg::Name(name)) => match self.registry.near_chain(name) {
                Some(entry) => Classification::Supported(ChainDescriptor::Near {
                    chain_id: name.clone(),
                    index: entry.index.clone(),
                }),
                None => Classification::Unsupported,
            },
            _ => Classification::Unsupported,
        }
    }
}
