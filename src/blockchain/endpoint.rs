//! RPC endpoint resolution.

use url::Url;

use crate::blockchain::classifier::ChainRegistry;
use crate::blockchain::types::{ChainDescriptor, RpcError, RpcResult};

/// Maps a classified chain to its RPC endpoint.
#[derive(Debug, Clone, Copy)]
pub struct EndpointResolver<'a> {
    registry: &'a ChainRegistry,
}

impl<'a> EndpointResolver<'a> {
    pub fn new(registry: &'a ChainRegistry) -> Self {
        Self { registry }
    }

    /// Resolve the endpoint for `chain`, preferring `override_url` (sandbox or
    /// private node) over the registered one.
    pub fn resolve(&self, chain: &ChainDescriptor, override_url: Option<&str>) -> RpcResult<Url> {
        let raw = match override_url {
            Some(url) => url,
            None => self.registry.endpoint(chain).ok_or_else(|| {
                RpcError::InvalidInput(format!("no endpoint registered for chain '{}'", chain.chain_key()))
            })?,
        };

        Url::parse(raw).map_err(|e| RpcError::InvalidInput(format!("Invalid RPC URL '{}': {}", raw, e)))
    }
}
