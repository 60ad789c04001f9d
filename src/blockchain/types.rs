//! Chain-specific types and error definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Network identifier naming a supported chain family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    Ethereum,
    Near,
}

impl NetworkId {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkId::Ethereum => "ethereum",
            NetworkId::Near => "near",
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ethereum" => Ok(NetworkId::Ethereum),
            "near" => Ok(NetworkId::Near),
            other => Err(format!("unsupported network '{}'", other)),
        }
    }
}

/// Chain id as supplied by the caller: numeric for EVM chains, a name for NEAR.
///
/// The variant is kept as given; `Name("1")` never matches the EVM chain `1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ChainIdArg {
    Number(u64),
    Name(String),
}

impl ChainIdArg {
    /// Mirrors a truthiness check: `0` and `""` count as missing.
    pub fn is_empty(&self) -> bool {
        match self {
            ChainIdArg::Number(n) => *n == 0,
            ChainIdArg::Name(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for ChainIdArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainIdArg::Number(n) => write!(f, "{}", n),
            ChainIdArg::Name(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ChainIdArg {
    fn from(id: u64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for ChainIdArg {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

/// Chain family a request resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainFamily {
    Evm,
    Near,
}

/// A classified, supported chain. Built once per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainDescriptor {
    Evm { chain_id: u64, index: String },
    Near { chain_id: String, index: String },
}

impl ChainDescriptor {
    pub fn family(&self) -> ChainFamily {
        match self {
            ChainDescriptor::Evm { .. } => ChainFamily::Evm,
            ChainDescriptor::Near { .. } => ChainFamily::Near,
        }
    }

    /// Registered derivation-path suffix.
    pub fn index(&self) -> &str {
        match self {
            ChainDescriptor::Evm { index, .. } | ChainDescriptor::Near { index, .. } => index,
        }
    }

    /// Registry key rendered as text.
    pub fn chain_key(&self) -> String {
        match self {
            ChainDescriptor::Evm { chain_id, .. } => chain_id.to_string(),
            ChainDescriptor::Near { chain_id, .. } => chain_id.clone(),
        }
    }
}

/// Errors raised by chain RPC clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RpcError {
    /// Request could not be delivered or the response could not be read.
    #[error("transport error: {0}")]
    Transport(String),

    /// Node answered with a JSON-RPC error.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Contract call or view reverted/panicked.
    #[error("contract error: {0}")]
    Contract(String),

    /// Transaction was included but its execution failed.
    #[error("execution failed: {0}")]
    Execution(String),

    /// Response did not have the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),

    /// Local input rejected before sending (address, account id, endpoint).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for RPC operations.
pub type RpcResult<T> = Result<T, RpcError>;
