//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the SDK.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Default EVM derivation prefix (BIP-44, coin type 60, account 0).
pub const ETHEREUM_DERIVATION_PATH: &str = "m/44'/60'/0'";

/// Default NEAR derivation prefix (BIP-44, coin type 397).
pub const NEAR_DERIVATION_PATH: &str = "m/44'/397'";

/// Test-only EVM seed phrase (Anvil/Hardhat default accounts).
pub const DEFAULT_ETHEREUM_MNEMONIC: &str =
    "test test test test test test test test test test test junk";

/// Test-only NEAR seed phrase.
pub const DEFAULT_NEAR_MNEMONIC: &str =
    "air minute wish amazing detect animal acoustic robot basket web brisk fragile";

pub const ETHEREUM: u64 = 1;
pub const AURORA: u64 = 1_313_161_554;

pub const MAINNET: &str = "mainnet";
pub const TESTNET: &str = "testnet";
pub const LOCALNET: &str = "local";

/// Method the controller invokes on the target when none is requested.
pub const NEAR_DEFAULT_PAUSE_METHOD: &str = "pa_pause_feature";

/// Root configuration for the pause SDK.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PauseConfig {
    /// EVM chain family settings.
    pub evm: EvmConfig,

    /// NEAR chain family settings.
    pub near: NearConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// A seed phrase loaded from configuration.
///
/// Never printed through `Debug`.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SeedPhrase(String);

impl SeedPhrase {
    pub fn new(phrase: impl Into<String>) -> Self {
        Self(phrase.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SeedPhrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SeedPhrase(<redacted>)")
    }
}

/// EVM chain family configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EvmConfig {
    /// Seed phrase all EVM signing keys are derived from.
    pub mnemonic: SeedPhrase,

    /// Hardened derivation prefix; the chain index is appended to it.
    pub derivation_path: String,

    /// Registered EVM chains.
    pub chains: Vec<EvmChainConfig>,
}

/// A registered EVM chain.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EvmChainConfig {
    /// Numeric chain id (e.g. 1 for Ethereum mainnet).
    pub chain_id: u64,

    /// Derivation path suffix (e.g. "0/0").
    pub index: String,

    /// JSON-RPC endpoint URL.
    pub rpc_url: String,
}

impl Default for EvmConfig {
    fn default() -> Self {
        Self {
            mnemonic: SeedPhrase::new(DEFAULT_ETHEREUM_MNEMONIC),
            derivation_path: ETHEREUM_DERIVATION_PATH.to_string(),
            chains: vec![
                EvmChainConfig {
                    chain_id: ETHEREUM,
                    index: "0/0".to_string(),
                    rpc_url: "https://eth.llamarpc.com".to_string(),
                },
                EvmChainConfig {
                    chain_id: AURORA,
                    index: "0/1".to_string(),
                    rpc_url: "https://mainnet.aurora.dev".to_string(),
                },
            ],
        }
    }
}

/// NEAR chain family configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NearConfig {
    /// Seed phrase all NEAR signing keys are derived from.
    pub mnemonic: SeedPhrase,

    /// Hardened derivation prefix; the chain index and a trailing `'` are appended.
    pub derivation_path: String,

    /// Registered NEAR chains.
    pub chains: Vec<NearChainConfig>,

    /// Pause method forwarded by the controller when the request names none.
    pub default_pause_method: String,

    /// Pause arguments forwarded by the controller when the request has none.
    pub default_pause_arguments: Value,

    /// Gas attached to `delegate_pause`.
    pub function_call_gas: u64,

    /// Controller account used by the CLI when `--controller` is omitted.
    pub default_controller: Option<String>,
}

/// A registered NEAR chain.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NearChainConfig {
    /// Chain name ("mainnet", "testnet", "local").
    pub chain_id: String,

    /// Derivation path index (e.g. "0").
    pub index: String,

    /// JSON-RPC endpoint URL.
    pub rpc_url: String,
}

impl Default for NearConfig {
    fn default() -> Self {
        Self {
            mnemonic: SeedPhrase::new(DEFAULT_NEAR_MNEMONIC),
            derivation_path: NEAR_DERIVATION_PATH.to_string(),
            chains: vec![
                NearChainConfig {
                    chain_id: MAINNET.to_string(),
                    index: "0".to_string(),
                    rpc_url: "https://free.rpc.fastnear.com".to_string(),
                },
                NearChainConfig {
                    chain_id: TESTNET.to_string(),
                    index: "1".to_string(),
                    rpc_url: "https://test.rpc.fastnear.com".to_string(),
                },
                NearChainConfig {
                    chain_id: LOCALNET.to_string(),
                    index: "2".to_string(),
                    rpc_url: "http://127.0.0.1:3030".to_string(),
                },
            ],
            default_pause_method: NEAR_DEFAULT_PAUSE_METHOD.to_string(),
            default_pause_arguments: json!({ "key": "ALL" }),
            function_call_gas: 30_000_000_000_000, // 30 TGas
            default_controller: None,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON instead of human-readable lines.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}
