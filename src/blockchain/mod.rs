//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! (network, chain) from the request
//!     → classifier.rs (supported EVM / NEAR chain, or unsupported)
//!     → wallet.rs (credential derived from seed phrase + registered index)
//!     → endpoint.rs (registered RPC URL or caller override)
//!     → connector.rs (near/ or evm/ client for that endpoint)
//! ```
//!
//! # Security Constraints
//! - Signing keys are derived per operation, never read from key files
//! - Never log secret keys or seed phrases
//! - NEAR signer keys live only in the injected keystore.rs registry

pub mod classifier;
pub mod connector;
pub mod endpoint;
pub mod evm;
pub mod keystore;
pub mod near;
pub mod types;
pub mod wallet;

pub use classifier::{ChainClassifier, ChainRegistry, Classification};
pub use connector::{ChainConnector, HttpConnector};
pub use endpoint::EndpointResolver;
pub use keystore::KeyStore;
pub use types::{ChainDescriptor, ChainFamily, ChainIdArg, NetworkId, RpcError, RpcResult};
pub use wallet::{Credential, DerivationError, KeyDeriver};
