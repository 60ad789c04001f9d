//! Multi-chain contract pause SDK.
//!
//! Pauses, unpauses and inspects the pause state of contracts on EVM chains
//! (`Pausable` contracts) and NEAR chains (through a `delegate_pause`
//! controller), signing with keys derived from a seed phrase.

// Chain plumbing
pub mod blockchain;
pub mod config;

// Operations
pub mod pause;

// Cross-cutting
pub mod observability;

pub use config::schema::PauseConfig;
pub use pause::{
    ErrorCode, EvmPauseRequest, NearPauseRequest, PausableQuery, PauseRequest, PauseSdk, PauseSdkError,
    UnpauseRequest,
};
