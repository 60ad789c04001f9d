//! EVM plumbing: `Pausable` ABI and the alloy-backed client.

pub mod client;
pub mod contract;

pub use client::{EvmClient, EvmRpc};
pub use contract::PausableCall;
