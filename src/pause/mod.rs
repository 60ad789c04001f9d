//! Pause dispatch.
//!
//! # Data Flow
//! ```text
//! PauseRequest / UnpauseRequest / PausableQuery
//!     → sdk.rs guard (INVALID_PARAMETERS, no I/O)
//!     → blockchain classifier + key derivation + endpoint
//!     → near.rs (delegate_pause) | evm.rs (pause / unPause) | probe.rs
//!     → transaction hash, pausable flag, or PauseSdkError
//! ```
//!
//! # Error Policy
//! - One attempt per operation, no retries
//! - Sub-operation failures are wrapped once at the dispatcher boundary
//! - Probe failures are swallowed; they only mean "not this contract kind"

pub mod error;
pub mod evm;
pub mod near;
pub mod probe;
pub mod request;
pub mod sdk;

pub use error::{ErrorCode, PauseSdkError};
pub use evm::EvmDispatcher;
pub use near::NearDispatcher;
pub use probe::PauseStateProbe;
pub use request::{EvmPauseRequest, NearPauseRequest, PausableQuery, PauseRequest, UnpauseRequest};
pub use sdk::{PauseSdk, SignerInfo};
