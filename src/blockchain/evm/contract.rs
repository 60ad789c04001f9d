//! `Pausable` contract ABI.
//!
//! The unpause method is `unPause` (capital P) on deployed contracts; the
//! selector depends on that exact spelling.

use alloy::primitives::Bytes;
use alloy::sol;
use alloy::sol_types::SolCall;

sol! {
    /// Pausable contract surface used by the SDK.
    interface Pausable {
        function pause() external;
        function unPause() external;
    }
}

/// State-changing calls on a `Pausable` contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PausableCall {
    Pause,
    Unpause,
}

impl PausableCall {
    /// ABI method name.
    pub fn method_name(&self) -> &'static str {
        match self {
            PausableCall::Pause => "pause",
            PausableCall::Unpause => "unPause",
        }
    }

    pub fn signature(&self) -> &'static str {
        match self {
            PausableCall::Pause => Pausable::pauseCall::SIGNATURE,
            PausableCall::Unpause => Pausable::unPauseCall::SIGNATURE,
        }
    }

    pub fn selector(&self) -> [u8; 4] {
        match self {
            PausableCall::Pause => Pausable::pauseCall::SELECTOR,
            PausableCall::Unpause => Pausable::unPauseCall::SELECTOR,
        }
    }

    /// ABI-encoded calldata.
    pub fn calldata(&self) -> Bytes {
        match self {
            PausableCall::Pause => Pausable::pauseCall {}.abi_encode().into(),
            PausableCall::Unpause => Pausable::unPauseCall {}.abi_encode().into(),
        }
    }

    /// Identify a call from its calldata.
    pub fn from_calldata(data: &[u8]) -> Option<Self> {
        let selector: [u8; 4] = data.get(..4)?.try_into().ok()?;
        [PausableCall::Pause, PausableCall::Unpause]
            .into_iter()
            .find(|call| call.selector() == selector)
    }
}
