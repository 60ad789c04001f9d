//! Error taxonomy for the public operations.

use std::fmt;

use thiserror::Error;

use crate::blockchain::types::RpcError;
use crate::blockchain::wallet::DerivationError;

/// Stable error codes exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidParameters,
    NearPauseError,
    EvmPauseError,
    EvmUnpauseError,
    DerivationError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidParameters => "INVALID_PARAMETERS",
            ErrorCode::NearPauseError => "NEAR_PAUSE_ERROR",
            ErrorCode::EvmPauseError => "EVM_PAUSE_ERROR",
            ErrorCode::EvmUnpauseError => "EVM_UNPAUSE_ERROR",
            ErrorCode::DerivationError => "DERIVATION_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by `pause`, `unpause` and `is_pausable`.
#[derive(Debug, Error)]
pub enum PauseSdkError {
    /// Missing or unsupported network, chain or account. Raised before any I/O.
    #[error("Missing or invalid parameters provided: {reason}")]
    InvalidParameters { reason: String },

    #[error("Error occurred while executing delegate_pause on NEAR chain")]
    NearPause(#[source] RpcError),

    #[error("Error occurred while executing pause on EVM chain")]
    EvmPause(#[source] RpcError),

    #[error("Error occurred while executing unpause on EVM chain")]
    EvmUnpause(#[source] RpcError),

    /// Key derivation failure, surfaced as is.
    #[error(transparent)]
    Derivation(#[from] DerivationError),
}

impl PauseSdkError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParameters {
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            PauseSdkError::InvalidParameters { .. } => ErrorCode::InvalidParameters,
            PauseSdkError::NearPause(_) => ErrorCode::NearPauseError,
            PauseSdkError::EvmPause(_) => ErrorCode::EvmPauseError,
            PauseSdkError::EvmUnpause(_) => ErrorCode::EvmUnpauseError,
            PauseSdkError::Derivation(_) => ErrorCode::DerivationError,
        }
    }

    /// The transport or contract failure that triggered this error.
    pub fn cause(&self) -> Option<&RpcError> {
        match self {
            PauseSdkError::NearPause(cause)
            | PauseSdkError::EvmPause(cause)
            | PauseSdkError::EvmUnpause(cause) => Some(cause),
            PauseSdkError::InvalidParameters { .. } | PauseSdkError::Derivation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_codes_and_causes() {
        let cause = RpcError::Rpc("execution reverted".to_string());
        let err = PauseSdkError::EvmPause(cause.clone());

        assert_eq!(err.code().as_str(), "EVM_PAUSE_ERROR");
        assert_eq!(err.cause(), Some(&cause));
        assert_eq!(err.source().unwrap().to_string(), cause.to_string());
        assert_eq!(err.to_string(), "Error occurred while executing pause on EVM chain");
    }

    #[test]
    fn test_invalid_parameters() {
        let err = PauseSdkError::invalid("accountId is empty");
        assert_eq!(err.code(), ErrorCode::InvalidParameters);
        assert!(err.cause().is_none());
        assert!(err.to_string().contains("accountId is empty"));
    }

    #[test]
    fn test_derivation_not_remapped() {
        let err: PauseSdkError = DerivationError::SeedPhrase("bad word".to_string()).into();
        assert_eq!(err.code(), ErrorCode::DerivationError);
        assert_eq!(err.to_string(), "Invalid seed phrase: bad word");
    }
}
