//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Every registered chain id has exactly one index and one endpoint
//! - Endpoints parse as URLs, seed phrases and prefixes are non-empty
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: PauseConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::PauseConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{family} chain '{chain_id}' is registered more than once")]
    DuplicateChain { family: &'static str, chain_id: String },

    #[error("{family} chain '{chain_id}' has an empty derivation index")]
    EmptyIndex { family: &'static str, chain_id: String },

    #[error("{family} chain '{chain_id}' has an invalid RPC URL '{url}'")]
    InvalidRpcUrl {
        family: &'static str,
        chain_id: String,
        url: String,
    },

    #[error("{0} seed phrase is empty")]
    EmptySeedPhrase(&'static str),

    #[error("{family} derivation path '{path}' must start with \"m/\"")]
    InvalidDerivationPrefix { family: &'static str, path: String },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &PauseConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_family(
        "evm",
        config.evm.mnemonic.expose(),
        &config.evm.derivation_path,
        config
            .evm
            .chains
            .iter()
            .map(|c| (c.chain_id.to_string(), c.index.as_str(), c.rpc_url.as_str())),
        &mut errors,
    );
    check_family(
        "near",
        config.near.mnemonic.expose(),
        &config.near.derivation_path,
        config
            .near
            .chains
            .iter()
            .map(|c| (c.chain_id.clone(), c.index.as_str(), c.rpc_url.as_str())),
        &mut errors,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_family<'a>(
    family: &'static str,
    mnemonic: &str,
    prefix: &str,
    chains: impl Iterator<Item = (String, &'a str, &'a str)>,
    errors: &mut Vec<ValidationError>,
) {
    if mnemonic.trim().is_empty() {
        errors.push(ValidationError::EmptySeedPhrase(family));
    }
    if !prefix.starts_with("m/") {
        errors.push(ValidationError::InvalidDerivationPrefix {
            family,
            path: prefix.to_string(),
        });
    }

    let mut seen = HashSet::new();
    for (chain_id, index, rpc_url) in chains {
        if !seen.insert(chain_id.clone()) {
            errors.push(ValidationError::DuplicateChain {
                family,
                chain_id: chain_id.clone(),
            });
        }
        if index.trim().is_empty() {
            errors.push(ValidationError::EmptyIndex {
                family,
                chain_id: chain_id.clone(),
            });
        }
        if url::Url::parse(rpc_url).is_err() {
            errors.push(ValidationError::InvalidRpcUrl {
                family,
                chain_id,
                url: rpc_url.to_string(),
            });
        }
    }
}
