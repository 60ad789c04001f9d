//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{PauseConfig, SeedPhrase};
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding the EVM seed phrase.
pub const ETH_MNEMONIC_ENV_VAR: &str = "ETH_PRIVATE_KEY";

/// Environment variable overriding the NEAR seed phrase.
pub const NEAR_MNEMONIC_ENV_VAR: &str = "NEAR_PRIVATE_KEY";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file, then apply environment overrides.
pub fn load_config(path: &Path) -> Result<PauseConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: PauseConfig = toml::from_str(&content)?;

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Built-in defaults with environment overrides applied.
pub fn default_config() -> Result<PauseConfig, ConfigError> {
    let mut config = PauseConfig::default();

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Replace seed phrases with values from the environment, when set.
pub fn apply_env_overrides(config: &mut PauseConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(phrase) = lookup(ETH_MNEMONIC_ENV_VAR) {
        tracing::debug!(var = ETH_MNEMONIC_ENV_VAR, "EVM seed phrase overridden from environment");
        config.evm.mnemonic = SeedPhrase::new(phrase);
    }
    if let Some(phrase) = lookup(NEAR_MNEMONIC_ENV_VAR) {
        tracing::debug!(var = NEAR_MNEMONIC_ENV_VAR, "NEAR seed phrase overridden from environment");
        config.near.mnemonic = SeedPhrase::new(phrase);
    }
}
