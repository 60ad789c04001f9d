//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (seed phrases)
//!     → validation.rs (semantic checks)
//!     → PauseConfig (validated, immutable)
//!     → chain registries built once and shared read-only
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults so an empty file reproduces the built-in registries
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{default_config, load_config, ConfigError};
pub use schema::{EvmChainConfig, NearChainConfig, PauseConfig, SeedPhrase};
