//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for machine consumption, pretty format for operators
//! - `RUST_LOG` wins over the configured level

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::schema::ObservabilityConfig;

/// Install the global subscriber. Call once, from the binary.
pub fn init_logging(config: &ObservabilityConfig, level_override: Option<&str>) {
    let default_directive = default_filter(level_override.unwrap_or(&config.log_level));
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive.into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn default_filter(level: &str) -> String {
    format!("pause_sdk={},warn", level)
}
