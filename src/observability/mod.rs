//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! dispatchers, probe, key derivation
//!     → tracing events (structured fields, no secrets)
//!     → metrics.rs (operation and probe counters)
//!
//! Consumers:
//!     → logging.rs subscriber (stderr, human or JSON)
//!     → whichever metrics recorder the host process installs
//! ```

pub mod logging;
pub mod metrics;
