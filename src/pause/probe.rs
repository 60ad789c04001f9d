//! Pause-state detection.
//!
//! A NEAR contract is recognised as pausable through one of two view
//! methods, tried in order. Only one of them exists on a given contract, so
//! a failing view means "not this kind of contract" and the next probe runs.
//! These are the only errors the SDK swallows.

use serde_json::{json, Value};

use crate::blockchain::near::NearRpc;
use crate::observability::metrics;

/// One speculative view call and the result shape that marks a pausable contract.
#[derive(Clone, Copy)]
pub struct Probe {
    pub method: &'static str,
    args: fn() -> Value,
    verdict: fn(&Value) -> bool,
}

/// Ordered probes: pause-manager plugin first, engine second.
pub const NEAR_PROBES: [Probe; 2] = [
    Probe {
        method: "pa_is_paused",
        args: all_features,
        verdict: is_falsy,
    },
    Probe {
        method: "get_paused_flags",
        args: no_args,
        verdict: is_empty_string,
    },
];

impl Probe {
    /// `Some(true)` when the view succeeds with the recognised shape, `None` otherwise.
    pub async fn run(&self, rpc: &dyn NearRpc, account_id: &str) -> Option<bool> {
        match rpc.view_function(account_id, self.method, &(self.args)()).await {
            Ok(value) if (self.verdict)(&value) => {
                metrics::record_probe(self.method, "match");
                Some(true)
            }
            Ok(value) => {
                tracing::debug!(account_id = %account_id, method = self.method, result = %value, "Probe inconclusive");
                metrics::record_probe(self.method, "mismatch");
                None
            }
            Err(e) => {
                tracing::debug!(account_id = %account_id, method = self.method, error = %e, "Probe failed");
                metrics::record_probe(self.method, "error");
                None
            }
        }
    }
}

/// Runs [`NEAR_PROBES`] against one NEAR contract.
pub struct PauseStateProbe<'a> {
    rpc: &'a dyn NearRpc,
}

impl<'a> PauseStateProbe<'a> {
    pub fn new(rpc: &'a dyn NearRpc) -> Self {
        Self { rpc }
    }

    /// First conclusive probe wins; `false` when none is.
    pub async fn is_pausable(&self, account_id: &str) -> bool {
        for probe in &NEAR_PROBES {
            if let Some(verdict) = probe.run(self.rpc, account_id).await {
                return verdict;
            }
        }
        false
    }
}

/// EVM pause-state resolution.
///
/// Placeholder: always `true`. No on-chain inspection is performed for EVM
/// contracts yet.
pub fn evm_is_pausable() -> bool {
    true
}

fn all_features() -> Value {
    json!({ "key": "ALL" })
}

fn no_args() -> Value {
    json!({})
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn is_empty_string(value: &Value) -> bool {
    matches!(value, Value::String(s) if s.is_empty())
}
