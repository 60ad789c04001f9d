//! NEAR protocol plumbing: JSON-RPC client and transaction encoding.

pub mod rpc;
pub mod transaction;

pub use rpc::{ExecutionOutcome, FunctionCall, NearJsonRpcClient, NearRpc};
pub use transaction::{NearSigner, SignedTransaction, Transaction};
