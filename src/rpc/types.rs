//! Wire types and error definitions for node RPC.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Default per-request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Outgoing request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    pub id: i64,
    pub method: String,
    pub params: Vec<Value>,
}

/// Incoming response body.
///
/// A present, non-null `error` wins over `result` regardless of HTTP status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl RpcResponse {
    /// Split into the result value or the node-reported error.
    pub fn into_result(self) -> Result<Value, Value> {
        match self.error {
            Some(error) if !error.is_null() => Err(error),
            _ => Ok(self.result.unwrap_or(Value::Null)),
        }
    }
}

/// Errors raised while talking to a node.
#[derive(Debug, Error)]
pub enum RpcError {
    /// Command is not in the registry; nothing was sent.
    #[error("No such command \"{0}\"")]
    UnknownCommand(String),

    /// The request did not complete in time.
    #[error("Connection timeout: {endpoint} did not answer within {timeout_ms} ms")]
    Timeout { endpoint: String, timeout_ms: u64 },

    /// The endpoint could not be reached.
    #[error("Connection error: couldn't connect to node {endpoint}: {reason}")]
    Connection { endpoint: String, reason: String },

    /// The node answered with an `error` object.
    #[error("RPC error from {method}: {error}")]
    Remote { method: String, error: Value },

    /// The response body was not valid JSON or had an unexpected shape.
    #[error("Malformed response to {method}: {reason}")]
    MalformedResponse { method: String, reason: String },

    /// The request could not be encoded or the blocking worker failed to start.
    #[error("RPC client error: {0}")]
    Internal(String),
}

impl RpcError {
    /// True for failures of the network or the node, as opposed to a bad local request.
    pub fn is_network(&self) -> bool {
        !matches!(self, RpcError::UnknownCommand(_) | RpcError::Internal(_))
    }
}

/// Result type for RPC operations.
pub type RpcResult<T> = Result<T, RpcError>;
