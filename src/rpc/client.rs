//! JSON-RPC client bound to a single node endpoint.
//!
//! # Responsibilities
//! - Reject commands missing from the registry before touching the network
//! - Qualify bare command names with their namespace
//! - Enforce the per-client timeout on every call
//! - Classify failures as timeout, connection, node error or malformed reply
//!
//! # Design Decisions
//! - One generic entry point (`call`) instead of a method per command
//! - Transport is injected, so hosts and tests choose how bytes move
//! - `call_sync` drives `call` on a worker thread with its own runtime
//! - No retries: state-mutating calls like `addTx` are not idempotent

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::timeout;

use crate::observability::metrics;
use crate::rpc::commands::CommandRegistry;
use crate::rpc::transport::{HttpTransport, Transport, TransportError};
use crate::rpc::types::{RpcError, RpcRequest, RpcResponse, RpcResult, DEFAULT_TIMEOUT_MS};

/// Client for one node endpoint.
#[derive(Clone)]
pub struct RpcClient {
    endpoint: String,
    timeout: Duration,
    transport: Arc<dyn Transport>,
    registry: CommandRegistry,
}

impl RpcClient {
    /// Client with the default timeout and HTTP transport.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT_MS)
    }

    /// Client with a custom timeout and the default HTTP transport.
    pub fn with_timeout(endpoint: impl Into<String>, timeout_ms: u64) -> Self {
        Self::with_transport(endpoint, timeout_ms, Arc::new(HttpTransport::new()))
    }

    /// Client with an injected transport.
    pub fn with_transport(
        endpoint: impl Into<String>,
        timeout_ms: u64,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_millis(timeout_ms),
            transport,
            registry: CommandRegistry::standard(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Build the wire request for `command`, failing if it is not registered.
    pub fn prepare_request(&self, command: &str, params: Vec<Value>) -> RpcResult<RpcRequest> {
        let method = self.registry.qualify(command).inspect_err(|_| {
            tracing::warn!(command = %command, "No such command");
        })?;

        Ok(RpcRequest {
            id: request_id(),
            method,
            params,
        })
    }

    /// Send `command` and resolve with the response's `result`.
    pub async fn call(&self, command: &str, params: Vec<Value>) -> RpcResult<Value> {
        let request = self.prepare_request(command, params)?;
        let body = serde_json::to_string(&request)
            .map_err(|e| RpcError::Internal(format!("failed to encode {}: {}", request.method, e)))?;
        let method = request.method;

        tracing::debug!(method = %method, endpoint = %self.endpoint, id = request.id, "Sending RPC request");

        let started = Instant::now();
        let sent = timeout(
            self.timeout,
            self.transport.post_json(&self.endpoint, body, self.timeout),
        )
        .await;

        let result = match sent {
            Err(_) | Ok(Err(TransportError::Timeout)) => Err(RpcError::Timeout {
                endpoint: self.endpoint.clone(),
                timeout_ms: self.timeout.as_millis() as u64,
            }),
            Ok(Err(TransportError::Connection(reason))) => Err(RpcError::Connection {
                endpoint: self.endpoint.clone(),
                reason,
            }),
            Ok(Ok(text)) => decode_response(&method, &text),
        };

        metrics::record_rpc_call(&method, outcome_label(&result), started.elapsed());
        if let Err(e) = &result {
            tracing::warn!(method = %method, endpoint = %self.endpoint, error = %e, "RPC call failed");
        }
        result
    }

    /// Like [`call`](Self::call), decoding the result into `T`.
    pub async fn call_as<T: DeserializeOwned>(
        &self,
        command: &str,
        params: Vec<Value>,
    ) -> RpcResult<T> {
        let value = self.call(command, params).await?;
        decode_value(command, value)
    }

    /// Blocking variant of [`call`](Self::call).
    ///
    /// Parks the calling thread until the request completes or times out.
    /// Safe to use from inside a Tokio runtime, though it will block that
    /// worker for the duration.
    pub fn call_sync(&self, command: &str, params: Vec<Value>) -> RpcResult<Value> {
        self.registry.namespace_of(command)?;
        block_on_worker(self.call(command, params))?
    }

    /// Blocking variant of [`call_as`](Self::call_as).
    pub fn call_sync_as<T: DeserializeOwned>(
        &self,
        command: &str,
        params: Vec<Value>,
    ) -> RpcResult<T> {
        let value = self.call_sync(command, params)?;
        decode_value(command, value)
    }
}

impl std::fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient")
            .field("endpoint", &self.endpoint)
            .field("timeout_ms", &self.timeout.as_millis())
            .finish()
    }
}

/// Run `fut` to completion on a dedicated thread with a current-thread runtime.
pub(crate) fn block_on_worker<F>(fut: F) -> RpcResult<F::Output>
where
    F: Future + Send,
    F::Output: Send,
{
    std::thread::scope(|scope| {
        let worker = scope.spawn(move || -> RpcResult<F::Output> {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| RpcError::Internal(format!("failed to start worker runtime: {}", e)))?;
            Ok(runtime.block_on(fut))
        });
        worker
            .join()
            .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
    })
}

fn request_id() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

fn decode_response(method: &str, text: &str) -> RpcResult<Value> {
    let response: RpcResponse =
        serde_json::from_str(text).map_err(|e| RpcError::MalformedResponse {
            method: method.to_string(),
            reason: format!("{}: {}", e, text),
        })?;

    response.into_result().map_err(|error| RpcError::Remote {
        method: method.to_string(),
        error,
    })
}

fn decode_value<T: DeserializeOwned>(command: &str, value: Value) -> RpcResult<T> {
    serde_json::from_value(value).map_err(|e| RpcError::MalformedResponse {
        method: command.to_string(),
        reason: e.to_string(),
    })
}

fn outcome_label<T>(result: &RpcResult<T>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(RpcError::Timeout { .. }) => "timeout",
        Err(RpcError::Connection { .. }) => "connection_error",
        Err(RpcError::Remote { .. }) => "rpc_error",
        Err(RpcError::MalformedResponse { .. }) => "malformed",
        Err(_) => "client_error",
    }
}
