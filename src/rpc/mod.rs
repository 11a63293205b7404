//! Node RPC subsystem.
//!
//! # Data Flow
//! ```text
//! caller: call("getBalance", params)
//!     → commands.rs (is it registered? which namespace?)
//!     → client.rs (build {id, method: "seele_getBalance", params}, apply timeout)
//!     → transport.rs (POST application/json to the shard's node)
//!     → client.rs (error field wins, else hand back `result`)
//! ```

pub mod client;
pub mod commands;
pub mod transport;
pub mod types;

pub use client::RpcClient;
pub use commands::{CommandRegistry, Namespace};
pub use transport::{HttpTransport, Transport, TransportError};
pub use types::{RpcError, RpcRequest, RpcResponse, RpcResult, DEFAULT_TIMEOUT_MS};
