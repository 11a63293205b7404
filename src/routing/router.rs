//! Shard endpoint table.
//!
//! # Responsibilities
//! - Hold the fixed `ShardId -> node URL` table (shard 0 reserved)
//! - Hand out an RPC client for the shard that owns an address
//!
//! # Design Decisions
//! - Immutable after construction; shared via `Arc` without locks
//! - Clients are created per call, matching one connection per request
//! - Unknown shards are an explicit error, never a silent default

use std::sync::Arc;

use alloy::primitives::Address;
use url::Url;

use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::config::schema::NetworkConfig;
use crate::routing::shard::{shard_of, ShardId};
use crate::rpc::{HttpTransport, RpcClient, Transport};

/// Routes addresses to the node serving their shard.
#[derive(Clone)]
pub struct ShardRouter {
    /// Index `i` serves shard `i + 1`.
    endpoints: Vec<Url>,
    timeout_ms: u64,
    transport: Arc<dyn Transport>,
}

impl ShardRouter {
    /// Router over `endpoints` (shard 1 first) using the HTTP transport.
    pub fn new(endpoints: Vec<Url>, timeout_ms: u64) -> Self {
        Self::with_transport(endpoints, timeout_ms, Arc::new(HttpTransport::new()))
    }

    /// Router with an injected transport shared by every shard client.
    pub fn with_transport(
        endpoints: Vec<Url>,
        timeout_ms: u64,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            endpoints,
            timeout_ms,
            transport,
        }
    }

    /// Router from validated network settings.
    pub fn from_config(network: &NetworkConfig, timeout_ms: u64) -> Self {
        Self::new(network.endpoints.clone(), timeout_ms)
    }

    /// Number of shards, which is also the modulus of the shard rule.
    pub fn shard_count(&self) -> u16 {
        self.endpoints.len() as u16
    }

    /// Shard owning `address`. Fails only when the table is empty.
    pub fn shard_of(&self, address: &Address) -> BlockchainResult<ShardId> {
        if self.endpoints.is_empty() {
            return Err(BlockchainError::UnknownShard(0));
        }
        Ok(shard_of(address, self.shard_count()))
    }

    /// Node URL for `shard`.
    pub fn endpoint(&self, shard: ShardId) -> BlockchainResult<&Url> {
        let index = usize::from(shard.0)
            .checked_sub(1)
            .ok_or(BlockchainError::UnknownShard(shard.0))?;
        self.endpoints
            .get(index)
            .ok_or(BlockchainError::UnknownShard(shard.0))
    }

    /// RPC client bound to `shard`'s node.
    pub fn client_for_shard(&self, shard: ShardId) -> BlockchainResult<RpcClient> {
        let url = self.endpoint(shard)?;
        Ok(RpcClient::with_transport(
            url.as_str(),
            self.timeout_ms,
            self.transport.clone(),
        ))
    }

    /// RPC client bound to the node of the shard owning `address`.
    pub fn client_for(&self, address: &Address) -> BlockchainResult<RpcClient> {
        let shard = self.shard_of(address)?;
        tracing::debug!(address = %address, shard = %shard, "Routing to shard");
        self.client_for_shard(shard)
    }
}

impl std::fmt::Debug for ShardRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShardRouter")
            .field("endpoints", &self.endpoints)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}
