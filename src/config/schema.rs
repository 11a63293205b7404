//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files and
//! every section falls back to defaults, so an empty file is a valid config.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::routing::shard::DEFAULT_SHARD_COUNT;
use crate::rpc::DEFAULT_TIMEOUT_MS;

/// Root configuration for the SDK and CLI.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SdkConfig {
    /// Shard layout and node endpoints.
    pub network: NetworkConfig,

    /// RPC client settings.
    pub rpc: RpcConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Shard layout of the target network.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Number of shards; the modulus of the shard rule.
    pub shard_count: u16,

    /// Node URL per shard, shard 1 first.
    pub endpoints: Vec<Url>,
}

impl NetworkConfig {
    /// Node URL for a 1-based shard number.
    pub fn endpoint(&self, shard: u16) -> Option<&Url> {
        usize::from(shard)
            .checked_sub(1)
            .and_then(|i| self.endpoints.get(i))
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        let endpoints = [
            "http://localhost:8037",
            "http://localhost:8038",
            "http://localhost:8039",
            "http://localhost:8036",
        ]
        .iter()
        .filter_map(|raw| Url::parse(raw).ok())
        .collect();

        Self {
            shard_count: DEFAULT_SHARD_COUNT,
            endpoints,
        }
    }
}

/// RPC client settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RpcConfig {
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
