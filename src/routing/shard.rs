//! Address-to-shard assignment.
//!
//! Mirrors the node's own rule: every account lives on exactly one shard
//! and transactions must be sent to a node of that shard.

use std::fmt;

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::blockchain::types::{parse_address, BlockchainResult};

/// Number of shards on the public network.
pub const DEFAULT_SHARD_COUNT: u16 = 4;

/// Shard identifier in `1..=shard_count`. Shard 0 is reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShardId(pub u16);

impl From<u16> for ShardId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

impl From<ShardId> for u16 {
    fn from(id: ShardId) -> Self {
        id.0
    }
}

impl fmt::Display for ShardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shard that owns `address`.
///
/// Sum of bytes 0..18, plus the trailing big-endian u16 shifted right by
/// four bits, modulo `shard_count`, plus one.
///
/// # Panics
/// If `shard_count` is zero.
pub fn shard_of(address: &Address, shard_count: u16) -> ShardId {
    assert!(shard_count > 0, "shard count must be positive");

    let bytes = address.as_slice();
    let head: u32 = bytes[..18].iter().map(|b| u32::from(*b)).sum();
    let tail = u32::from(u16::from_be_bytes([bytes[18], bytes[19]]) >> 4);

    let shard = (head + tail) % u32::from(shard_count) + 1;
    ShardId(shard as u16)
}

/// Parse `address` and return its shard.
pub fn shard_of_str(address: &str, shard_count: u16) -> BlockchainResult<ShardId> {
    let address = parse_address(address)?;
    Ok(shard_of(&address, shard_count))
}
