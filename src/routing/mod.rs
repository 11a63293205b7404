//! Shard routing subsystem.
//!
//! # Data Flow
//! ```text
//! Address (sender, contract, account)
//!     → shard.rs (byte-sum rule → ShardId)
//!     → router.rs (ShardId → node URL → RpcClient)
//! ```
//!
//! # Design Decisions
//! - The shard rule is part of the network protocol: it must match the
//!   node bit for bit, so it is a plain pure function
//! - Deterministic: same address always maps to the same shard

pub mod router;
pub mod shard;

pub use router::ShardRouter;
pub use shard::{shard_of, shard_of_str, ShardId, DEFAULT_SHARD_COUNT};
