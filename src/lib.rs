//! Client SDK for the Seele sharded blockchain.
//!
//! Addresses map deterministically to a shard; every account-scoped call
//! goes to the node serving that shard.

pub mod blockchain;
pub mod config;
pub mod observability;
pub mod routing;
pub mod rpc;

pub use blockchain::{SeeleClient, TxBuilder, Wallet};
pub use config::SdkConfig;
pub use routing::{shard_of, ShardId, ShardRouter};
pub use rpc::RpcClient;
