//! Static registry of node RPC commands.
//!
//! # Responsibilities
//! - Answer whether a bare command name is part of the node API
//! - Map a bare name to the namespace that owns it
//! - Produce the qualified wire method (`namespace_command`)
//!
//! # Design Decisions
//! - Compiled-in table, never mutated at runtime
//! - A name belongs to exactly one namespace
//! - Unknown names are rejected before any request is built

use std::fmt;

use crate::rpc::types::{RpcError, RpcResult};

/// RPC namespace exposed by a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Seele,
    Txpool,
    Network,
    Miner,
    Debug,
    Download,
    Monitor,
}

impl Namespace {
    /// Wire prefix for this namespace.
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Seele => "seele",
            Namespace::Txpool => "txpool",
            Namespace::Network => "network",
            Namespace::Miner => "miner",
            Namespace::Debug => "debug",
            Namespace::Download => "download",
            Namespace::Monitor => "monitor",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type CommandTable = &'static [(Namespace, &'static [&'static str])];

const COMMANDS: CommandTable = &[
    (
        Namespace::Seele,
        &[
            "getInfo",
            "getBalance",
            "getAccountNonce",
            "getBlockHeight",
            "getBlock",
            "getBlockByHeight",
            "getBlockByHash",
            "getBlocks",
            "getLogs",
            "call",
            "addTx",
            "estimateGas",
            "generatePayload",
            "getShardNum",
        ],
    ),
    (
        Namespace::Txpool,
        &[
            "getTransactionByHash",
            "getReceiptByTxHash",
            "getTransactionByBlockIndex",
            "getTransactionByBlockHeightAndIndex",
            "getDebtByHash",
            "getTxPoolContent",
            "getTxPoolTxCount",
            "getPendingTransactions",
            "getPendingDebts",
        ],
    ),
    (
        Namespace::Network,
        &[
            "getPeersInfo",
            "getPeerCount",
            "getNetworkVersion",
            "getProtocolVersion",
            "getNetworkID",
            "isListening",
        ],
    ),
    (
        Namespace::Miner,
        &[
            "start",
            "stop",
            "status",
            "getCoinbase",
            "setCoinbase",
            "setThreads",
            "getEngineInfo",
        ],
    ),
    (Namespace::Debug, &["printBlock", "dumpHeap"]),
    (Namespace::Download, &["getStatus"]),
    (Namespace::Monitor, &["nodeInfo", "nodeStats"]),
];

/// Closed vocabulary of commands the client may send.
#[derive(Debug, Clone, Copy)]
pub struct CommandRegistry {
    table: CommandTable,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl CommandRegistry {
    /// Registry backed by the built-in node API table.
    pub const fn standard() -> Self {
        Self { table: COMMANDS }
    }

    /// Returns true if `name` is a registered command.
    pub fn is_command(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Namespace that owns `name`.
    pub fn namespace_of(&self, name: &str) -> RpcResult<Namespace> {
        self.lookup(name)
            .ok_or_else(|| RpcError::UnknownCommand(name.to_string()))
    }

    /// Fully-qualified wire method for `name`, e.g. `seele_getBalance`.
    pub fn qualify(&self, name: &str) -> RpcResult<String> {
        let namespace = self.namespace_of(name)?;
        Ok(format!("{}_{}", namespace, name))
    }

    /// Every `(namespace, command)` pair in table order.
    pub fn commands(&self) -> impl Iterator<Item = (Namespace, &'static str)> {
        self.table
            .iter()
            .flat_map(|(ns, names)| names.iter().map(move |name| (*ns, *name)))
    }

    fn lookup(&self, name: &str) -> Option<Namespace> {
        self.table
            .iter()
            .find(|(_, names)| names.iter().any(|candidate| *candidate == name))
            .map(|(ns, _)| *ns)
    }
}
