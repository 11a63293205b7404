//! Shard-aware node client.
//!
//! # Responsibilities
//! - Route every account-scoped query to the node of the account's shard
//! - Decode the node's answers into typed values where the shape is known
//! - Submit signed transactions without retrying
//!
//! Each method opens its own RPC call; nothing is cached between calls.

use std::sync::Arc;

use alloy::primitives::{Address, Bytes, B256};
use serde_json::{json, Value};

use crate::blockchain::types::{
    BalanceInfo, BlockchainResult, SignedTransaction, UnsignedTransaction,
};
use crate::config::SdkConfig;
use crate::routing::{ShardId, ShardRouter};

/// "Latest block" marker accepted by state queries.
const LATEST_BLOCK: i64 = -1;

/// Node client that picks the right shard per call.
#[derive(Clone, Debug)]
pub struct SeeleClient {
    router: Arc<ShardRouter>,
}

impl SeeleClient {
    pub fn new(router: ShardRouter) -> Self {
        Self {
            router: Arc::new(router),
        }
    }

    /// Client for the network described by `config`.
    pub fn from_config(config: &SdkConfig) -> Self {
        Self::new(ShardRouter::from_config(
            &config.network,
            config.rpc.timeout_ms,
        ))
    }

    pub fn router(&self) -> &ShardRouter {
        &self.router
    }

    /// Current account nonce of `account`.
    pub async fn get_nonce(&self, account: &Address) -> BlockchainResult<u64> {
        let rpc = self.router.client_for(account)?;
        let nonce = rpc
            .call_as(
                "getAccountNonce",
                vec![json!(account), json!(""), json!(LATEST_BLOCK)],
            )
            .await?;
        Ok(nonce)
    }

    /// Balance of `account`.
    pub async fn get_balance(&self, account: &Address) -> BlockchainResult<BalanceInfo> {
        let rpc = self.router.client_for(account)?;
        let info = rpc
            .call_as(
                "getBalance",
                vec![json!(account), json!(""), json!(LATEST_BLOCK)],
            )
            .await?;
        Ok(info)
    }

    /// Gas the node expects `draft` to consume.
    ///
    /// `draft.gas_limit` acts as the upper bound for the estimate.
    pub async fn estimate_gas(&self, draft: &UnsignedTransaction) -> BlockchainResult<u64> {
        let rpc = self.router.client_for(&draft.from)?;
        let request = json!({
            "Data": {
                "From": draft.from,
                "To": draft.to,
                "Amount": draft.amount,
                "GasPrice": draft.gas_price,
                "GasLimit": draft.gas_limit,
                "Payload": draft.payload,
                "AccountNonce": draft.account_nonce,
            }
        });
        let gas = rpc.call_as("estimateGas", vec![request]).await?;
        Ok(gas)
    }

    /// Submit a signed transaction to the sender's shard.
    pub async fn add_tx(&self, signed: &SignedTransaction) -> BlockchainResult<Value> {
        let rpc = self.router.client_for(&signed.data.from)?;
        tracing::info!(
            hash = %signed.hash,
            from = %signed.data.from,
            nonce = signed.data.account_nonce,
            endpoint = %rpc.endpoint(),
            "Submitting transaction"
        );
        Ok(rpc.call("addTx", vec![json!(signed)]).await?)
    }

    /// Read-only contract call against the latest block.
    pub async fn call_contract(&self, contract: &Address, payload: &Bytes) -> BlockchainResult<Value> {
        let rpc = self.router.client_for(contract)?;
        Ok(rpc
            .call("call", vec![json!(contract), json!(payload), json!(LATEST_BLOCK)])
            .await?)
    }

    /// `getInfo` of the node serving `shard`.
    pub async fn node_info(&self, shard: ShardId) -> BlockchainResult<Value> {
        let rpc = self.router.client_for_shard(shard)?;
        Ok(rpc.call("getInfo", vec![]).await?)
    }

    /// Ask the node to ABI-encode a call to `method` of the contract at `contract`.
    pub async fn generate_payload(
        &self,
        abi: &str,
        method: &str,
        args: &[String],
        contract: &Address,
    ) -> BlockchainResult<Value> {
        let rpc = self.router.client_for(contract)?;
        Ok(rpc
            .call("generatePayload", vec![json!(abi), json!(method), json!(args)])
            .await?)
    }

    /// Transaction by hash, looked up on `shard`.
    pub async fn transaction_by_hash(&self, hash: &B256, shard: ShardId) -> BlockchainResult<Value> {
        let rpc = self.router.client_for_shard(shard)?;
        Ok(rpc.call("getTransactionByHash", vec![json!(hash)]).await?)
    }

    /// Receipt of a transaction, looked up on `shard`.
    pub async fn receipt_by_hash(&self, hash: &B256, shard: ShardId) -> BlockchainResult<Value> {
        let rpc = self.router.client_for_shard(shard)?;
        Ok(rpc
            .call("getReceiptByTxHash", vec![json!(hash), json!("")])
            .await?)
    }

    /// Any registered command against `shard`.
    pub async fn invoke(
        &self,
        shard: ShardId,
        command: &str,
        params: Vec<Value>,
    ) -> BlockchainResult<Value> {
        let rpc = self.router.client_for_shard(shard)?;
        Ok(rpc.call(command, params).await?)
    }
}
