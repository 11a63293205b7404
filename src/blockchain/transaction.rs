//! Transaction building, filling and submission.
//!
//! # Responsibilities
//! - Create unsigned transactions with placeholder network fields
//! - Validate transaction drafts coming from outside the process
//! - Fill nonce and gas limit from the sender's shard
//! - Run the full init → fill → sign → submit pipeline
//!
//! # Concurrency
//! `fill` reads the nonce and uses it later without any lock. Two pipelines
//! for the same sender running at once can read the same nonce; callers
//! must serialize submissions per account.

use alloy::primitives::{Address, Bytes};
use serde_json::{Map, Value};

use crate::blockchain::client::SeeleClient;
use crate::blockchain::types::{
    parse_address, parse_payload, BlockchainError, BlockchainResult, SignedTransaction,
    UnsignedTransaction,
};
use crate::blockchain::wallet::Wallet;
use crate::rpc::client::block_on_worker;

/// Type tag for transfers and contract calls.
pub const TX_TYPE_REGULAR: u8 = 0;
/// Gas price placed by `init` and used for estimation.
pub const DEFAULT_GAS_PRICE: u64 = 1;

/// Result of a submitted transaction.
#[derive(Debug, Clone)]
pub struct SendOutcome {
    pub signed: SignedTransaction,
    /// The node's answer to `addTx`.
    pub response: Value,
}

/// Transaction builder bound to a network.
#[derive(Clone, Debug)]
pub struct TxBuilder {
    client: SeeleClient,
}

impl TxBuilder {
    /// Create a new transaction builder.
    pub fn new(client: SeeleClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &SeeleClient {
        &self.client
    }

    /// Unsigned transaction with placeholder nonce, gas and timestamp.
    pub fn init(from: Address, to: Address, amount: u64, payload: Bytes) -> UnsignedTransaction {
        UnsignedTransaction {
            tx_type: TX_TYPE_REGULAR,
            from,
            to,
            amount,
            account_nonce: 0,
            gas_price: DEFAULT_GAS_PRICE,
            gas_limit: 0,
            timestamp: 0,
            payload,
        }
    }

    /// Check a JSON transaction draft and turn it into a typed transaction.
    ///
    /// `From` and `To` are required. Numeric fields accept JSON integers or
    /// decimal strings and default to the `init` placeholders when absent.
    pub fn validate(draft: &Value) -> BlockchainResult<UnsignedTransaction> {
        let fields = draft
            .as_object()
            .ok_or_else(|| BlockchainError::field("Data", "expected a JSON object"))?;

        let from = address_field(fields, "From")?;
        let to = address_field(fields, "To")?;
        let payload = match fields.get("Payload") {
            None | Some(Value::Null) => Bytes::new(),
            Some(Value::String(text)) => parse_payload(text)?,
            Some(other) => {
                return Err(BlockchainError::field(
                    "Payload",
                    format!("expected hex string, got {}", other),
                ))
            }
        };

        let tx_type = integer_field(fields, "Type", u64::from(TX_TYPE_REGULAR))?;
        let tx_type = u8::try_from(tx_type)
            .map_err(|_| BlockchainError::field("Type", format!("{} is out of range", tx_type)))?;

        Ok(UnsignedTransaction {
            tx_type,
            from,
            to,
            amount: integer_field(fields, "Amount", 0)?,
            account_nonce: integer_field(fields, "AccountNonce", 0)?,
            gas_price: integer_field(fields, "GasPrice", DEFAULT_GAS_PRICE)?,
            gas_limit: integer_field(fields, "GasLimit", 0)?,
            timestamp: integer_field(fields, "Timestamp", 0)?,
            payload,
        })
    }

    /// Set `AccountNonce` and `GasLimit` from the sender's shard.
    ///
    /// Queries the nonce and balance, then estimates gas with the balance
    /// as the upper bound.
    pub async fn fill_async(
        &self,
        mut tx: UnsignedTransaction,
    ) -> BlockchainResult<UnsignedTransaction> {
        let nonce = self.client.get_nonce(&tx.from).await?;
        let balance = self.client.get_balance(&tx.from).await?;

        let mut draft = tx.clone();
        draft.amount = 0;
        draft.gas_price = DEFAULT_GAS_PRICE;
        draft.gas_limit = balance.balance;
        draft.account_nonce = nonce;
        let gas_limit = self.client.estimate_gas(&draft).await?;

        tx.account_nonce = nonce;
        tx.gas_limit = gas_limit;

        tracing::debug!(
            from = %tx.from,
            nonce = nonce,
            gas_limit = gas_limit,
            "Transaction filled"
        );
        Ok(tx)
    }

    /// Blocking variant of [`fill_async`](Self::fill_async).
    pub fn fill(&self, tx: UnsignedTransaction) -> BlockchainResult<UnsignedTransaction> {
        block_on_worker(self.fill_async(tx))?
    }

    /// Build, fill and sign a transaction from `wallet` without submitting it.
    pub async fn prepare_async(
        &self,
        wallet: &Wallet,
        to: Address,
        amount: u64,
        payload: Bytes,
    ) -> BlockchainResult<SignedTransaction> {
        let tx = Self::init(wallet.address(), to, amount, payload);
        let tx = self.fill_async(tx).await?;
        wallet.sign(tx)
    }

    /// Build, fill, sign and submit. Never retried.
    pub async fn send_async(
        &self,
        wallet: &Wallet,
        to: Address,
        amount: u64,
        payload: Bytes,
    ) -> BlockchainResult<SendOutcome> {
        let signed = self.prepare_async(wallet, to, amount, payload).await?;
        let response = self.client.add_tx(&signed).await?;
        Ok(SendOutcome { signed, response })
    }

    /// Blocking variant of [`send_async`](Self::send_async).
    pub fn send(
        &self,
        wallet: &Wallet,
        to: Address,
        amount: u64,
        payload: Bytes,
    ) -> BlockchainResult<SendOutcome> {
        block_on_worker(self.send_async(wallet, to, amount, payload))?
    }
}

fn address_field(fields: &Map<String, Value>, name: &'static str) -> BlockchainResult<Address> {
    match fields.get(name) {
        Some(Value::String(text)) => parse_address(text).map_err(|_| {
            BlockchainError::field(
                name,
                format!("'{}' should be of length 42 with prefix 0x", text),
            )
        }),
        Some(other) => Err(BlockchainError::field(
            name,
            format!("expected address string, got {}", other),
        )),
        None => Err(BlockchainError::field(name, "missing")),
    }
}

fn integer_field(
    fields: &Map<String, Value>,
    name: &'static str,
    default: u64,
) -> BlockchainResult<u64> {
    match fields.get(name) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Number(n)) => n.as_u64().ok_or_else(|| {
            BlockchainError::field(name, format!("{} is not a non-negative integer", n))
        }),
        Some(Value::String(text)) => text.trim().parse::<u64>().map_err(|_| {
            BlockchainError::field(name, format!("'{}' is not a non-negative integer", text))
        }),
        Some(other) => Err(BlockchainError::field(
            name,
            format!("expected integer, got {}", other),
        )),
    }
}
