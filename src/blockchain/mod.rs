//! Transactions, signing and shard-aware node access.
//!
//! # Data Flow
//! ```text
//! TxBuilder::init (placeholders)
//!     → TxBuilder::fill (nonce, balance, estimateGas on the sender's shard)
//!     → codec.rs (RLP pre-image, Keccak-256 hash)
//!     → wallet.rs (secp256k1 signature, base64 envelope)
//!     → SeeleClient::add_tx
//! ```
//!
//! # Security Constraints
//! - Private keys come from the caller or `SEELE_PRIVATE_KEY`
//! - Keys are never logged or serialized
//! - Submissions are never retried

pub mod client;
pub mod codec;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::SeeleClient;
pub use codec::{encode_transaction, transaction_hash};
pub use transaction::{SendOutcome, TxBuilder};
pub use types::{
    parse_address, parse_payload, BalanceInfo, BlockchainError, BlockchainResult,
    SignedTransaction, TxSignature, UnsignedTransaction,
};
pub use wallet::{public_key_of, recover_signer, sign_transaction, Wallet};
