//! Canonical transaction encoding.
//!
//! The signing pre-image is the RLP list
//! `[Type, From, To, Amount, AccountNonce, GasPrice, GasLimit, Timestamp, Payload]`.
//! Integers are minimal big-endian strings (zero is the empty string),
//! addresses are 20-byte strings. Order and arity are consensus rules: any
//! change produces a different hash and a signature the node rejects.

use alloy::primitives::{keccak256, B256};
use alloy::rlp::{Encodable, Header};

use crate::blockchain::types::UnsignedTransaction;

/// RLP bytes of the nine signed fields.
pub fn encode_transaction(tx: &UnsignedTransaction) -> Vec<u8> {
    let payload_length = tx.tx_type.length()
        + tx.from.length()
        + tx.to.length()
        + tx.amount.length()
        + tx.account_nonce.length()
        + tx.gas_price.length()
        + tx.gas_limit.length()
        + tx.timestamp.length()
        + tx.payload.length();

    let mut out = Vec::with_capacity(payload_length + 9);
    Header {
        list: true,
        payload_length,
    }
    .encode(&mut out);
    tx.tx_type.encode(&mut out);
    tx.from.encode(&mut out);
    tx.to.encode(&mut out);
    tx.amount.encode(&mut out);
    tx.account_nonce.encode(&mut out);
    tx.gas_price.encode(&mut out);
    tx.gas_limit.encode(&mut out);
    tx.timestamp.encode(&mut out);
    tx.payload.encode(&mut out);
    out
}

/// Keccak-256 of the canonical encoding.
pub fn transaction_hash(tx: &UnsignedTransaction) -> B256 {
    keccak256(encode_transaction(tx))
}
