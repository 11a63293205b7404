//! Transaction types, address parsing and error definitions.

use alloy::hex;
use alloy::primitives::{Address, Bytes, B256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rpc::RpcError;

/// Errors that can occur while building, signing or routing transactions.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// Address text is not `0x` followed by 40 hex digits.
    #[error("Invalid address '{0}': expected 0x followed by 40 hex digits")]
    InvalidAddress(String),

    /// Private key has the wrong shape or is not a valid curve scalar.
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// A transaction field is missing, non-numeric, negative or malformed.
    #[error("Invalid transaction field {field}: {reason}")]
    InvalidTransactionField { field: &'static str, reason: String },

    /// Signature could not be decoded or recovered.
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// No endpoint is configured for the shard.
    #[error("No endpoint configured for shard {0}")]
    UnknownShard(u16),

    /// The signer failed to produce a signature.
    #[error("Signing failed: {0}")]
    Signing(String),

    /// The node could not be reached or rejected the request.
    #[error(transparent)]
    Rpc(#[from] RpcError),
}

impl BlockchainError {
    pub(crate) fn field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidTransactionField {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// Parse `0x` + 40 hex digits (any case) into an address.
pub fn parse_address(text: &str) -> BlockchainResult<Address> {
    let digits = text
        .strip_prefix("0x")
        .filter(|digits| digits.len() == 40)
        .ok_or_else(|| BlockchainError::InvalidAddress(text.to_string()))?;

    let mut bytes = [0u8; 20];
    hex::decode_to_slice(digits, &mut bytes)
        .map_err(|_| BlockchainError::InvalidAddress(text.to_string()))?;
    Ok(Address::from(bytes))
}

/// Parse a `0x`-prefixed hex payload. `""` and `"0x"` are both empty.
pub fn parse_payload(text: &str) -> BlockchainResult<Bytes> {
    if text.is_empty() {
        return Ok(Bytes::new());
    }
    let digits = text
        .strip_prefix("0x")
        .ok_or_else(|| BlockchainError::field("Payload", "expected 0x-prefixed hex"))?;
    hex::decode(digits)
        .map(Bytes::from)
        .map_err(|e| BlockchainError::field("Payload", e.to_string()))
}

/// Transaction before signing.
///
/// Field names and order follow the network's JSON and signing layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UnsignedTransaction {
    /// 0 for transfers and contract calls.
    #[serde(rename = "Type")]
    pub tx_type: u8,
    pub from: Address,
    pub to: Address,
    pub amount: u64,
    pub account_nonce: u64,
    pub gas_price: u64,
    pub gas_limit: u64,
    /// Unused by the network today; kept at 0.
    pub timestamp: u64,
    pub payload: Bytes,
}

/// Signature envelope as the node expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxSignature {
    /// base64 of `r ‖ s ‖ recovery_id`.
    #[serde(rename = "Sig")]
    pub sig: String,
}

/// Transaction ready for `addTx`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SignedTransaction {
    pub hash: B256,
    pub data: UnsignedTransaction,
    pub signature: TxSignature,
}

/// Answer of `getBalance`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BalanceInfo {
    #[serde(rename = "Account", default)]
    pub account: String,
    #[serde(rename = "Balance")]
    pub balance: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_address() {
        let addr = parse_address("0x6e21f6b5efb13424c26f701c7bf47a68981c3e41").unwrap();
        assert_eq!(addr[0], 0x6e);
        assert_eq!(addr[19], 0x41);

        let upper = parse_address("0x6E21F6B5EFB13424C26F701C7BF47A68981C3E41").unwrap();
        assert_eq!(addr, upper);
    }

    #[test]
    fn test_parse_address_rejects_malformed() {
        for bad in [
            "",
            "0x",
            "6e21f6b5efb13424c26f701c7bf47a68981c3e41",
            "0x6e21f6b5efb13424c26f701c7bf47a68981c3e4",
            "0x6e21f6b5efb13424c26f701c7bf47a68981c3e411",
            "0x6e21f6b5efb13424c26f701c7bf47a68981c3e4g",
            "0X6e21f6b5efb13424c26f701c7bf47a68981c3e41",
        ] {
            let err = parse_address(bad).unwrap_err();
            assert!(matches!(err, BlockchainError::InvalidAddress(ref s) if s == bad));
        }
    }

    #[test]
    fn test_parse_payload() {
        assert!(parse_payload("").unwrap().is_empty());
        assert!(parse_payload("0x").unwrap().is_empty());
        assert_eq!(parse_payload("0x60fe").unwrap().as_ref(), &[0x60, 0xfe]);
        assert!(parse_payload("60fe").is_err());
        assert!(parse_payload("0x6").is_err());
        assert!(parse_payload("0xzz").is_err());
    }

    #[test]
    fn test_transaction_json_field_names() {
        let tx = UnsignedTransaction {
            tx_type: 0,
            from: Address::repeat_byte(0x11),
            to: Address::repeat_byte(0x22),
            amount: 5,
            account_nonce: 1,
            gas_price: 1,
            gas_limit: 21000,
            timestamp: 0,
            payload: Bytes::from(vec![0xab]),
        };
        let value = serde_json::to_value(&tx).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        for key in [
            "Type",
            "From",
            "To",
            "Amount",
            "AccountNonce",
            "GasPrice",
            "GasLimit",
            "Timestamp",
            "Payload",
        ] {
            assert!(keys.iter().any(|k| k == key), "missing {}", key);
        }
        assert_eq!(value["Payload"], json!("0xab"));
        assert_eq!(value["GasLimit"], json!(21000));
    }

    #[test]
    fn test_balance_info() {
        let info: BalanceInfo =
            serde_json::from_value(json!({"Account": "0xabc", "Balance": 1500})).unwrap();
        assert_eq!(info.balance, 1500);
    }

    #[test]
    fn test_error_display() {
        let err = BlockchainError::field("Amount", "must be a non-negative integer");
        assert_eq!(
            err.to_string(),
            "Invalid transaction field Amount: must be a non-negative integer"
        );
        let err: BlockchainError = RpcError::UnknownCommand("nope".into()).into();
        assert!(err.to_string().contains("nope"));
    }
}
