//! Key handling and transaction signing.
//!
//! # Security
//! - Private keys are never logged or serialized
//! - Signing returns fresh values; nothing from a previous signature is kept
//!
//! Account addresses follow the network's convention: Keccak-256 of the
//! RLP-encoded 64-byte public key, last 20 bytes, with the final hex digit
//! forced to `1`.

use alloy::hex;
use alloy::primitives::{keccak256, Address, U256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::{Signature, SignerSync};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use k256::ecdsa::VerifyingKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;

use crate::blockchain::codec::transaction_hash;
use crate::blockchain::types::{
    BlockchainError, BlockchainResult, SignedTransaction, TxSignature, UnsignedTransaction,
};

/// Environment variable the CLI reads the private key from.
pub const PRIVATE_KEY_ENV_VAR: &str = "SEELE_PRIVATE_KEY";

/// Last hex digit of every account address.
const ACCOUNT_MARKER: u8 = 0x1;

/// A secp256k1 key able to sign transactions.
#[derive(Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
    address: Address,
}

impl Wallet {
    /// Create a wallet from a `0x`-prefixed, 64-hex-digit private key.
    pub fn from_private_key(private_key: &str) -> BlockchainResult<Self> {
        if private_key.len() != 66 {
            return Err(BlockchainError::InvalidPrivateKey(format!(
                "expected 66 characters including 0x, got {}",
                private_key.len()
            )));
        }
        let digits = private_key.strip_prefix("0x").ok_or_else(|| {
            BlockchainError::InvalidPrivateKey("private key must start with 0x".to_string())
        })?;
        let bytes = hex::decode(digits)
            .map_err(|e| BlockchainError::InvalidPrivateKey(format!("not hex: {}", e)))?;

        let signer = PrivateKeySigner::from_slice(&bytes).map_err(|_| {
            BlockchainError::InvalidPrivateKey("not a valid secp256k1 scalar".to_string())
        })?;
        let address = account_address(signer.credential().verifying_key());

        tracing::debug!(address = %address, "Wallet loaded");

        Ok(Self { signer, address })
    }

    /// Load wallet from environment variable.
    ///
    /// Reads `SEELE_PRIVATE_KEY` from environment.
    pub fn from_env() -> BlockchainResult<Self> {
        let private_key = std::env::var(PRIVATE_KEY_ENV_VAR).map_err(|_| {
            BlockchainError::InvalidPrivateKey(format!(
                "environment variable {} not set",
                PRIVATE_KEY_ENV_VAR
            ))
        })?;
        Self::from_private_key(&private_key)
    }

    /// Account address of this key.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Hash and sign `tx`, producing the envelope the node accepts.
    pub fn sign(&self, tx: UnsignedTransaction) -> BlockchainResult<SignedTransaction> {
        let hash = transaction_hash(&tx);
        let signature = self
            .signer
            .sign_hash_sync(&hash)
            .map_err(|e| BlockchainError::Signing(e.to_string()))?;

        tracing::debug!(hash = %hash, from = %tx.from, nonce = tx.account_nonce, "Transaction signed");

        Ok(SignedTransaction {
            hash,
            data: tx,
            signature: TxSignature {
                sig: encode_signature(&signature),
            },
        })
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Account address for a private key.
pub fn public_key_of(private_key: &str) -> BlockchainResult<Address> {
    Wallet::from_private_key(private_key).map(|wallet| wallet.address())
}

/// Sign `tx` with a private key given as text.
pub fn sign_transaction(
    private_key: &str,
    tx: UnsignedTransaction,
) -> BlockchainResult<SignedTransaction> {
    Wallet::from_private_key(private_key)?.sign(tx)
}

/// Recover the account that signed `signed`.
///
/// Fails if the hash does not match the transaction data or the signature
/// cannot be decoded.
pub fn recover_signer(signed: &SignedTransaction) -> BlockchainResult<Address> {
    if transaction_hash(&signed.data) != signed.hash {
        return Err(BlockchainError::InvalidSignature(
            "hash does not match transaction data".to_string(),
        ));
    }

    let raw = BASE64
        .decode(&signed.signature.sig)
        .map_err(|e| BlockchainError::InvalidSignature(format!("not base64: {}", e)))?;
    if raw.len() != 65 {
        return Err(BlockchainError::InvalidSignature(format!(
            "expected 65 bytes, got {}",
            raw.len()
        )));
    }
    let parity = match raw[64] {
        0 => false,
        1 => true,
        other => {
            return Err(BlockchainError::InvalidSignature(format!(
                "recovery id {} out of range",
                other
            )))
        }
    };

    let signature = Signature::new(
        U256::from_be_slice(&raw[..32]),
        U256::from_be_slice(&raw[32..64]),
        parity,
    );
    let key = signature
        .recover_from_prehash(&signed.hash)
        .map_err(|e| BlockchainError::InvalidSignature(e.to_string()))?;
    Ok(account_address(&key))
}

fn account_address(key: &VerifyingKey) -> Address {
    let point = key.as_affine().to_encoded_point(false);
    // Drop the 0x04 uncompressed tag; the remaining 64 bytes are x ‖ y.
    let encoded = alloy::rlp::encode(&point.as_bytes()[1..]);
    let digest = keccak256(encoded);

    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&digest[12..]);
    bytes[19] = (bytes[19] & 0xf0) | ACCOUNT_MARKER;
    Address::from(bytes)
}

fn encode_signature(signature: &Signature) -> String {
    let mut raw = [0u8; 65];
    raw[..32].copy_from_slice(&signature.r().to_be_bytes::<32>());
    raw[32..64].copy_from_slice(&signature.s().to_be_bytes::<32>());
    raw[64] = u8::from(signature.v());
    BASE64.encode(raw)
}
