//! Chain-specific types and error definitions.

use alloy::primitives::{Address, Bytes, TxHash, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export BlockchainConfig from config module to avoid duplication
pub use crate::config::schema::BlockchainConfig;

/// Chain ID of the Tempo testnet, the network receipts are issued for by default.
pub const TEMPO_TESTNET_CHAIN_ID: u64 = 42429;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Identifier of an independent nonce sequence for one account.
///
/// Transactions on different keys never wait on each other, which is what lets
/// a batch be submitted concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NonceKey(pub u64);

impl NonceKey {
    /// Key assigned to the item at `index` of a batch (keys start at 1).
    pub fn for_index(index: usize) -> Self {
        Self(index as u64 + 1)
    }
}

/// A nonce key together with the nonce value reserved on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonceSlot {
    pub key: NonceKey,
    pub nonce: u64,
}

/// Token metadata as reported by the token contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub symbol: String,
    pub decimals: u8,
}

/// A token transfer ready for submission (amount already scaled to base units).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenTransfer {
    pub token: Address,
    pub to: Address,
    pub amount: U256,
    /// Opaque memo payload; empty means no memo.
    pub memo: Bytes,
}

/// Confirmation data for a mined transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferReceipt {
    pub tx_hash: TxHash,
    /// Address that paid for the transfer.
    pub payer: Address,
    /// Block timestamp of inclusion.
    pub timestamp: DateTime<Utc>,
    pub block_number: Option<u64>,
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Transaction was reverted on-chain.
    #[error("Transaction reverted: {0}")]
    Reverted(String),

    /// Invalid private key format or derivation error.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// The client exposes no sender account.
    #[error("No sender account available")]
    NoAccount,

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    /// Memo does not fit the on-chain memo field.
    #[error("Memo is {0} bytes, at most 32 are allowed")]
    InvalidMemo(usize),

    /// Amount string could not be scaled to token units.
    #[error("Invalid amount '{amount}': {reason}")]
    InvalidAmount { amount: String, reason: String },

    /// Token contract call failed.
    #[error("Contract call failed: {0}")]
    Contract(String),
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_conversion() {
        let chain_id = ChainId::from(TEMPO_TESTNET_CHAIN_ID);
        assert_eq!(chain_id.0, 42429);
        assert_eq!(u64::from(chain_id), 42429);
    }

    #[test]
    fn test_nonce_key_for_index() {
        assert_eq!(NonceKey::for_index(0), NonceKey(1));
        assert_eq!(NonceKey::for_index(9), NonceKey(10));
    }

    #[test]
    fn test_default_config() {
        let config = BlockchainConfig::default();
        assert_eq!(config.chain_id, TEMPO_TESTNET_CHAIN_ID);
        assert_eq!(config.rpc_timeout_secs, 10);
        assert_eq!(config.receipt_timeout_secs, 60);
    }

    #[test]
    fn test_error_display() {
        let err = BlockchainError::Timeout(10);
        assert_eq!(err.to_string(), "RPC timeout after 10 seconds");

        let err = BlockchainError::ChainMismatch {
            expected: 42429,
            actual: 1,
        };
        assert!(err.to_string().contains("42429"));
    }

    #[test]
    fn test_receipt_serializes_camel_case() {
        let receipt = TransferReceipt {
            tx_hash: TxHash::ZERO,
            payer: Address::ZERO,
            timestamp: DateTime::from_timestamp(0, 0).unwrap(),
            block_number: Some(7),
        };
        let json = serde_json::to_value(&receipt).unwrap();
        assert!(json.get("txHash").is_some());
        assert_eq!(json["blockNumber"], 7);
    }
}
