//! Payment request and outcome types.

use alloy::primitives::{Address, Bytes, TxHash};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::blockchain::types::TransferReceipt;

/// Message returned by a sequential batch.
pub const BATCH_ACK_MESSAGE: &str = "Batch payment successful";

/// One payment to make: transfer plus receipt addressing.
///
/// Field aliases accept the names used by the JavaScript SDK (`orgAddress`,
/// `orgMail`, `clientMail`) so existing request files load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    /// Token contract.
    pub token: Address,
    /// Decimal amount in whole tokens, e.g. `"1.5"`.
    pub amount: String,
    #[serde(default)]
    pub memo: Option<String>,
    /// Organisation receiving the payment.
    #[serde(alias = "orgAddress")]
    pub beneficiary: Address,
    pub org_name: String,
    #[serde(alias = "orgMail")]
    pub org_email: String,
    #[serde(alias = "clientMail")]
    pub payer_email: String,
    #[serde(default)]
    pub additional_info: Option<String>,
}

impl TransferRequest {
    /// Memo payload as raw bytes (empty when absent).
    pub fn memo_bytes(&self) -> Bytes {
        self.memo
            .as_deref()
            .map(|memo| Bytes::copy_from_slice(memo.as_bytes()))
            .unwrap_or_default()
    }
}

/// Outcome of a single payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum TransferResult {
    Success {
        receipt: TransferReceipt,
        /// Account the transfer was sent from.
        account: Address,
    },
    Failure {
        error: String,
    },
}

impl TransferResult {
    pub fn is_success(&self) -> bool {
        matches!(self, TransferResult::Success { .. })
    }

    pub fn receipt(&self) -> Option<&TransferReceipt> {
        match self {
            TransferResult::Success { receipt, .. } => Some(receipt),
            TransferResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            TransferResult::Success { .. } => None,
            TransferResult::Failure { error } => Some(error),
        }
    }
}

/// Acknowledgement of a sequential batch.
///
/// Individual outcomes are not reported; failed items are only logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchAck {
    pub success: bool,
    pub message: String,
    /// Number of payments attempted (always the input length).
    pub attempted: usize,
}

/// Per-item status of a concurrent batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ItemStatus {
    Sent {
        #[serde(rename = "txHash")]
        tx_hash: TxHash,
    },
    Failed {
        error: String,
    },
}

/// Outcome of one item in a concurrent batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchItemOutcome {
    /// Position in the input.
    pub index: usize,
    pub beneficiary: Address,
    #[serde(flatten)]
    pub status: ItemStatus,
}

impl BatchItemOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self.status, ItemStatus::Sent { .. })
    }

    pub fn tx_hash(&self) -> Option<TxHash> {
        match self.status {
            ItemStatus::Sent { tx_hash } => Some(tx_hash),
            ItemStatus::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            ItemStatus::Sent { .. } => None,
            ItemStatus::Failed { error } => Some(error),
        }
    }
}

/// Result of a concurrent batch.
///
/// `success` means every item ran to completion, not that every item
/// succeeded; inspect `results` for partial failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub success: bool,
    pub batch_id: Uuid,
    /// One entry per request, in input order.
    pub results: Vec<BatchItemOutcome>,
}

impl BatchResult {
    pub fn failed(&self) -> impl Iterator<Item = &BatchItemOutcome> {
        self.results.iter().filter(|item| !item.is_sent())
    }

    pub fn sent_count(&self) -> usize {
        self.results.iter().filter(|item| item.is_sent()).count()
    }
}
