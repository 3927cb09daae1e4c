//! Transfer, receipt and delivery sequencing.
//!
//! # Flow
//! ```text
//! pay:             account → metadata → chain check → transfer_sync → receipt mail
//! batch_pay:       pay, pay, pay ... (one at a time, outcomes only logged)
//! batch_pay_async: account → all nonces (concurrent)
//!                  → all items (concurrent): metadata → transfer_with_nonce → receipt mail
//! ```
//!
//! Every public entry point turns failures into outcome values; nothing is
//! retried.

use std::sync::Arc;
use std::time::Instant;

use alloy::primitives::{Address, Bytes, TxHash};
use futures_util::future::join_all;
use tracing::Instrument;
use uuid::Uuid;

use crate::blockchain::types::{
    BlockchainError, BlockchainResult, ChainId, NonceKey, NonceSlot, TokenTransfer,
    TransferReceipt, TEMPO_TESTNET_CHAIN_ID,
};
use crate::blockchain::{scale_amount, ChainClient};
use crate::config::schema::{PresentationConfig, SmtpConfig};
use crate::error::{PayError, PayResult};
use crate::mail::{MailResult, MailTransport, SmtpMailer};
use crate::observability::metrics;
use crate::payments::receipt::ReceiptMailer;
use crate::payments::types::{
    BatchAck, BatchItemOutcome, BatchResult, ItemStatus, TransferRequest, TransferResult,
    BATCH_ACK_MESSAGE,
};
use crate::render::{ChromePdfRenderer, PdfRenderer};

/// Pays beneficiaries and emails receipts.
pub struct PaymentOrchestrator {
    chain: Arc<dyn ChainClient>,
    receipts: ReceiptMailer,
    /// Transfers are only made on this chain.
    expected_chain_id: ChainId,
}

impl PaymentOrchestrator {
    /// Create an orchestrator delivering over SMTP with Chromium-rendered PDFs.
    ///
    /// # Arguments
    /// * `chain` - Wallet-backed chain client
    /// * `smtp` - Outgoing mail server
    /// * `presentation` - Receipt styling overrides
    pub fn new(
        chain: Arc<dyn ChainClient>,
        smtp: &SmtpConfig,
        presentation: PresentationConfig,
    ) -> PayResult<Self> {
        let mailer = Arc::new(SmtpMailer::new(smtp)?);
        Self::from_parts(chain, mailer, Arc::new(ChromePdfRenderer::new()), presentation)
    }

    /// Create an orchestrator from explicit collaborators.
    ///
    /// Receipt templates are loaded and compiled here, once.
    pub fn from_parts(
        chain: Arc<dyn ChainClient>,
        mailer: Arc<dyn MailTransport>,
        pdf: Arc<dyn PdfRenderer>,
        presentation: PresentationConfig,
    ) -> PayResult<Self> {
        Ok(Self {
            chain,
            receipts: ReceiptMailer::new(presentation, mailer, pdf)?,
            expected_chain_id: ChainId(TEMPO_TESTNET_CHAIN_ID),
        })
    }

    /// Restrict single payments to another chain.
    pub fn with_expected_chain_id(mut self, chain_id: u64) -> Self {
        self.expected_chain_id = ChainId(chain_id);
        self
    }

    /// Check the mail server is reachable and accepts our credentials.
    pub async fn verify_transporter(&self) -> MailResult<bool> {
        self.receipts.verify().await
    }

    /// Make one payment and email its receipt.
    pub async fn pay(&self, request: &TransferRequest) -> TransferResult {
        let started = Instant::now();

        let result = match self.try_pay(request).await {
            Ok((receipt, account)) => {
                tracing::info!(
                    tx_hash = %receipt.tx_hash,
                    beneficiary = %request.beneficiary,
                    amount = %request.amount,
                    "Payment completed"
                );
                TransferResult::Success { receipt, account }
            }
            Err(e) => {
                tracing::error!(
                    beneficiary = %request.beneficiary,
                    error = %e,
                    "Payment failed"
                );
                TransferResult::Failure {
                    error: e.to_string(),
                }
            }
        };

        let outcome = if result.is_success() { "success" } else { "failure" };
        metrics::record_payment(outcome, started.elapsed());
        result
    }

    async fn try_pay(&self, request: &TransferRequest) -> PayResult<(TransferReceipt, Address)> {
        let account = self.sender_account().await?;
        let metadata = self.chain.token_metadata(request.token).await?;

        let chain_id = self.chain.chain_id().await?;
        let receipt = if chain_id == self.expected_chain_id {
            let transfer = TokenTransfer {
                token: request.token,
                to: request.beneficiary,
                amount: scale_amount(&request.amount, metadata.decimals)?,
                memo: request.memo_bytes(),
            };
            Some(self.chain.transfer_sync(transfer).await?)
        } else {
            tracing::warn!(
                expected = self.expected_chain_id.0,
                actual = chain_id.0,
                "Connected to an unexpected chain, transfer skipped"
            );
            None
        };
        let receipt = receipt.ok_or(PayError::ReceiptNotFound)?;

        self.receipts
            .deliver(request, &receipt, &metadata.symbol)
            .await?;
        Ok((receipt, account))
    }

    /// Pay each request in order, one at a time.
    ///
    /// Outcomes are not returned: a failed item is logged and the batch moves
    /// on. Use [`batch_pay_async`](Self::batch_pay_async) for per-item results.
    pub async fn batch_pay(&self, requests: &[TransferRequest]) -> BatchAck {
        let mut failed = 0usize;
        for (index, request) in requests.iter().enumerate() {
            if let TransferResult::Failure { error } = self.pay(request).await {
                failed += 1;
                tracing::warn!(
                    index,
                    beneficiary = %request.beneficiary,
                    error = %error,
                    "Sequential batch item failed"
                );
            }
        }

        tracing::info!(attempted = requests.len(), failed, "Sequential batch finished");
        BatchAck {
            success: true,
            message: BATCH_ACK_MESSAGE.to_string(),
            attempted: requests.len(),
        }
    }

    /// Pay all requests concurrently, each on its own nonce key.
    ///
    /// Item `i` uses nonce key `i + 1`. A failing item never affects the others.
    /// Only a missing sender account fails the whole batch.
    pub async fn batch_pay_async(&self, requests: &[TransferRequest]) -> PayResult<BatchResult> {
        let batch_id = Uuid::new_v4();
        let span = tracing::info_span!("batch", %batch_id, items = requests.len());
        self.run_batch(batch_id, requests).instrument(span).await
    }

    async fn run_batch(&self, batch_id: Uuid, requests: &[TransferRequest]) -> PayResult<BatchResult> {
        let account = self.sender_account().await?;

        let keys: Vec<NonceKey> = (0..requests.len()).map(NonceKey::for_index).collect();
        let nonces = join_all(keys.iter().map(|key| self.chain.nonce(account, *key))).await;

        let items = requests
            .iter()
            .zip(keys)
            .zip(nonces)
            .enumerate()
            .map(|(index, ((request, key), nonce))| self.pay_item(index, request, key, nonce));
        let results = join_all(items).await;

        let sent = results.iter().filter(|item| item.is_sent()).count();
        tracing::info!(sent, failed = results.len() - sent, "Concurrent batch finished");

        Ok(BatchResult {
            success: true,
            batch_id,
            results,
        })
    }

    async fn pay_item(
        &self,
        index: usize,
        request: &TransferRequest,
        key: NonceKey,
        nonce: BlockchainResult<u64>,
    ) -> BatchItemOutcome {
        let status = match self.try_pay_item(request, key, nonce).await {
            Ok(tx_hash) => {
                metrics::record_batch_item("sent");
                ItemStatus::Sent { tx_hash }
            }
            Err(e) => {
                metrics::record_batch_item("failed");
                tracing::error!(
                    index,
                    beneficiary = %request.beneficiary,
                    error = %e,
                    "Batch item failed"
                );
                ItemStatus::Failed {
                    error: e.to_string(),
                }
            }
        };

        BatchItemOutcome {
            index,
            beneficiary: request.beneficiary,
            status,
        }
    }

    async fn try_pay_item(
        &self,
        request: &TransferRequest,
        key: NonceKey,
        nonce: BlockchainResult<u64>,
    ) -> PayResult<TxHash> {
        let slot = NonceSlot { key, nonce: nonce? };
        let metadata = self.chain.token_metadata(request.token).await?;

        // Memos are not attached on the nonce-slot path.
        let transfer = TokenTransfer {
            token: request.token,
            to: request.beneficiary,
            amount: scale_amount(&request.amount, metadata.decimals)?,
            memo: Bytes::new(),
        };
        let receipt = self.chain.transfer_with_nonce(transfer, slot).await?;

        self.receipts
            .deliver(request, &receipt, &metadata.symbol)
            .await?;
        Ok(receipt.tx_hash)
    }

    async fn sender_account(&self) -> PayResult<Address> {
        let account = self
            .chain
            .addresses()
            .await?
            .into_iter()
            .next()
            .ok_or(BlockchainError::NoAccount)?;
        Ok(account)
    }
}
