//! Shared mock collaborators for integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use alloy::primitives::{keccak256, Address};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use payhash::blockchain::{
    BlockchainError, BlockchainResult, ChainClient, ChainId, NonceKey, NonceSlot, TokenMetadata,
    TokenTransfer, TransferReceipt, TEMPO_TESTNET_CHAIN_ID,
};
use payhash::config::PresentationConfig;
use payhash::mail::{MailError, MailResult, MailTransport, OutgoingMail};
use payhash::render::{PdfRenderer, RenderResult};
use payhash::{PaymentOrchestrator, TransferRequest};

pub const PDF_BYTES: &[u8] = b"%PDF-1.4 mock";
pub const PENDING_NONCE: u64 = 7;

pub fn sender() -> Address {
    Address::repeat_byte(0x11)
}

pub fn token() -> Address {
    "0x20c0000000000000000000000000000000000001".parse().unwrap()
}

/// A transfer as the chain saw it.
#[derive(Debug, Clone)]
pub struct RecordedTransfer {
    pub transfer: TokenTransfer,
    pub slot: Option<NonceSlot>,
}

/// In-memory chain: every transfer confirms unless its token is marked failing.
pub struct MockChain {
    pub chain_id: u64,
    pub accounts: Vec<Address>,
    pub metadata: TokenMetadata,
    pub failing_tokens: Vec<Address>,
    pub failing_nonce_keys: Vec<NonceKey>,
    pub transfers: Mutex<Vec<RecordedTransfer>>,
    pub nonce_keys: Mutex<Vec<NonceKey>>,
    tx_counter: AtomicU64,
}

impl MockChain {
    pub fn new() -> Self {
        Self {
            chain_id: TEMPO_TESTNET_CHAIN_ID,
            accounts: vec![sender()],
            metadata: TokenMetadata {
                symbol: "AlphaUSD".to_string(),
                decimals: 6,
            },
            failing_tokens: Vec::new(),
            failing_nonce_keys: Vec::new(),
            transfers: Mutex::new(Vec::new()),
            nonce_keys: Mutex::new(Vec::new()),
            tx_counter: AtomicU64::new(0),
        }
    }

    pub fn on_chain(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    pub fn failing_token(mut self, token: Address) -> Self {
        self.failing_tokens.push(token);
        self
    }

    pub fn failing_nonce_key(mut self, key: u64) -> Self {
        self.failing_nonce_keys.push(NonceKey(key));
        self
    }

    pub fn without_accounts(mut self) -> Self {
        self.accounts.clear();
        self
    }

    pub fn transfers(&self) -> Vec<RecordedTransfer> {
        self.transfers.lock().unwrap().clone()
    }

    pub fn nonce_keys(&self) -> Vec<NonceKey> {
        self.nonce_keys.lock().unwrap().clone()
    }

    fn confirm(&self, transfer: TokenTransfer, slot: Option<NonceSlot>) -> TransferReceipt {
        let n = self.tx_counter.fetch_add(1, Ordering::SeqCst);
        self.transfers
            .lock()
            .unwrap()
            .push(RecordedTransfer { transfer, slot });
        TransferReceipt {
            tx_hash: keccak256(n.to_be_bytes()),
            payer: sender(),
            timestamp: Utc.with_ymd_and_hms(2026, 1, 15, 10, 30, 0).unwrap(),
            block_number: Some(100 + n),
        }
    }
}

#[async_trait]
impl ChainClient for MockChain {
    async fn addresses(&self) -> BlockchainResult<Vec<Address>> {
        Ok(self.accounts.clone())
    }

    async fn token_metadata(&self, token: Address) -> BlockchainResult<TokenMetadata> {
        if self.failing_tokens.contains(&token) {
            return Err(BlockchainError::Contract(format!("no code at {}", token)));
        }
        Ok(self.metadata.clone())
    }

    async fn chain_id(&self) -> BlockchainResult<ChainId> {
        Ok(ChainId(self.chain_id))
    }

    async fn transfer_sync(&self, transfer: TokenTransfer) -> BlockchainResult<TransferReceipt> {
        Ok(self.confirm(transfer, None))
    }

    async fn transfer_with_nonce(
        &self,
        transfer: TokenTransfer,
        slot: NonceSlot,
    ) -> BlockchainResult<TransferReceipt> {
        tokio::task::yield_now().await;
        Ok(self.confirm(transfer, Some(slot)))
    }

    async fn nonce(&self, _account: Address, key: NonceKey) -> BlockchainResult<u64> {
        self.nonce_keys.lock().unwrap().push(key);
        if self.failing_nonce_keys.contains(&key) {
            return Err(BlockchainError::Rpc("nonce lookup refused".to_string()));
        }
        Ok(PENDING_NONCE + key.0 - 1)
    }
}

/// Records sent mail; fails sends addressed to `reject` when set.
#[derive(Default)]
pub struct MockMailer {
    pub sent: Mutex<Vec<OutgoingMail>>,
    pub reject: Option<String>,
    pub unreachable: bool,
}

impl MockMailer {
    pub fn rejecting(email: &str) -> Self {
        Self {
            reject: Some(email.to_string()),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for MockMailer {
    async fn verify(&self) -> MailResult<bool> {
        if self.unreachable {
            return Err(MailError::Transport("connection refused".to_string()));
        }
        Ok(true)
    }

    async fn send(&self, mail: OutgoingMail) -> MailResult<()> {
        if let Some(reject) = &self.reject {
            if mail.to.iter().any(|to| &to.email == reject) {
                return Err(MailError::Transport(format!("550 mailbox {} unavailable", reject)));
            }
        }
        self.sent.lock().unwrap().push(mail);
        Ok(())
    }
}

/// Returns fixed bytes and keeps the HTML it was given.
#[derive(Default)]
pub struct MockPdf {
    pub documents: Mutex<Vec<String>>,
}

#[async_trait]
impl PdfRenderer for MockPdf {
    async fn render(&self, html: &str) -> RenderResult<Vec<u8>> {
        self.documents.lock().unwrap().push(html.to_string());
        Ok(PDF_BYTES.to_vec())
    }
}

pub struct Harness {
    pub chain: Arc<MockChain>,
    pub mailer: Arc<MockMailer>,
    pub pdf: Arc<MockPdf>,
    pub orchestrator: PaymentOrchestrator,
}

pub fn harness(chain: MockChain, mailer: MockMailer) -> Harness {
    harness_with(chain, mailer, PresentationConfig::default())
}

pub fn harness_with(
    chain: MockChain,
    mailer: MockMailer,
    presentation: PresentationConfig,
) -> Harness {
    let chain = Arc::new(chain);
    let mailer = Arc::new(mailer);
    let pdf = Arc::new(MockPdf::default());
    let orchestrator =
        PaymentOrchestrator::from_parts(chain.clone(), mailer.clone(), pdf.clone(), presentation)
            .unwrap();
    Harness {
        chain,
        mailer,
        pdf,
        orchestrator,
    }
}

pub fn request(i: usize) -> TransferRequest {
    TransferRequest {
        token: token(),
        amount: "1.5".to_string(),
        memo: None,
        beneficiary: Address::with_last_byte(i as u8 + 1),
        org_name: "Acme Ltd".to_string(),
        org_email: "billing@acme.test".to_string(),
        payer_email: format!("payer{}@client.test", i),
        additional_info: None,
    }
}
