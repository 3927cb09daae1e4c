//! Alloy-backed chain client with timeouts and RPC failover.
//!
//! # Responsibilities
//! - Connect to JSON-RPC endpoints (primary + failovers)
//! - Read token metadata, chain ID and nonces with per-call timeouts
//! - Submit token transfers from the wallet and wait for receipts
//! - Normalise receipts into [`TransferReceipt`]

use std::future::Future;
use std::time::Duration;

use alloy::eips::BlockNumberOrTag;
use alloy::primitives::{Address, Bytes, B256};
use alloy::providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder};
use alloy::sol;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::time::timeout;

use crate::blockchain::chain::ChainClient;
use crate::blockchain::types::{
    BlockchainConfig, BlockchainError, BlockchainResult, ChainId, NonceKey, NonceSlot,
    TokenMetadata, TokenTransfer, TransferReceipt,
};
use crate::blockchain::wallet::Wallet;

sol! {
    /// TIP-20 token surface (ERC-20 plus memo transfers).
    #[sol(rpc)]
    interface ITip20 {
        function symbol() external view returns (string memory);
        function decimals() external view returns (uint8);
        function transfer(address to, uint256 amount) external returns (bool);
        function transferWithMemo(address to, uint256 amount, bytes32 memo) external;
    }
}

/// Chain client that signs with a local [`Wallet`].
#[derive(Clone)]
pub struct AlloyChainClient {
    /// Read providers (primary + failovers).
    readers: Vec<DynProvider>,
    /// Wallet-filled provider on the primary endpoint.
    sender: DynProvider,
    wallet: Wallet,
    config: BlockchainConfig,
    /// Per-call timeout for reads.
    timeout_duration: Duration,
    /// How long a synchronous transfer may wait for its receipt.
    receipt_timeout: Duration,
}

impl AlloyChainClient {
    /// Create a new chain client.
    ///
    /// Fails only when the primary RPC URL is malformed; an unreachable node is
    /// logged and tolerated.
    pub async fn new(config: BlockchainConfig, wallet: Wallet) -> BlockchainResult<Self> {
        let primary_url: url::Url = config.rpc_url.parse().map_err(|e| {
            BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;

        let mut readers = vec![ProviderBuilder::new()
            .connect_http(primary_url.clone())
            .erased()];

        for url_str in &config.failover_urls {
            match url_str.parse::<url::Url>() {
                Ok(url) => readers.push(ProviderBuilder::new().connect_http(url).erased()),
                Err(_) => tracing::warn!(url = %url_str, "Ignoring invalid failover RPC URL"),
            }
        }

        let sender = ProviderBuilder::new()
            .wallet(wallet.ethereum_wallet())
            .connect_http(primary_url)
            .erased();

        let client = Self {
            readers,
            sender,
            wallet,
            timeout_duration: Duration::from_secs(config.rpc_timeout_secs),
            receipt_timeout: Duration::from_secs(config.receipt_timeout_secs),
            config,
        };

        match client.verify_chain_id().await {
            Ok(()) => tracing::info!(
                rpc_url = %client.config.rpc_url,
                chain_id = client.config.chain_id,
                account = %client.wallet.address(),
                "Chain client initialized"
            ),
            Err(e) => tracing::warn!(
                error = %e,
                "Chain client initialized but chain verification failed"
            ),
        }

        Ok(client)
    }

    /// Verify the connected chain ID matches configuration.
    pub async fn verify_chain_id(&self) -> BlockchainResult<()> {
        let chain_id = self.chain_id().await?;
        if chain_id.0 != self.config.chain_id {
            return Err(BlockchainError::ChainMismatch {
                expected: self.config.chain_id,
                actual: chain_id.0,
            });
        }
        Ok(())
    }

    /// Run a read against each provider in turn until one answers in time.
    async fn read<T, F, Fut>(&self, what: &str, op: F) -> BlockchainResult<T>
    where
        F: Fn(DynProvider) -> Fut,
        Fut: Future<Output = Result<T, String>>,
    {
        for (i, provider) in self.readers.iter().enumerate() {
            match timeout(self.timeout_duration, op(provider.clone())).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => {
                    tracing::warn!(provider_idx = i, error = %e, what, "RPC error, trying next provider")
                }
                Err(_) => tracing::warn!(provider_idx = i, what, "RPC timeout, trying next provider"),
            }
        }
        Err(BlockchainError::Rpc(format!("All RPC providers failed to get {}", what)))
    }

    /// Wait for a submitted transfer and normalise its receipt.
    async fn confirm(
        &self,
        pending: PendingTransactionBuilder<alloy::network::Ethereum>,
    ) -> BlockchainResult<TransferReceipt> {
        let tx_hash = *pending.tx_hash();
        tracing::debug!(tx_hash = %tx_hash, "Transfer submitted, waiting for receipt");

        let receipt = timeout(self.receipt_timeout, pending.get_receipt())
            .await
            .map_err(|_| BlockchainError::Timeout(self.receipt_timeout.as_secs()))?
            .map_err(|e| BlockchainError::Rpc(format!("Receipt for {} unavailable: {}", tx_hash, e)))?;

        if !receipt.status() {
            return Err(BlockchainError::Reverted(tx_hash.to_string()));
        }

        let timestamp = match receipt.block_number {
            Some(number) => self.block_timestamp(number).await,
            None => None,
        }
        .unwrap_or_else(Utc::now);

        Ok(TransferReceipt {
            tx_hash,
            payer: receipt.from,
            timestamp,
            block_number: receipt.block_number,
        })
    }

    async fn block_timestamp(&self, number: u64) -> Option<DateTime<Utc>> {
        let block = self
            .sender
            .get_block_by_number(BlockNumberOrTag::Number(number))
            .await
            .ok()
            .flatten()?;
        DateTime::from_timestamp(block.header.timestamp as i64, 0)
    }

    /// Get the configuration.
    pub fn config(&self) -> &BlockchainConfig {
        &self.config
    }
}

/// Left-align a memo into the 32-byte on-chain memo word.
pub(crate) fn memo_word(memo: &Bytes) -> BlockchainResult<B256> {
    if memo.len() > 32 {
        return Err(BlockchainError::InvalidMemo(memo.len()));
    }
    let mut word = [0u8; 32];
    word[..memo.len()].copy_from_slice(memo);
    Ok(B256::from(word))
}

#[async_trait]
impl ChainClient for AlloyChainClient {
    async fn addresses(&self) -> BlockchainResult<Vec<Address>> {
        Ok(vec![self.wallet.address()])
    }

    async fn token_metadata(&self, token: Address) -> BlockchainResult<TokenMetadata> {
        self.read("token metadata", |provider| async move {
            let contract = ITip20::new(token, provider);
            let symbol = contract.symbol().call().await.map_err(|e| e.to_string())?;
            let decimals = contract.decimals().call().await.map_err(|e| e.to_string())?;
            Ok(TokenMetadata { symbol, decimals })
        })
        .await
    }

    async fn chain_id(&self) -> BlockchainResult<ChainId> {
        self.read("chain id", |provider| async move {
            provider.get_chain_id().await.map(ChainId).map_err(|e| e.to_string())
        })
        .await
    }

    async fn transfer_sync(&self, transfer: TokenTransfer) -> BlockchainResult<TransferReceipt> {
        let contract = ITip20::new(transfer.token, self.sender.clone());
        let sent = if transfer.memo.is_empty() {
            contract.transfer(transfer.to, transfer.amount).send().await
        } else {
            let memo = memo_word(&transfer.memo)?;
            contract
                .transferWithMemo(transfer.to, transfer.amount, memo)
                .send()
                .await
        };
        let pending = sent.map_err(|e| BlockchainError::Contract(e.to_string()))?;
        self.confirm(pending).await
    }

    async fn transfer_with_nonce(
        &self,
        transfer: TokenTransfer,
        slot: NonceSlot,
    ) -> BlockchainResult<TransferReceipt> {
        let contract = ITip20::new(transfer.token, self.sender.clone());
        let pending = contract
            .transfer(transfer.to, transfer.amount)
            .nonce(slot.nonce)
            .send()
            .await
            .map_err(|e| BlockchainError::Contract(e.to_string()))?;
        tracing::debug!(nonce_key = slot.key.0, nonce = slot.nonce, "Transfer sent on nonce slot");
        self.confirm(pending).await
    }

    /// Plain EVM nodes have a single nonce sequence per account, so key `k`
    /// reserves the `k`-th pending nonce. Keys must be allocated before any of
    /// them is used.
    async fn nonce(&self, account: Address, key: NonceKey) -> BlockchainResult<u64> {
        let base = self
            .read("transaction count", |provider| async move {
                provider
                    .get_transaction_count(account)
                    .pending()
                    .await
                    .map_err(|e| e.to_string())
            })
            .await?;
        Ok(base + key.0.saturating_sub(1))
    }
}

impl std::fmt::Debug for AlloyChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlloyChainClient")
            .field("rpc_url", &self.config.rpc_url)
            .field("chain_id", &self.config.chain_id)
            .field("account", &self.wallet.address())
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}
