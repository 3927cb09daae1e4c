//! The chain collaborator contract.

use alloy::primitives::Address;
use async_trait::async_trait;

use crate::blockchain::types::{
    BlockchainResult, ChainId, NonceKey, NonceSlot, TokenMetadata, TokenTransfer,
    TransferReceipt,
};

/// Wallet-backed access to a token chain.
///
/// Implementations sign with their own account and return receipts in the
/// normalised [`TransferReceipt`] shape.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Accounts the client can send from. The first one pays.
    async fn addresses(&self) -> BlockchainResult<Vec<Address>>;

    /// Symbol and decimals of a token.
    async fn token_metadata(&self, token: Address) -> BlockchainResult<TokenMetadata>;

    /// Chain the client is connected to.
    async fn chain_id(&self) -> BlockchainResult<ChainId>;

    /// Submit a transfer and wait for its receipt.
    async fn transfer_sync(&self, transfer: TokenTransfer) -> BlockchainResult<TransferReceipt>;

    /// Submit a transfer on a reserved nonce slot and wait for its receipt.
    async fn transfer_with_nonce(
        &self,
        transfer: TokenTransfer,
        slot: NonceSlot,
    ) -> BlockchainResult<TransferReceipt>;

    /// Next nonce of `account` on the sequence identified by `key`.
    async fn nonce(&self, account: Address, key: NonceKey) -> BlockchainResult<u64>;
}
