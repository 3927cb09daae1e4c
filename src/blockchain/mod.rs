//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variables (private key)
//!     → wallet.rs (key loading)
//!     → client.rs (RPC connection with timeouts, token calls)
//!     → chain.rs (ChainClient contract consumed by payments)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod chain;
pub mod client;
pub mod types;
pub mod units;
pub mod wallet;

pub use chain::ChainClient;
pub use client::AlloyChainClient;
pub use types::{
    BlockchainConfig, BlockchainError, BlockchainResult, ChainId, NonceKey, NonceSlot,
    TokenMetadata, TokenTransfer, TransferReceipt, TEMPO_TESTNET_CHAIN_ID,
};
pub use units::scale_amount;
pub use wallet::Wallet;
