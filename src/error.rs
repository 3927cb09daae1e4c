//! Top-level error type for payment operations.

use thiserror::Error;

use crate::blockchain::BlockchainError;
use crate::mail::MailError;
use crate::render::RenderError;

#[derive(Debug, Error)]
pub enum PayError {
    #[error(transparent)]
    Chain(#[from] BlockchainError),

    /// No transfer was made, so there is nothing to send a receipt for.
    #[error("Receipt not found")]
    ReceiptNotFound,

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Mail(#[from] MailError),
}

pub type PayResult<T> = Result<T, PayError>;
