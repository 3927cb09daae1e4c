//! Mail delivery subsystem.
//!
//! # Data Flow
//! ```text
//! OutgoingMail (message.rs, transport independent)
//!     → MailTransport::send
//!     → smtp.rs (lettre MIME composition, async SMTP)
//! ```

pub mod message;
pub mod smtp;

use async_trait::async_trait;
use thiserror::Error;

pub use message::{MailAddress, MailAttachment, OutgoingMail};
pub use smtp::SmtpMailer;

/// Errors raised while composing or delivering mail.
#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid mail address {0}")]
    Address(String),

    #[error("Cannot compose message: {0}")]
    Message(String),

    #[error("SMTP transport error: {0}")]
    Transport(String),

    #[error("SMTP configuration error: {0}")]
    Config(String),
}

pub type MailResult<T> = Result<T, MailError>;

/// Outgoing mail collaborator.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Check the server is reachable and accepts our credentials.
    async fn verify(&self) -> MailResult<bool>;

    async fn send(&self, mail: OutgoingMail) -> MailResult<()>;
}
