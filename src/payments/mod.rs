//! Payments subsystem.
//!
//! # Data Flow
//! ```text
//! TransferRequest (types.rs)
//!     → orchestrator.rs (account, token metadata, amount scaling, transfer)
//!     → receipt.rs (PDF + HTML render, mail to payer and organisation)
//!     → TransferResult / BatchAck / BatchResult
//! ```

pub mod orchestrator;
pub mod receipt;
pub mod types;

pub use orchestrator::PaymentOrchestrator;
pub use receipt::ReceiptMailer;
pub use types::{
    BatchAck, BatchItemOutcome, BatchResult, ItemStatus, TransferRequest, TransferResult,
};
